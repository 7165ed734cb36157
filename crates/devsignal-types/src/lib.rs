//! # devsignal-types
//!
//! **Tier 0 (Contracts)**
//!
//! Pure data structures for activity records and computed profiles.
//! No I/O or business logic.
//!
//! ## What belongs here
//! * Normalized input records (repositories, pull requests, commits, ...)
//! * The aggregate `Profile` and its per-metric reports
//! * The `Ratio` tagged value shared by every ratio metric
//!
//! ## What does NOT belong here
//! * Metric computation (use the metric crates)
//! * Orchestration (use `devsignal-profile`)
//! * File or network I/O

pub mod profile;
pub mod records;

pub use profile::*;
pub use records::*;
