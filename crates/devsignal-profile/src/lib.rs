//! # devsignal-profile
//!
//! **Tier 3 (Orchestration)**
//!
//! Composes every metric crate into one [`devsignal_types::Profile`].
//!
//! ## What belongs here
//! * Request validation and timezone resolution
//! * Warnings and status for missing inputs
//! * Evidence samples, coverage metadata and the input signature
//!
//! ## What does NOT belong here
//! * Metric logic (each metric lives in its own crate)
//! * CLI parsing or file I/O (see `devsignal`)
//!
//! Metric crates do not depend on each other. Only this crate fans in, and
//! the resolved timezone offset is the only value threaded between them.

mod coverage;
mod profile;

pub use profile::{ProfileContext, ProfileRequest, build_profile};
