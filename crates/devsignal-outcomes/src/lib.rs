//! # devsignal-outcomes
//!
//! **Tier 2 (Metric)**
//!
//! Outcome classifiers over the subject's own repositories.
//!
//! ## What belongs here
//! * Grit factor: originals classified as long-term, gem or churn
//! * Fork destiny: owned forks classified as contributor, variant or noise
//!
//! ## What does NOT belong here
//! * Threshold defaults (see `devsignal-settings`)
//! * Tag derivation from these reports (see `devsignal-tags`)
//!
//! Both classifiers are fixed decision trees. Every count they report sums
//! to the sample it was drawn from.

mod fork;
mod grit;

pub use fork::{build_fork_destiny, classify_fork};
pub use grit::{GritClass, build_grit_report, classify_original};
