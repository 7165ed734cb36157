//! # devsignal-intro
//!
//! **Tier 2 (Text)**
//!
//! Reads the subject's self-introduction: classifies its style, strips it
//! to plain text, and checks the claims it makes against measured signals.
//!
//! ## What belongs here
//! * Markdown/HTML stripping and image alt-text extraction
//! * Style classification (`none`, `empty`, `one_liner`, `short_bio`,
//!   `visual_dashboard`, `mixed`)
//! * Keyword extraction and the consistency report
//!
//! ## What does NOT belong here
//! * Keyword lists themselves (see `devsignal-settings::KeywordVocabulary`)
//! * Language weights (see `devsignal-weights`)

mod analyzer;
mod consistency;
mod markdown;

pub use analyzer::{analyze_intro, classify};
pub use consistency::{
    ConsistencyInput, check_consistency, contains_keyword, extract_languages, extract_topics,
    repo_mentions,
};
pub use markdown::{Stripped, strip_markdown};
