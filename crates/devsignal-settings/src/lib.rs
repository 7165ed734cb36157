//! # devsignal-settings
//!
//! **Tier 0 (Pure Settings)**
//!
//! Clap-free settings for profile computation: the timezone override, the
//! organization ownership flag, classifier thresholds and the keyword
//! vocabularies used by the self-introduction checker.
//!
//! ## What belongs here
//! * Pure data types with Serde derive
//! * Default values for every policy constant
//! * TOML loading and validation
//!
//! ## What does NOT belong here
//! * Clap parsing (use devsignal-config)
//! * Metric computation

mod vocabulary;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use vocabulary::{KeywordVocabulary, VOCABULARY_VERSION};

/// Errors from loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid setting '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

/// Settings accepted by the profile orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSettings {
    /// IANA zone name or `+HH:MM` / `-HH:MM` offset. `None` means UTC.
    pub timezone: Option<String>,

    /// Count organization-owned repositories as owned for the uni index.
    pub include_org_repos: bool,

    /// Number of PR and repository URLs kept as evidence.
    pub evidence_limit: usize,

    pub thresholds: Thresholds,

    pub vocabulary: KeywordVocabulary,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            timezone: None,
            include_org_repos: false,
            evidence_limit: 5,
            thresholds: Thresholds::default(),
            vocabulary: KeywordVocabulary::default(),
        }
    }
}

impl ProfileSettings {
    /// Parse settings from a TOML string. Missing keys keep their defaults.
    pub fn from_toml(s: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.thresholds.validate()?;
        self.vocabulary.validate()
    }
}

/// Classification policy. Every value here is tunable configuration, not a
/// derived statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Lifespan at or above which an original repository is long-term.
    pub long_term_days: i64,
    /// Stars at or above which a short-lived original is a gem.
    pub gem_min_stars: u64,

    /// Own stars at or above which a fork is a variant.
    pub variant_min_stars: u64,
    /// Fork stars over best base stars at or above which a fork is a variant.
    pub variant_star_ratio: f64,

    /// Minimum talk+code events before a talk/code tag is emitted.
    pub tag_min_samples: u64,
    pub silent_maker_max_talk: f64,
    pub talker_min_talk: f64,
    pub fork_cleaner_min_forks: u64,
    pub fork_cleaner_min_noise: f64,

    pub momentum_recent_weeks: usize,
    pub momentum_accelerating: f64,
    pub momentum_cooling: f64,
    pub momentum_ghost: f64,

    pub consistency_strong: f64,
    pub consistency_partial: f64,
    /// Minimum weight for a language to count as measured.
    pub measured_language_floor: f64,

    pub one_liner_max_chars: usize,
    pub short_bio_min_chars: usize,
    pub excerpt_chars: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            long_term_days: 90,
            gem_min_stars: 5,
            variant_min_stars: 50,
            variant_star_ratio: 0.3,
            tag_min_samples: 10,
            silent_maker_max_talk: 0.2,
            talker_min_talk: 0.6,
            fork_cleaner_min_forks: 3,
            fork_cleaner_min_noise: 0.8,
            momentum_recent_weeks: 12,
            momentum_accelerating: 1.5,
            momentum_cooling: 0.5,
            momentum_ghost: 0.1,
            consistency_strong: 0.8,
            consistency_partial: 0.4,
            measured_language_floor: 0.01,
            one_liner_max_chars: 140,
            short_bio_min_chars: 80,
            excerpt_chars: 400,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), SettingsError> {
        let unit_fields = [
            ("variant_star_ratio", self.variant_star_ratio),
            ("silent_maker_max_talk", self.silent_maker_max_talk),
            ("talker_min_talk", self.talker_min_talk),
            ("fork_cleaner_min_noise", self.fork_cleaner_min_noise),
            ("consistency_strong", self.consistency_strong),
            ("consistency_partial", self.consistency_partial),
            ("measured_language_floor", self.measured_language_floor),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, format!("{value} is outside [0, 1]")));
            }
        }

        if self.long_term_days < 0 {
            return Err(invalid("long_term_days", "must not be negative"));
        }
        if self.momentum_recent_weeks == 0 {
            return Err(invalid("momentum_recent_weeks", "must be at least 1"));
        }
        if self.silent_maker_max_talk > self.talker_min_talk {
            return Err(invalid(
                "silent_maker_max_talk",
                "must not exceed talker_min_talk",
            ));
        }
        if !(self.momentum_ghost <= self.momentum_cooling
            && self.momentum_cooling <= self.momentum_accelerating)
        {
            return Err(invalid(
                "momentum_cooling",
                "bands must satisfy ghost <= cooling <= accelerating",
            ));
        }
        if self.consistency_partial > self.consistency_strong {
            return Err(invalid(
                "consistency_partial",
                "must not exceed consistency_strong",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        field: field.to_string(),
        reason: reason.into(),
    }
}
