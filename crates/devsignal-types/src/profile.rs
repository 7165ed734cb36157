//! The aggregate profile and its per-metric reports.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::records::EmailClass;

/// Schema version for serialized profiles.
/// v2: identity fingerprint, topic corroboration, input signature.
pub const PROFILE_SCHEMA_VERSION: u32 = 2;

// ---------------
// Ratio values
// ---------------

/// A ratio metric that is either measured over a nonzero sample or absent.
///
/// Serialized as `{"present": bool, "value": f64|null, "sample_size": u64}`.
/// A present ratio always has `sample_size > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RatioWire", into = "RatioWire")]
pub enum Ratio {
    Present {
        value: f64,
        sample_size: u64,
    },
    #[default]
    Absent,
}

impl Ratio {
    /// Ratio of two counts; absent when `denom` is zero.
    pub fn from_counts(numer: u64, denom: u64) -> Self {
        match devsignal_math::safe_ratio(numer, denom) {
            Some(value) => Ratio::Present {
                value,
                sample_size: denom,
            },
            None => Ratio::Absent,
        }
    }

    /// Wrap an already computed value. Absent unless both a finite value
    /// and a nonzero sample are supplied.
    pub fn from_value(value: Option<f64>, sample_size: u64) -> Self {
        match value {
            Some(v) if sample_size > 0 && v.is_finite() => Ratio::Present {
                value: v,
                sample_size,
            },
            _ => Ratio::Absent,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Ratio::Present { value, .. } => Some(*value),
            Ratio::Absent => None,
        }
    }

    pub fn sample_size(&self) -> u64 {
        match self {
            Ratio::Present { sample_size, .. } => *sample_size,
            Ratio::Absent => 0,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Ratio::Present { .. })
    }
}

#[derive(Serialize, Deserialize)]
struct RatioWire {
    present: bool,
    #[serde(default)]
    value: Option<f64>,
    #[serde(default)]
    sample_size: u64,
}

impl From<RatioWire> for Ratio {
    fn from(wire: RatioWire) -> Self {
        if wire.present {
            Ratio::from_value(wire.value, wire.sample_size)
        } else {
            Ratio::Absent
        }
    }
}

impl From<Ratio> for RatioWire {
    fn from(ratio: Ratio) -> Self {
        RatioWire {
            present: ratio.is_present(),
            value: ratio.value(),
            sample_size: ratio.sample_size(),
        }
    }
}

// ---------------
// Profile
// ---------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub schema_version: u32,
    /// Reference instant the profile was computed against (RFC 3339, UTC).
    pub generated_at: String,
    pub tool: ToolInfo,
    pub status: ProfileStatus,
    pub warnings: Vec<String>,
    pub subject: SubjectInfo,
    pub timezone: TimezoneInfo,
    pub languages: Vec<WeightEntry>,
    pub topics: Vec<WeightEntry>,
    pub focus: FocusReport,
    pub rhythm: ActivityRhythm,
    pub night_ratio: Ratio,
    pub collaboration: CollaborationReport,
    pub uni_index: UniIndexReport,
    pub grit: GritReport,
    pub fork_destiny: ForkDestinyReport,
    pub engagement: EngagementReport,
    pub momentum: MomentumReport,
    pub tags: Vec<Tag>,
    pub intro: IntroAnalysis,
    pub consistency: ConsistencyReport,
    pub identity: IdentityFingerprint,
    pub evidence: Evidence,
    pub coverage: Coverage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

impl ToolInfo {
    pub fn current() -> Self {
        Self {
            name: "devsignal".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    Complete,
    Partial,
}

/// Identity fields passed through from the user-info record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubjectInfo {
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub blog: Option<String>,
    pub twitter: Option<String>,
    pub followers: Option<u64>,
    pub following: Option<u64>,
    pub organizations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneInfo {
    pub requested: Option<String>,
    pub offset_minutes: i32,
    pub source: TimezoneSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimezoneSource {
    /// No override supplied; UTC.
    Default,
    FixedOffset,
    NamedZone,
    /// Override supplied but not recognized; UTC.
    Fallback,
}

// -----------------
// Skill weights
// -----------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub name: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FocusReport {
    /// Language holding the largest byte share, when any byte data exists.
    pub language: Option<String>,
    /// Dominant bytes over total bytes; sample size is total bytes.
    pub ratio: Ratio,
}

// -----------------
// Temporal rhythm
// -----------------

/// Events per local hour; `None` means no event ever landed in that hour.
pub type HourHistogram = [Option<u64>; 24];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRhythm {
    pub histogram: HourHistogram,
    pub total_events: u64,
    /// Events whose timestamp could not be parsed.
    pub skipped: u64,
    pub core_hours: Vec<CoreWindow>,
}

impl Default for ActivityRhythm {
    fn default() -> Self {
        Self {
            histogram: [None; 24],
            total_events: 0,
            skipped: 0,
            core_hours: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreWindow {
    pub start: String,
    pub end: String,
    pub count: u64,
}

// ----------------------
// Collaboration
// ----------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CollaborationReport {
    /// Upstream orientation index: external PRs over all PRs.
    pub uoi: Ratio,
    /// Merged external PRs over external PRs.
    pub accept_rate: Ratio,
    pub external_prs: u64,
    pub self_prs: u64,
    pub merged_external_prs: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UniIndexReport {
    /// Owned points over all points; sample size is commits + PRs.
    pub ratio: Ratio,
    pub owned_points: u64,
    pub external_points: u64,
    pub include_org_repos: bool,
}

// ----------------------
// Delivery outcomes
// ----------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GritReport {
    pub ratio: Ratio,
    pub long_term: u64,
    pub gem: u64,
    pub churn: u64,
    /// Originals skipped for unparseable timestamps.
    pub skipped: u64,
}

impl GritReport {
    pub fn classified(&self) -> u64 {
        self.long_term + self.gem + self.churn
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForkDestinyReport {
    pub total: u64,
    pub contributor: u64,
    pub variant: u64,
    pub noise: u64,
    pub total_stars: u64,
    pub variant_stars: u64,
    pub forks: Vec<ForkOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkOutcome {
    pub name: String,
    pub class: ForkClass,
    pub stars: u64,
    /// Highest star count among base repositories this fork targeted.
    pub best_base_stars: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForkClass {
    Contributor,
    Variant,
    Noise,
}

// ----------------------
// Community
// ----------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngagementReport {
    /// Talk events over all events.
    pub ratio: Ratio,
    pub talk_events: u64,
    pub code_events: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumReport {
    /// Recent quarter over the yearly quarterly baseline; sample size is the
    /// year total.
    pub ratio: Ratio,
    pub status: MomentumStatus,
    pub year_total: u64,
    pub recent_total: u64,
    pub weeks: u64,
}

impl Default for MomentumReport {
    fn default() -> Self {
        Self {
            ratio: Ratio::Absent,
            status: MomentumStatus::Unknown,
            year_total: 0,
            recent_total: 0,
            weeks: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumStatus {
    Accelerating,
    Steady,
    CoolingDown,
    Ghost,
    Unknown,
}

// ----------------------
// Tags
// ----------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    HardForker,
    VariantLeader,
    ForkCleaner,
    SilentMaker,
    Talker,
    VocalContributor,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::HardForker => "hard_forker",
            Tag::VariantLeader => "variant_leader",
            Tag::ForkCleaner => "fork_cleaner",
            Tag::SilentMaker => "silent_maker",
            Tag::Talker => "talker",
            Tag::VocalContributor => "vocal_contributor",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ----------------------
// Self-introduction
// ----------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntroState {
    None,
    Empty,
    OneLiner,
    ShortBio,
    VisualDashboard,
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntroAnalysis {
    pub state: IntroState,
    pub text_lines: u64,
    pub char_count: u64,
    pub image_count: u64,
    pub image_alts: Vec<String>,
    pub plain_text: String,
    pub excerpt: String,
}

impl Default for IntroAnalysis {
    fn default() -> Self {
        Self {
            state: IntroState::None,
            text_lines: 0,
            char_count: 0,
            image_count: 0,
            image_alts: Vec::new(),
            plain_text: String::new(),
            excerpt: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyLevel {
    Strong,
    Partial,
    Poor,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub asserted_languages: Vec<String>,
    pub measured_languages: Vec<String>,
    pub overlap: Vec<String>,
    /// Overlap over asserted languages.
    pub supported_ratio: Ratio,
    pub level: ConsistencyLevel,
    pub asserted_topics: Vec<String>,
    pub supported_topics: Vec<String>,
    pub unsupported_topics: Vec<String>,
    pub repo_mentions: RepoMentions,
    pub vocabulary_version: u32,
}

impl Default for ConsistencyReport {
    fn default() -> Self {
        Self {
            asserted_languages: Vec::new(),
            measured_languages: Vec::new(),
            overlap: Vec::new(),
            supported_ratio: Ratio::Absent,
            level: ConsistencyLevel::Unknown,
            asserted_topics: Vec::new(),
            supported_topics: Vec::new(),
            unsupported_topics: Vec::new(),
            repo_mentions: RepoMentions::default(),
            vocabulary_version: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RepoMentions {
    /// Mentioned repositories present in the repository list.
    pub verified: Vec<String>,
    /// Mentioned repositories the repository list does not contain.
    pub unverified: Vec<String>,
}

// ----------------------
// Identity fingerprint
// ----------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IdentityFingerprint {
    pub domains: Vec<DomainStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainStat {
    pub domain: String,
    pub class: EmailClass,
    pub commits: u64,
    pub pct: f64,
}

// ----------------------
// Evidence and coverage
// ----------------------

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Evidence {
    pub pull_requests: Vec<String>,
    pub repositories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coverage {
    pub repositories: SpanCoverage,
    pub pull_requests: SpanCoverage,
    pub commits: SpanCoverage,
    pub has_contributions: bool,
    pub has_self_intro: bool,
    pub input_signature: String,
}

/// Count of records and the time span they cover.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpanCoverage {
    pub total: u64,
    pub earliest: Option<String>,
    pub latest: Option<String>,
}
