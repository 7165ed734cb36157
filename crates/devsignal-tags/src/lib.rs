//! # devsignal-tags
//!
//! **Tier 3 (Derived)**
//!
//! Archetype tags over already computed reports. Tags never look at raw
//! records; they are a projection of fork destiny and engagement.
//!
//! Tags are emitted in a fixed order: fork tags first, then at most one
//! talk/code tag.

use devsignal_math::safe_ratio;
use devsignal_settings::Thresholds;
use devsignal_types::{EngagementReport, ForkDestinyReport, Tag};

/// Derive archetype tags from fork destiny and engagement.
pub fn derive_tags(
    forks: &ForkDestinyReport,
    engagement: &EngagementReport,
    thresholds: &Thresholds,
) -> Vec<Tag> {
    let mut tags = fork_tags(forks, thresholds);
    tags.extend(talk_tag(engagement, thresholds));
    tags
}

fn fork_tags(forks: &ForkDestinyReport, thresholds: &Thresholds) -> Vec<Tag> {
    let mut tags = Vec::new();
    if forks.contributor > 0 {
        tags.push(Tag::HardForker);
    }
    if forks.variant > 0 {
        tags.push(Tag::VariantLeader);
    }

    let noise_share = safe_ratio(forks.noise, forks.total).unwrap_or(0.0);
    if forks.total >= thresholds.fork_cleaner_min_forks
        && forks.contributor == 0
        && forks.variant == 0
        && noise_share >= thresholds.fork_cleaner_min_noise
    {
        tags.push(Tag::ForkCleaner);
    }
    tags
}

/// At most one talk/code tag, and none below the sample floor.
fn talk_tag(engagement: &EngagementReport, thresholds: &Thresholds) -> Option<Tag> {
    if engagement.ratio.sample_size() < thresholds.tag_min_samples {
        return None;
    }
    // Exact share from the event counts; the published ratio is rounded.
    let events = engagement.talk_events + engagement.code_events;
    if events == 0 {
        return None;
    }
    let talk = engagement.talk_events as f64 / events as f64;
    Some(if talk <= thresholds.silent_maker_max_talk {
        Tag::SilentMaker
    } else if talk >= thresholds.talker_min_talk {
        Tag::Talker
    } else {
        Tag::VocalContributor
    })
}
