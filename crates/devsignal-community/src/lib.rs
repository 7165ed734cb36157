//! # devsignal-community
//!
//! Signals drawn from the contributions summary: how much of the subject's
//! activity is conversation rather than code, and whether the recent quarter
//! is busier or quieter than the yearly baseline.

use devsignal_math::safe_ratio_f64;
use devsignal_settings::Thresholds;
use devsignal_types::{
    ContributionCalendar, ContributionsSummary, EngagementReport, MomentumReport, MomentumStatus,
    Ratio,
};

/// Quarters in the yearly baseline.
const QUARTERS_PER_YEAR: f64 = 4.0;

/// Talk (issues + reviews) over all events (talk + commits, PRs and
/// repositories created).
pub fn build_engagement(summary: Option<&ContributionsSummary>) -> EngagementReport {
    let Some(s) = summary else {
        return EngagementReport::default();
    };

    let talk = s.total_issue_contributions + s.total_pull_request_review_contributions;
    let code = s.total_commit_contributions
        + s.total_pull_request_contributions
        + s.total_repository_contributions;

    EngagementReport {
        ratio: Ratio::from_counts(talk, talk + code),
        talk_events: talk,
        code_events: code,
    }
}

/// Recent-quarter activity against a quarter of the yearly total.
///
/// With no calendar, or a calendar without weeks, the status is
/// [`MomentumStatus::Unknown`]. A calendar that sums to zero is a ghost.
pub fn build_momentum(
    summary: Option<&ContributionsSummary>,
    thresholds: &Thresholds,
) -> MomentumReport {
    let Some(calendar) = summary.and_then(|s| s.calendar.as_ref()) else {
        return MomentumReport::default();
    };
    if calendar.weeks.is_empty() {
        return MomentumReport::default();
    }

    let (year_total, recent_total) = calendar_totals(calendar, thresholds.momentum_recent_weeks);
    let weeks = calendar.weeks.len() as u64;

    if year_total == 0 {
        return MomentumReport {
            ratio: Ratio::Absent,
            status: MomentumStatus::Ghost,
            year_total,
            recent_total,
            weeks,
        };
    }

    // Bands are checked against the exact quotient; only the published
    // value is rounded.
    let baseline = year_total as f64 / QUARTERS_PER_YEAR;
    let status = classify_momentum(recent_total as f64 / baseline, thresholds);
    let ratio = Ratio::from_value(safe_ratio_f64(recent_total as f64, baseline), year_total);

    MomentumReport {
        ratio,
        status,
        year_total,
        recent_total,
        weeks,
    }
}

/// Map a momentum value onto its status band.
pub fn classify_momentum(value: f64, thresholds: &Thresholds) -> MomentumStatus {
    if value > thresholds.momentum_accelerating {
        MomentumStatus::Accelerating
    } else if value < thresholds.momentum_ghost {
        MomentumStatus::Ghost
    } else if value < thresholds.momentum_cooling {
        MomentumStatus::CoolingDown
    } else {
        MomentumStatus::Steady
    }
}

/// Sum over all weeks and over the most recent `recent_weeks` (or all
/// weeks when there are fewer).
fn calendar_totals(calendar: &ContributionCalendar, recent_weeks: usize) -> (u64, u64) {
    let year: u64 = calendar.weeks.iter().map(|w| w.total()).sum();
    let skip = calendar.weeks.len().saturating_sub(recent_weeks);
    let recent: u64 = calendar.weeks[skip..].iter().map(|w| w.total()).sum();
    (year, recent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use devsignal_types::{ContributionDay, ContributionWeek};

    fn week(count: u64) -> ContributionWeek {
        ContributionWeek {
            days: vec![ContributionDay {
                date: "2024-01-01".to_string(),
                count,
            }],
        }
    }

    fn summary(weeks: Vec<ContributionWeek>) -> ContributionsSummary {
        ContributionsSummary {
            calendar: Some(ContributionCalendar {
                total_contributions: weeks.iter().map(|w| w.total()).sum(),
                weeks,
            }),
            ..ContributionsSummary::default()
        }
    }

    #[test]
    fn bands() {
        let t = Thresholds::default();
        assert_eq!(classify_momentum(1.51, &t), MomentumStatus::Accelerating);
        assert_eq!(classify_momentum(1.5, &t), MomentumStatus::Steady);
        assert_eq!(classify_momentum(1.3, &t), MomentumStatus::Steady);
        assert_eq!(classify_momentum(0.5, &t), MomentumStatus::Steady);
        assert_eq!(classify_momentum(0.49, &t), MomentumStatus::CoolingDown);
        assert_eq!(classify_momentum(0.1, &t), MomentumStatus::CoolingDown);
        assert_eq!(classify_momentum(0.09, &t), MomentumStatus::Ghost);
    }

    #[test]
    fn recent_window_covers_all_weeks_when_short() {
        let report = build_momentum(Some(&summary(vec![week(2), week(2)])), &Thresholds::default());
        assert_eq!(report.recent_total, 4);
        assert_eq!(report.ratio.value(), Some(4.0));
        assert_eq!(report.status, MomentumStatus::Accelerating);
    }

    #[test]
    fn empty_calendar_is_unknown() {
        let report = build_momentum(Some(&summary(Vec::new())), &Thresholds::default());
        assert_eq!(report.status, MomentumStatus::Unknown);
        assert_eq!(report.ratio, Ratio::Absent);
    }

    #[test]
    fn status_uses_unrounded_value() {
        let t = Thresholds::default();
        // 1000 / (40001 / 4) = 0.0999975, published as 0.1
        let mut weeks = vec![week(39001)];
        weeks.extend((0..12).map(|i| week(if i == 0 { 1000 } else { 0 })));
        let ghost = build_momentum(Some(&summary(weeks)), &t);
        assert_eq!(ghost.year_total, 40001);
        assert_eq!(ghost.recent_total, 1000);
        assert_eq!(ghost.ratio.value(), Some(0.1));
        assert_eq!(ghost.status, MomentumStatus::Ghost);

        // 37501 / 25000 = 1.50004, published as 1.5
        let mut weeks = vec![week(62499)];
        weeks.extend((0..12).map(|i| week(if i == 0 { 37501 } else { 0 })));
        let fast = build_momentum(Some(&summary(weeks)), &t);
        assert_eq!(fast.ratio.value(), Some(1.5));
        assert_eq!(fast.status, MomentumStatus::Accelerating);
    }

    #[test]
    fn engagement_without_events_is_absent() {
        let report = build_engagement(Some(&ContributionsSummary::default()));
        assert_eq!(report.ratio, Ratio::Absent);
        assert_eq!(build_engagement(None), EngagementReport::default());
    }
}
