//! # devsignal-temporal
//!
//! When does the subject work? Pull-request creation times feed a 24-bin
//! local-hour histogram and its two busiest rolling windows; commit author
//! times feed the night ratio.

use devsignal_time::{local_hour, parse_timestamp};
use devsignal_types::{ActivityRhythm, Commit, CoreWindow, HourHistogram, PullRequest, Ratio};

/// Local hours counted as night: 22:00-23:59 and 00:00-04:59.
pub const NIGHT_HOURS: [u32; 7] = [22, 23, 0, 1, 2, 3, 4];

/// Width of a core-hours window, in hourly bins.
const WINDOW_HOURS: usize = 2;
const MAX_CORE_WINDOWS: usize = 2;

/// Histogram and core hours over PR creation times.
pub fn build_activity_rhythm(prs: &[PullRequest], offset_minutes: i32) -> ActivityRhythm {
    let (histogram, skipped) =
        hour_histogram(prs.iter().map(|pr| pr.created_at.as_deref()), offset_minutes);
    let total_events: u64 = histogram.iter().flatten().sum();
    let core_hours = core_hours(&histogram);

    ActivityRhythm {
        histogram,
        total_events,
        skipped,
        core_hours,
    }
}

/// Bucket timestamps into local hours. Returns the histogram and the number
/// of timestamps that were missing or unparseable.
pub fn hour_histogram<'a, I>(timestamps: I, offset_minutes: i32) -> (HourHistogram, u64)
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut histogram: HourHistogram = [None; 24];
    let mut skipped = 0u64;

    for raw in timestamps {
        match raw.and_then(parse_timestamp) {
            Some(ts) => {
                let hour = local_hour(ts, offset_minutes) as usize;
                *histogram[hour].get_or_insert(0) += 1;
            }
            None => skipped += 1,
        }
    }

    (histogram, skipped)
}

/// The two busiest distinct rolling two-hour windows.
///
/// Windows are ranked by count descending, then by start hour. A histogram
/// with no events yields no windows.
pub fn core_hours(histogram: &HourHistogram) -> Vec<CoreWindow> {
    let counts: Vec<u64> = histogram.iter().map(|b| b.unwrap_or(0)).collect();
    if counts.iter().sum::<u64>() == 0 {
        return Vec::new();
    }

    let mut windows: Vec<(usize, u64)> = (0..24)
        .map(|start| {
            let count = (0..WINDOW_HOURS).map(|i| counts[(start + i) % 24]).sum();
            (start, count)
        })
        .filter(|(_, count)| *count > 0)
        .collect();
    windows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    windows
        .into_iter()
        .take(MAX_CORE_WINDOWS)
        .map(|(start, count)| CoreWindow {
            start: hour_label(start),
            end: hour_label((start + 1) % 24),
            count,
        })
        .collect()
}

/// Share of non-merge commits authored during local night hours.
///
/// Sample size counts non-merge commits with a parseable author time.
pub fn build_night_ratio(commits: &[Commit], offset_minutes: i32) -> Ratio {
    let mut sample = 0u64;
    let mut night = 0u64;

    for commit in commits.iter().filter(|c| !c.is_merge) {
        let Some(ts) = commit.authored_at.as_deref().and_then(parse_timestamp) else {
            continue;
        };
        sample += 1;
        if NIGHT_HOURS.contains(&local_hour(ts, offset_minutes)) {
            night += 1;
        }
    }

    Ratio::from_counts(night, sample)
}

fn hour_label(hour: usize) -> String {
    format!("{hour:02}:00")
}
