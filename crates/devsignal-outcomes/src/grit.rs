use devsignal_settings::Thresholds;
use devsignal_time::parse_opt;
use devsignal_types::{GritReport, Ratio, Repository};

/// Outcome of a single original repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GritClass {
    LongTerm,
    Gem,
    Churn,
}

/// Classify an original by lifespan (days) and stars.
pub fn classify_original(lifespan_days: i64, stars: u64, thresholds: &Thresholds) -> GritClass {
    if lifespan_days >= thresholds.long_term_days {
        GritClass::LongTerm
    } else if stars >= thresholds.gem_min_stars {
        GritClass::Gem
    } else {
        GritClass::Churn
    }
}

/// Grit factor over the subject's originals (owned, not forks).
///
/// Lifespan is `pushed_at - created_at` in whole days, clamped at zero.
/// Originals with a missing or unparseable timestamp are counted in
/// `skipped` and left out of the sample.
pub fn build_grit_report(repos: &[Repository], login: &str, thresholds: &Thresholds) -> GritReport {
    let mut report = GritReport::default();

    for repo in repos.iter().filter(|r| r.is_owned_by(login) && !r.is_fork) {
        let created = parse_opt(repo.created_at.as_deref());
        let pushed = parse_opt(repo.pushed_at.as_deref());
        let (Some(created), Some(pushed)) = (created, pushed) else {
            report.skipped += 1;
            continue;
        };

        let lifespan = (pushed - created).num_days().max(0);
        match classify_original(lifespan, repo.stars, thresholds) {
            GritClass::LongTerm => report.long_term += 1,
            GritClass::Gem => report.gem += 1,
            GritClass::Churn => report.churn += 1,
        }
    }

    report.ratio = Ratio::from_counts(report.long_term + report.gem, report.classified());
    report
}
