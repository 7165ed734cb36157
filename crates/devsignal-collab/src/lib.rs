//! # devsignal-collab
//!
//! **Tier 2 (Metric)**
//!
//! Where does the subject send pull requests, and how much of their activity
//! lands on repositories they own?
//!
//! ## What belongs here
//! * Upstream orientation index (UOI) and external accept rate
//! * Uni Index (creator vs. collaborator spectrum)
//!
//! ## What does NOT belong here
//! * Fork classification (see `devsignal-outcomes`)
//! * Timestamp handling

use devsignal_math::safe_ratio;
use devsignal_types::{CollaborationReport, Commit, PullRequest, Ratio, UniIndexReport};

/// Points for a merged pull request.
const MERGED_PR_POINTS: u64 = 2;
/// Points for an unmerged pull request.
const OPEN_PR_POINTS: u64 = 1;

/// UOI and accept rate over the subject's pull requests.
///
/// A PR is external when its target owner differs from `login`
/// (ASCII case-insensitive). UOI is external over all PRs; accept rate is
/// merged external over external.
pub fn build_collaboration_report(prs: &[PullRequest], login: &str) -> CollaborationReport {
    let mut external = 0u64;
    let mut merged_external = 0u64;

    for pr in prs.iter().filter(|pr| !pr.targets_owner(login)) {
        external += 1;
        if pr.is_merged() {
            merged_external += 1;
        }
    }

    let total = prs.len() as u64;

    CollaborationReport {
        uoi: Ratio::from_counts(external, total),
        accept_rate: Ratio::from_counts(merged_external, external),
        external_prs: external,
        self_prs: total - external,
        merged_external_prs: merged_external,
    }
}

/// Owned-side share of weighted activity.
///
/// Owned points are own-repository commits plus PR points for owned targets.
/// A target is owned when it is the subject, or, with `include_org_repos`,
/// one of `organizations`. External points are PR points for every other
/// target. Sample size is commits plus PRs.
pub fn build_uni_index(
    commits: &[Commit],
    prs: &[PullRequest],
    login: &str,
    organizations: &[String],
    include_org_repos: bool,
) -> UniIndexReport {
    let owns = |owner: &str| {
        owner.eq_ignore_ascii_case(login)
            || (include_org_repos && organizations.iter().any(|o| o.eq_ignore_ascii_case(owner)))
    };

    let mut owned = commits.iter().filter(|c| c.is_own_repo).count() as u64;
    let mut external = 0u64;

    for pr in prs {
        let points = if pr.is_merged() {
            MERGED_PR_POINTS
        } else {
            OPEN_PR_POINTS
        };
        if owns(&pr.repo_owner) {
            owned += points;
        } else {
            external += points;
        }
    }

    let sample = (commits.len() + prs.len()) as u64;

    UniIndexReport {
        ratio: Ratio::from_value(safe_ratio(owned, owned + external), sample),
        owned_points: owned,
        external_points: external,
        include_org_repos,
    }
}
