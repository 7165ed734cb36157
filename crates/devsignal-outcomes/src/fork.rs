use devsignal_settings::Thresholds;
use devsignal_types::{
    AssociatedPullRequest, Commit, ForkClass, ForkDestinyReport, ForkOutcome, Repository,
};

/// Classify one fork from its stars and the PRs linked to its commits.
///
/// Contributor wins over variant: a merged cross-repository PR into a
/// repository the subject does not own is enough.
pub fn classify_fork(
    stars: u64,
    prs: &[&AssociatedPullRequest],
    login: &str,
    thresholds: &Thresholds,
) -> (ForkClass, Option<u64>) {
    let upstream = || {
        prs.iter()
            .filter(move |pr| !pr.base.owner.eq_ignore_ascii_case(login))
    };

    let best_base_stars = upstream().map(|pr| pr.base.stars).max();

    if upstream().any(|pr| pr.is_cross_repository && pr.merged) {
        return (ForkClass::Contributor, best_base_stars);
    }

    let relative = match best_base_stars {
        Some(best) if best > 0 => stars as f64 / best as f64 >= thresholds.variant_star_ratio,
        _ => false,
    };
    if stars >= thresholds.variant_min_stars || relative {
        return (ForkClass::Variant, best_base_stars);
    }

    (ForkClass::Noise, best_base_stars)
}

/// Fork destiny over the subject's owned forks.
///
/// A commit belongs to a fork when it was made in the fork or when one of
/// its associated PRs was opened from the fork. Only PRs reachable from the
/// fetched commit history are seen, so contributor counts are a lower bound.
pub fn build_fork_destiny(
    repos: &[Repository],
    commits: &[Commit],
    login: &str,
    thresholds: &Thresholds,
) -> ForkDestinyReport {
    let mut report = ForkDestinyReport::default();

    for fork in repos.iter().filter(|r| r.is_fork && r.is_owned_by(login)) {
        let linked: Vec<&AssociatedPullRequest> = commits
            .iter()
            .filter(|c| commit_touches_fork(c, fork))
            .flat_map(|c| c.associated_prs.iter())
            .collect();

        let (class, best_base_stars) = classify_fork(fork.stars, &linked, login, thresholds);

        report.total += 1;
        report.total_stars += fork.stars;
        match class {
            ForkClass::Contributor => report.contributor += 1,
            ForkClass::Variant => {
                report.variant += 1;
                report.variant_stars += fork.stars;
            }
            ForkClass::Noise => report.noise += 1,
        }
        report.forks.push(ForkOutcome {
            name: fork.name.clone(),
            class,
            stars: fork.stars,
            best_base_stars,
        });
    }

    report
}

fn commit_touches_fork(commit: &Commit, fork: &Repository) -> bool {
    let in_fork = commit.repo_owner.eq_ignore_ascii_case(&fork.owner)
        && commit.repo_name.eq_ignore_ascii_case(&fork.name);
    in_fork
        || commit.associated_prs.iter().any(|pr| {
            pr.head
                .as_ref()
                .is_some_and(|head| head.matches(&fork.owner, &fork.name))
        })
}
