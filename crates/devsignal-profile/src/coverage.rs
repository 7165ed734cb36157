use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use devsignal_time::{format_utc, parse_opt};
use devsignal_types::{ActivityRecords, Coverage, Evidence, SpanCoverage};

/// Counts and time spans of the records as supplied, before any metric
/// filtering.
pub(crate) fn build_coverage(records: &ActivityRecords) -> Result<Coverage> {
    let repos = &records.repositories;
    let prs = &records.pull_requests;
    let commits = &records.commits;

    Ok(Coverage {
        repositories: span(
            repos.len(),
            repos.iter().map(|r| r.created_at.as_deref()),
            repos.iter().map(|r| r.pushed_at.as_deref()),
        ),
        pull_requests: span(
            prs.len(),
            prs.iter().map(|p| p.created_at.as_deref()),
            prs.iter().map(|p| p.created_at.as_deref()),
        ),
        commits: span(
            commits.len(),
            commits.iter().map(|c| c.authored_at.as_deref()),
            commits.iter().map(|c| c.authored_at.as_deref()),
        ),
        has_contributions: records.contributions.is_some(),
        has_self_intro: records.self_intro.is_some(),
        input_signature: input_signature(records)?,
    })
}

/// BLAKE3 of the canonical JSON encoding of the records.
pub(crate) fn input_signature(records: &ActivityRecords) -> Result<String> {
    let bytes = serde_json::to_vec(records).context("failed to encode activity records")?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

fn span<'a>(
    total: usize,
    starts: impl Iterator<Item = Option<&'a str>>,
    ends: impl Iterator<Item = Option<&'a str>>,
) -> SpanCoverage {
    let earliest: Option<DateTime<Utc>> = starts.filter_map(parse_opt).min();
    let latest: Option<DateTime<Utc>> = ends.filter_map(parse_opt).max();
    SpanCoverage {
        total: total as u64,
        earliest: earliest.map(format_utc),
        latest: latest.map(format_utc),
    }
}

/// First `limit` pull-request URLs and repository URLs, in input order.
pub(crate) fn build_evidence(records: &ActivityRecords, limit: usize) -> Evidence {
    Evidence {
        pull_requests: records
            .pull_requests
            .iter()
            .filter_map(|pr| pr.url.clone())
            .filter(|url| !url.trim().is_empty())
            .take(limit)
            .collect(),
        repositories: records
            .repositories
            .iter()
            .map(|r| r.html_url())
            .take(limit)
            .collect(),
    }
}
