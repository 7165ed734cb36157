//! # devsignal-fingerprint
//!
//! Identity fingerprint from commit author email domains.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use devsignal_math::safe_ratio;
use devsignal_types::{Commit, CommitAuthor, DomainStat, EmailClass, IdentityFingerprint};

/// Bucket that every public mail provider collapses into.
pub const PUBLIC_BUCKET: &str = "public-email";

const PUBLIC_DOMAINS: [&str; 9] = [
    "gmail.com",
    "googlemail.com",
    "yahoo.com",
    "outlook.com",
    "hotmail.com",
    "icloud.com",
    "qq.com",
    "proton.me",
    "protonmail.com",
];

/// Build an identity fingerprint from commit authors.
///
/// The domain comes from the upstream `email_domain` when present, else from
/// the address itself. No-reply and placeholder domains are ignored.
pub fn build_identity_fingerprint(commits: &[Commit]) -> IdentityFingerprint {
    let mut counts: BTreeMap<String, (EmailClass, u64)> = BTreeMap::new();
    let mut total = 0u64;

    for commit in commits {
        let Some((bucket, class)) = classify_author(&commit.author) else {
            continue;
        };
        let entry = counts.entry(bucket).or_insert((class, 0));
        if entry.0 == EmailClass::Unknown {
            entry.0 = class;
        }
        entry.1 += 1;
        total += 1;
    }

    let mut domains: Vec<DomainStat> = counts
        .into_iter()
        .map(|(domain, (class, commits))| DomainStat {
            domain,
            class,
            commits,
            pct: safe_ratio(commits, total).unwrap_or(0.0),
        })
        .collect();
    // Stable sort: ties keep domain order from the map.
    domains.sort_by_key(|stat| Reverse(stat.commits));

    IdentityFingerprint { domains }
}

/// Bucket name and class for one author, or `None` when the author should
/// not be counted.
fn classify_author(author: &CommitAuthor) -> Option<(String, EmailClass)> {
    if author.email_class == EmailClass::Noreply {
        return None;
    }
    let domain = author_domain(author)?;
    if is_placeholder(&domain) {
        return None;
    }
    match author.email_class {
        EmailClass::Public => Some((PUBLIC_BUCKET.to_string(), EmailClass::Public)),
        _ if PUBLIC_DOMAINS.contains(&domain.as_str()) => {
            Some((PUBLIC_BUCKET.to_string(), EmailClass::Public))
        }
        class => Some((domain, class)),
    }
}

/// Lowercased mail domain: the upstream field if set, else the part after
/// the single `@` of the address.
fn author_domain(author: &CommitAuthor) -> Option<String> {
    let upstream = author.email_domain.as_deref().map(str::trim).filter(|d| !d.is_empty());
    let raw = match upstream {
        Some(domain) => domain,
        None => {
            let (local, host) = author.email.as_deref()?.trim().split_once('@')?;
            if local.is_empty() || host.contains('@') {
                return None;
            }
            host
        }
    };
    let domain = raw.trim_end_matches('.').to_ascii_lowercase();
    (!domain.is_empty()).then_some(domain)
}

fn is_placeholder(domain: &str) -> bool {
    matches!(domain, "localhost" | "example.com") || domain.contains("noreply")
}
