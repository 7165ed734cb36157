//! # devsignal-weights
//!
//! Language and topic weight vectors and the single-language focus ratio.
//!
//! Each repository contributes `ln(1 + stars)` (never less than 1.0), split
//! across its languages by byte share. Topics receive the full repository
//! weight each.

use std::collections::{BTreeMap, BTreeSet};

use devsignal_math::{desc_then_key, normalize_weights};
use devsignal_types::{FocusReport, Ratio, Repository, WeightEntry};

/// Floor applied to the star weight so unstarred repositories still count.
pub const MIN_REPO_WEIGHT: f64 = 1.0;

/// Relevance weight of a repository.
pub fn repo_weight(stars: u64) -> f64 {
    (stars as f64).ln_1p().max(MIN_REPO_WEIGHT)
}

/// Star-weighted language shares, normalized to 1.0 and sorted descending.
pub fn build_language_weights(repos: &[Repository]) -> Vec<WeightEntry> {
    let mut acc: BTreeMap<String, f64> = BTreeMap::new();

    for repo in repos {
        let weight = repo_weight(repo.stars);
        let byte_total: u64 = repo.languages.values().sum();
        if byte_total > 0 {
            for (lang, bytes) in &repo.languages {
                if *bytes == 0 {
                    continue;
                }
                let share = *bytes as f64 / byte_total as f64;
                *acc.entry(lang.clone()).or_insert(0.0) += weight * share;
            }
        } else if let Some(lang) = primary_language(repo) {
            *acc.entry(lang).or_insert(0.0) += weight;
        }
    }

    into_entries(acc)
}

/// Star-weighted topic shares. Every declared topic gets the full weight.
pub fn build_topic_weights(repos: &[Repository]) -> Vec<WeightEntry> {
    let mut acc: BTreeMap<String, f64> = BTreeMap::new();

    for repo in repos {
        let topics: BTreeSet<String> = repo
            .topics
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        if topics.is_empty() {
            continue;
        }
        let weight = repo_weight(repo.stars);
        for topic in topics {
            *acc.entry(topic).or_insert(0.0) += weight;
        }
    }

    into_entries(acc)
}

/// Share of all bytes held by the single largest language.
pub fn build_focus_report(repos: &[Repository]) -> FocusReport {
    let mut bytes_by_lang: BTreeMap<&str, u64> = BTreeMap::new();
    for repo in repos {
        for (lang, bytes) in &repo.languages {
            *bytes_by_lang.entry(lang.as_str()).or_insert(0) += *bytes;
        }
    }

    let total: u64 = bytes_by_lang.values().sum();
    if total == 0 {
        return FocusReport::default();
    }

    let mut ranked: Vec<(&str, u64)> = bytes_by_lang.into_iter().collect();
    ranked.sort_by(|a, b| desc_then_key(a.1 as f64, a.0, b.1 as f64, b.0));
    let (lang, max_bytes) = ranked[0];

    FocusReport {
        language: Some(lang.to_string()),
        ratio: Ratio::from_counts(max_bytes, total),
    }
}

fn primary_language(repo: &Repository) -> Option<String> {
    repo.primary_language
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}

fn into_entries(acc: BTreeMap<String, f64>) -> Vec<WeightEntry> {
    normalize_weights(acc)
        .into_iter()
        .map(|(name, weight)| WeightEntry { name, weight })
        .collect()
}
