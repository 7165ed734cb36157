//! Deterministic numeric helpers.

#![forbid(unsafe_code)]

use std::cmp::Ordering;

/// Decimal places used for every published ratio.
pub const RATIO_DECIMALS: u32 = 4;

/// Round a floating point value to `decimals` decimal places.
#[must_use]
pub fn round_f64(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Return a 4-decimal ratio, or `None` when the denominator is zero.
///
/// `None` means "not measured"; a zero numerator over a nonzero
/// denominator is a measured `Some(0.0)`.
#[must_use]
pub fn safe_ratio(numer: u64, denom: u64) -> Option<f64> {
    if denom == 0 {
        None
    } else {
        Some(round_f64(numer as f64 / denom as f64, RATIO_DECIMALS))
    }
}

/// Float variant of [`safe_ratio`] for weighted sums.
#[must_use]
pub fn safe_ratio_f64(numer: f64, denom: f64) -> Option<f64> {
    if denom <= 0.0 || !denom.is_finite() || !numer.is_finite() {
        None
    } else {
        Some(round_f64(numer / denom, RATIO_DECIMALS))
    }
}

/// Normalize weighted entries so they sum to 1.0.
///
/// Entries with a non-positive or non-finite weight are dropped. The result
/// is sorted by weight descending, then key ascending. An input with no
/// positive weight yields an empty vector.
#[must_use]
pub fn normalize_weights<I>(entries: I) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = (String, f64)>,
{
    let kept: Vec<(String, f64)> = entries
        .into_iter()
        .filter(|(_, w)| w.is_finite() && *w > 0.0)
        .collect();
    let total: f64 = kept.iter().map(|(_, w)| *w).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut out: Vec<(String, f64)> = kept.into_iter().map(|(k, w)| (k, w / total)).collect();
    out.sort_by(|a, b| desc_then_key(a.1, &a.0, b.1, &b.0));
    out
}

/// Ordering used for ranked outputs: larger value first, ties by key.
#[must_use]
pub fn desc_then_key(a_value: f64, a_key: &str, b_value: f64, b_key: &str) -> Ordering {
    b_value
        .partial_cmp(&a_value)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a_key.cmp(b_key))
}
