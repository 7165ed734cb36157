//! # devsignal-time
//!
//! Timestamp parsing and timezone resolution shared by the temporal metrics,
//! the outcome classifiers and the coverage builder.
//!
//! Upstream timestamps arrive as strings. Anything that does not parse is
//! reported as `None` so callers can drop it from their sample.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use devsignal_types::{TimezoneInfo, TimezoneSource};

const MAX_OFFSET_MINUTES: i32 = 14 * 60;

const UTC_ALIASES: [&str; 5] = ["utc", "z", "gmt", "etc/utc", "etc/gmt"];

/// Parse an upstream timestamp into UTC.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC) and a bare
/// `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Parse an optional timestamp field.
pub fn parse_opt(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(parse_timestamp)
}

/// Format a UTC instant as RFC 3339 with a `Z` suffix and second precision.
pub fn format_utc(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Local hour (0..24) of a UTC instant shifted by `offset_minutes`.
pub fn local_hour(ts: DateTime<Utc>, offset_minutes: i32) -> u32 {
    let shifted = ts + chrono::Duration::minutes(i64::from(offset_minutes));
    shifted.hour()
}

/// Parse a `+HH:MM`, `-HH:MM`, `+HHMM` or `+HH` offset into minutes.
pub fn parse_fixed_offset(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    if hours.is_empty()
        || hours.len() > 2
        || !hours.bytes().all(|b| b.is_ascii_digit())
        || !minutes.bytes().all(|b| b.is_ascii_digit())
        || minutes.is_empty()
        || minutes.len() > 2
    {
        return None;
    }

    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    let total = hours * 60 + minutes;
    if total > MAX_OFFSET_MINUTES {
        return None;
    }
    Some(sign * total)
}

/// Resolve a timezone override into a fixed offset valid at `at`.
///
/// Named zones are looked up in the IANA database, so daylight saving is
/// honoured for the reference instant. Unrecognized input falls back to UTC
/// and is reported as [`TimezoneSource::Fallback`].
pub fn resolve_timezone(requested: Option<&str>, at: DateTime<Utc>) -> TimezoneInfo {
    let trimmed = requested.map(str::trim).filter(|s| !s.is_empty());
    let Some(name) = trimmed else {
        return TimezoneInfo {
            requested: requested.map(str::to_string),
            offset_minutes: 0,
            source: TimezoneSource::Default,
        };
    };

    let (offset_minutes, source) = if UTC_ALIASES.contains(&name.to_ascii_lowercase().as_str()) {
        (0, TimezoneSource::NamedZone)
    } else if let Some(minutes) = parse_fixed_offset(name) {
        (minutes, TimezoneSource::FixedOffset)
    } else if let Ok(tz) = name.parse::<Tz>() {
        (zone_offset_minutes(tz, at), TimezoneSource::NamedZone)
    } else {
        (0, TimezoneSource::Fallback)
    };

    TimezoneInfo {
        requested: Some(name.to_string()),
        offset_minutes,
        source,
    }
}

fn zone_offset_minutes(tz: Tz, at: DateTime<Utc>) -> i32 {
    tz.offset_from_utc_datetime(&at.naive_utc())
        .fix()
        .local_minus_utc()
        / 60
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(raw: &str) -> DateTime<Utc> {
        parse_timestamp(raw).unwrap()
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let ts = at("2024-03-01T10:15:00+02:00");
        assert_eq!(format_utc(ts), "2024-03-01T08:15:00Z");
    }

    #[test]
    fn parses_naive_and_date_forms() {
        assert_eq!(format_utc(at("2024-03-01T10:15:00")), "2024-03-01T10:15:00Z");
        assert_eq!(format_utc(at("2024-03-01 10:15:00")), "2024-03-01T10:15:00Z");
        assert_eq!(format_utc(at("2024-03-01")), "2024-03-01T00:00:00Z");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-45").is_none());
        assert!(parse_opt(None).is_none());
    }

    #[test]
    fn local_hour_wraps_across_midnight() {
        let ts = at("2024-01-01T23:30:00Z");
        assert_eq!(local_hour(ts, 0), 23);
        assert_eq!(local_hour(ts, 60), 0);
        assert_eq!(local_hour(ts, -24 * 60 + 30), 0);
    }

    #[test]
    fn fixed_offsets() {
        assert_eq!(parse_fixed_offset("+09:30"), Some(570));
        assert_eq!(parse_fixed_offset("-05:00"), Some(-300));
        assert_eq!(parse_fixed_offset("+0530"), Some(330));
        assert_eq!(parse_fixed_offset("+08"), Some(480));
        assert_eq!(parse_fixed_offset("+15:00"), None);
        assert_eq!(parse_fixed_offset("+09:75"), None);
        assert_eq!(parse_fixed_offset("09:00"), None);
        assert_eq!(parse_fixed_offset("+ab:cd"), None);
    }

    #[test]
    fn named_zone_without_dst() {
        let tz = resolve_timezone(Some("Asia/Shanghai"), at("2024-07-01T00:00:00Z"));
        assert_eq!(tz.offset_minutes, 480);
        assert_eq!(tz.source, TimezoneSource::NamedZone);
    }

    #[test]
    fn named_zone_honours_dst_at_reference_instant() {
        let winter = resolve_timezone(Some("America/New_York"), at("2024-01-15T12:00:00Z"));
        let summer = resolve_timezone(Some("America/New_York"), at("2024-07-15T12:00:00Z"));
        assert_eq!(winter.offset_minutes, -300);
        assert_eq!(summer.offset_minutes, -240);
    }

    #[test]
    fn no_override_is_utc_default() {
        let tz = resolve_timezone(None, at("2024-01-01T00:00:00Z"));
        assert_eq!(tz.offset_minutes, 0);
        assert_eq!(tz.source, TimezoneSource::Default);

        let blank = resolve_timezone(Some("  "), at("2024-01-01T00:00:00Z"));
        assert_eq!(blank.source, TimezoneSource::Default);
    }

    #[test]
    fn unknown_zone_falls_back_to_utc() {
        let tz = resolve_timezone(Some("Mars/Olympus_Mons"), at("2024-01-01T00:00:00Z"));
        assert_eq!(tz.offset_minutes, 0);
        assert_eq!(tz.source, TimezoneSource::Fallback);
        assert_eq!(tz.requested.as_deref(), Some("Mars/Olympus_Mons"));
    }

    #[test]
    fn utc_aliases_are_named() {
        for alias in ["UTC", "z", "GMT"] {
            let tz = resolve_timezone(Some(alias), at("2024-01-01T00:00:00Z"));
            assert_eq!(tz.offset_minutes, 0);
            assert_eq!(tz.source, TimezoneSource::NamedZone);
        }
    }
}
