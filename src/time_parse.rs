// ABOUTME: RFC-822 pubDate normalization into the timestamp/calendar-date pair.
// ABOUTME: The two parses are independent and may disagree on failure.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Normalizes a raw pubDate string into its two derived representations:
/// epoch seconds with the timezone offset applied, and the calendar day with
/// the timezone ignored.
///
/// The parses are independent: one can succeed while the other fails, and
/// neither failure is an error. An absent input yields two absent outputs.
pub fn normalize_pub_date(raw: Option<&str>) -> (Option<i64>, Option<NaiveDate>) {
    match raw {
        None => (None, None),
        Some(s) => (parse_timestamp(s), parse_calendar_date(s)),
    }
}

/// Parses an RFC-822/2822 date-with-timezone into epoch seconds.
/// Returns None if no supported form matches.
pub fn parse_timestamp(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Zone abbreviations outside RFC 2822 (CEST, JST, AEST, ...) first:
    // chrono reads unknown zone names as a zero offset.
    if let Some(ts) = parse_with_named_timezone(s) {
        return Some(ts);
    }

    // The common case, including the obsolete US zone names.
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.timestamp());
    }

    // Numeric offsets in shapes rfc2822 missed.
    let formats_with_tz = [
        "%a, %d %b %Y %H:%M:%S %z",
        "%a, %d %b %Y %H:%M %z",
        "%d %b %Y %H:%M:%S %z",
        "%d %b %Y %H:%M %z",
    ];
    for fmt in &formats_with_tz {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.timestamp());
        }
    }

    // No timezone at all: assume UTC.
    let formats_naive = ["%a, %d %b %Y %H:%M:%S", "%d %b %Y %H:%M:%S"];
    for fmt in &formats_naive {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive).timestamp());
        }
    }

    None
}

/// Parses the day/month/year portion of an RFC-822-style date, ignoring any
/// timezone. A time of day must be present; trailing zone text is ignored.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let formats = ["%a, %d %b %Y %H:%M", "%d %b %Y %H:%M"];
    for fmt in &formats {
        if let Ok((dt, _rest)) = NaiveDateTime::parse_and_remainder(s, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Parses datetime strings ending in a named timezone abbreviation that
/// chrono's RFC-2822 parser does not accept.
fn parse_with_named_timezone(s: &str) -> Option<i64> {
    let tz_offsets: &[(&str, i32)] = &[
        ("UTC", 0),
        // European
        ("WET", 0),
        ("WEST", 3600),
        ("CET", 3600),
        ("CEST", 2 * 3600),
        ("EET", 2 * 3600),
        ("EEST", 3 * 3600),
        ("BST", 3600),
        // Asia/Pacific
        ("JST", 9 * 3600),
        ("KST", 9 * 3600),
        ("AEST", 10 * 3600),
        ("AEDT", 11 * 3600),
        ("AWST", 8 * 3600),
        ("NZST", 12 * 3600),
        ("NZDT", 13 * 3600),
    ];

    for (tz_name, offset_secs) in tz_offsets {
        if !s.ends_with(tz_name) {
            continue;
        }
        let base = s[..s.len() - tz_name.len()].trim_end();
        let formats = [
            "%a, %d %b %Y %H:%M:%S",
            "%a, %d %b %Y %H:%M",
            "%d %b %Y %H:%M:%S",
            "%d %b %Y %H:%M",
        ];
        for fmt in &formats {
            if let Ok(naive) = NaiveDateTime::parse_from_str(base, fmt) {
                let offset = FixedOffset::east_opt(*offset_secs)?;
                let dt = offset.from_local_datetime(&naive).single()?;
                return Some(dt.timestamp());
            }
        }
    }

    None
}
