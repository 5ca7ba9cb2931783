//! Time and input helpers shared by the publisher and booker.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::errors::ValidationError;

pub const DEFAULT_DURATION_MINUTES: u32 = 60;
pub const MIN_DURATION_MINUTES: u32 = 15;
pub const DURATION_STEP_MINUTES: u32 = 15;
pub const PICKER_INTERVAL_MINUTES: i64 = 15;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a timestamp as sent by the server or typed by a user.
///
/// RFC 3339 values keep their offset; naive values are taken as UTC.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = input.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ValidationError::InvalidTimestamp(input.to_string()))
}

/// `2024-01-01T10:00:00.000Z`
pub fn to_canonical_iso(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn is_selectable(candidate: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    candidate > now
}

/// Start times offered by the picker for one day, on a 15-minute grid,
/// with anything not strictly after `now` left out.
pub fn picker_times(date: NaiveDate, now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let Some(midnight) = date.and_hms_opt(0, 0, 0) else {
        return Vec::new();
    };
    let start = midnight.and_utc();
    let steps = 24 * 60 / PICKER_INTERVAL_MINUTES;

    (0..steps)
        .map(|i| start + Duration::minutes(i * PICKER_INTERVAL_MINUTES))
        .filter(|t| is_selectable(*t, now))
        .collect()
}

/// Clamp to the minimum and snap down onto the 15-minute step.
pub fn normalize_duration(minutes: u32) -> u32 {
    let clamped = minutes.max(MIN_DURATION_MINUTES);
    clamped - clamped % DURATION_STEP_MINUTES
}

/// Basic `local@domain.tld` shape check.
pub fn is_plausible_email(input: &str) -> bool {
    let email = input.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
