//! Local wall-clock date parsing and formatting.
//!
//! # Responsibility
//! - Turn user date text into epoch milliseconds (local timezone).
//! - Format epoch milliseconds for display.
//!
//! # Invariants
//! - Keyword dates (`today`, `tomorrow`, `next week`) resolve to local
//!   midnight of the target day.
//! - Parsing never panics; failures surface as `ValidationError::InvalidDate`.

use crate::model::ValidationError;
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Parses user date input relative to `now`.
///
/// Accepts `today`, `tomorrow`, `next week`, ISO dates, ISO date-times
/// (space or `T` separated), RFC 3339 and `MM/DD/YYYY`.
pub fn parse_date_input(input: &str, now: DateTime<Local>) -> Result<i64, ValidationError> {
    let trimmed = input.trim();
    let invalid = || ValidationError::InvalidDate(trimmed.to_string());
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let today = now.date_naive();
    match trimmed.to_ascii_lowercase().as_str() {
        "today" => return local_midnight_ms(today).ok_or_else(invalid),
        "tomorrow" => return local_midnight_ms(today + Duration::days(1)).ok_or_else(invalid),
        "next week" => return local_midnight_ms(today + Duration::weeks(1)).ok_or_else(invalid),
        _ => {}
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.timestamp_millis());
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return local_naive_ms(naive).ok_or_else(invalid);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return local_midnight_ms(date).ok_or_else(invalid);
        }
    }

    Err(invalid())
}

/// Parses with the current local time as reference.
pub fn parse_date(input: &str) -> Result<i64, ValidationError> {
    parse_date_input(input, Local::now())
}

/// Converts epoch milliseconds to a local calendar date.
pub fn local_date(epoch_ms: i64) -> Option<NaiveDate> {
    to_local(epoch_ms).map(|value| value.date_naive())
}

/// `YYYY-MM-DD` in local time; empty for out-of-range values.
pub fn format_date(epoch_ms: i64) -> String {
    format_with(epoch_ms, "%Y-%m-%d")
}

/// `YYYY-MM-DD HH:MM` in local time.
pub fn format_datetime(epoch_ms: i64) -> String {
    format_with(epoch_ms, "%Y-%m-%d %H:%M")
}

/// `MM/DD` in local time, used by compact tables.
pub fn format_month_day(epoch_ms: i64) -> String {
    format_with(epoch_ms, "%m/%d")
}

fn format_with(epoch_ms: i64, pattern: &str) -> String {
    to_local(epoch_ms)
        .map(|value| value.format(pattern).to_string())
        .unwrap_or_default()
}

fn to_local(epoch_ms: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(epoch_ms).single()
}

fn local_midnight_ms(date: NaiveDate) -> Option<i64> {
    local_naive_ms(date.and_time(NaiveTime::MIN))
}

fn local_naive_ms(naive: NaiveDateTime) -> Option<i64> {
    // DST gaps have no local representation; folds take the earlier instant.
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|value| value.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::{format_date, local_date, parse_date_input};
    use chrono::{Local, NaiveDate, TimeZone};

    fn reference_now() -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 10, 15, 30, 0).earliest().unwrap()
    }

    #[test]
    fn keywords_resolve_to_local_midnight() {
        let tomorrow = parse_date_input("Tomorrow", reference_now()).unwrap();
        assert_eq!(
            local_date(tomorrow),
            Some(NaiveDate::from_ymd_opt(2026, 3, 11).unwrap())
        );
        let next_week = parse_date_input("next week", reference_now()).unwrap();
        assert_eq!(format_date(next_week), "2026-03-17");
    }

    #[test]
    fn iso_forms_are_accepted() {
        let date_only = parse_date_input("2026-05-01", reference_now()).unwrap();
        assert_eq!(format_date(date_only), "2026-05-01");

        let with_time = parse_date_input("2026-05-01 09:15", reference_now()).unwrap();
        assert!(with_time > date_only);

        let us_style = parse_date_input("05/01/2026", reference_now()).unwrap();
        assert_eq!(us_style, date_only);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_date_input("someday", reference_now()).is_err());
        assert!(parse_date_input("   ", reference_now()).is_err());
        assert!(parse_date_input("2026-13-45", reference_now()).is_err());
    }
}
