//! Creation-date parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parses a creation date into UTC.
///
/// Timestamps carrying an offset are converted; timestamps without one are
/// read as UTC. Returns `None` for anything unrecognised.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(naive.and_utc());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// ISO-8601 UTC with milliseconds, e.g. `2021-01-02T10:00:00.000Z`.
pub fn to_iso_millis(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_naive_iso_is_utc() {
        let ts = parse_timestamp("2021-01-02T10:00:00").unwrap();
        assert_eq!(to_iso_millis(&ts), "2021-01-02T10:00:00.000Z");
    }

    #[test]
    fn test_offset_converted_to_utc() {
        let ts = parse_timestamp("2021-01-02T10:00:00-05:00").unwrap();
        assert_eq!(ts.hour(), 15);
    }

    #[test]
    fn test_fractional_seconds() {
        let ts = parse_timestamp("2021-03-04 05:06:07.25").unwrap();
        assert_eq!(to_iso_millis(&ts), "2021-03-04T05:06:07.250Z");
    }

    #[test]
    fn test_us_formats() {
        let ts = parse_timestamp("01/02/2021 10:15:00 PM").unwrap();
        assert_eq!((ts.month(), ts.day(), ts.hour(), ts.minute()), (1, 2, 22, 15));

        let ts = parse_timestamp("12/31/2020 23:59").unwrap();
        assert_eq!((ts.year(), ts.hour()), (2020, 23));

        let ts = parse_timestamp("07/04/2021").unwrap();
        assert_eq!(to_iso_millis(&ts), "2021-07-04T00:00:00.000Z");
    }

    #[test]
    fn test_date_only() {
        let ts = parse_timestamp(" 2021-01-02 ").unwrap();
        assert_eq!(ts.hour(), 0);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("not a date").is_none());
        assert!(parse_timestamp("2021-13-40").is_none());
    }
}
