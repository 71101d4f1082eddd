//! Date parsing against ordered format lists.

use chrono::{NaiveDate, NaiveDateTime};

/// Formats accepted for record dates, tried in order.
pub const RECORD_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y-%m-%d %H:%M:%S"];

/// Formats accepted by the default fill, tried in order.
pub const FILL_DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

/// Parses a trimmed value with the first matching format.
///
/// Date-only formats yield midnight.
///
/// ```
/// use etl_common::{RECORD_DATE_FORMATS, parse_datetime};
///
/// let parsed = parse_datetime("15/01/2024", &RECORD_DATE_FORMATS).unwrap();
/// assert_eq!(parsed.to_string(), "2024-01-15 00:00:00");
/// assert!(parse_datetime("2024/01/15", &RECORD_DATE_FORMATS).is_none());
/// ```
pub fn parse_datetime(value: &str, formats: &[&str]) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    formats.iter().find_map(|format| {
        if format.contains("%H") {
            NaiveDateTime::parse_from_str(trimmed, format).ok()
        } else {
            NaiveDate::parse_from_str(trimmed, format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_format_wins() {
        let parsed = parse_datetime("2024-03-05", &RECORD_DATE_FORMATS).unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn test_datetime_format() {
        let parsed = parse_datetime(" 2024-03-05 10:15:00 ", &RECORD_DATE_FORMATS).unwrap();
        assert_eq!(parsed.format("%H:%M").to_string(), "10:15");
    }

    #[test]
    fn test_fill_formats_are_wider() {
        assert!(parse_datetime("2024/03/05", &RECORD_DATE_FORMATS).is_none());
        assert!(parse_datetime("2024/03/05", &FILL_DATE_FORMATS).is_some());
        assert!(parse_datetime("05-03-2024", &FILL_DATE_FORMATS).is_some());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_datetime("", &FILL_DATE_FORMATS).is_none());
        assert!(parse_datetime("mañana", &FILL_DATE_FORMATS).is_none());
        assert!(parse_datetime("2024-13-40", &FILL_DATE_FORMATS).is_none());
    }
}
