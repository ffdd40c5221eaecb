//! Timestamps and due dates
//!
//! Timestamps are local date-times without offset, written as ISO-8601
//! (`2024-05-01T12:30:00.123456`). Reads are tolerant: RFC 3339 values and
//! bare dates are accepted, and anything missing or unparseable becomes "now".

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Timelike};

use crate::error::ModelError;

/// Entity timestamp
pub type Timestamp = NaiveDateTime;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current local time, truncated to microseconds
#[must_use]
pub fn now() -> Timestamp {
    let now = Local::now().naive_local();
    let micros = now.nanosecond() / 1_000 * 1_000;
    now.with_nanosecond(micros).unwrap_or(now)
}

/// Current local date
#[inline]
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format timestamp as ISO-8601
#[inline]
#[must_use]
pub fn format_timestamp(ts: &Timestamp) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse ISO-8601 timestamp, accepting offsets and bare dates
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Local).naive_local())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parse due date from user input
///
/// Accepts `YYYY-MM-DD` or a full timestamp (its date part is kept).
///
/// # Errors
/// Returns `ModelError::InvalidDate` if the text is neither
pub fn parse_due_date(raw: &str) -> Result<NaiveDate, ModelError> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .or_else(|| parse_timestamp(trimmed).map(|ts| ts.date()))
        .ok_or_else(|| ModelError::InvalidDate(raw.to_string()))
}

/// Tolerant serde adapter for required timestamps
pub(crate) mod lenient_timestamp {
    use super::{format_timestamp, now, parse_timestamp, Timestamp};
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S: Serializer>(ts: &Timestamp, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format_timestamp(ts))
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Timestamp, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(match raw.as_deref() {
            Some(text) => parse_timestamp(text).unwrap_or_else(|| {
                tracing::warn!(value = text, "unparseable timestamp, using current time");
                now()
            }),
            None => now(),
        })
    }
}

/// Tolerant serde adapter for optional due dates
pub(crate) mod lenient_date {
    use super::{parse_due_date, DATE_FORMAT};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.serialize_str(&d.format(DATE_FORMAT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?;
        Ok(raw
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .and_then(|text| match parse_due_date(text) {
                Ok(date) => Some(date),
                Err(_) => {
                    tracing::warn!(value = text, "unparseable due date dropped");
                    None
                }
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_has_microsecond_precision() {
        assert_eq!(now().nanosecond() % 1_000, 0);
    }

    #[test]
    fn timestamp_format_round_trips() {
        let ts = now();
        assert_eq!(parse_timestamp(&format_timestamp(&ts)), Some(ts));
    }

    #[test]
    fn parses_naive_iso_timestamps() {
        let ts = parse_timestamp("2024-05-01T12:30:00.123456").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(ts.hour(), 12);

        assert!(parse_timestamp("2024-05-01T12:30:00").is_some());
        assert!(parse_timestamp("2024-05-01 12:30:00").is_some());
    }

    #[test]
    fn parses_offsets_and_bare_dates() {
        assert!(parse_timestamp("2024-05-01T12:30:00+02:00").is_some());
        let midnight = parse_timestamp("2024-05-01").unwrap();
        assert_eq!(midnight.hour(), 0);
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn due_date_accepts_date_or_timestamp() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(parse_due_date("2025-01-31").unwrap(), expected);
        assert_eq!(parse_due_date(" 2025-01-31T08:00:00 ").unwrap(), expected);
        assert!(matches!(
            parse_due_date("31/01/2025"),
            Err(ModelError::InvalidDate(_))
        ));
    }
}
