use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{ProcessingError, Result};
use crate::models::{Measurement, ProfileRow, RawProfileRow};

/// Naive timestamp layouts, read as UTC
const NAIVE_TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a VPTS timestamp into a UTC instant.
///
/// Strings with an offset (`Z`, `+02:00`) are converted to UTC; strings
/// without one are taken to be UTC already, never local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
}

/// Turns raw VPTS rows into typed [`ProfileRow`]s.
///
/// The default parser is permissive: a missing or unparseable field becomes
/// a sentinel (`None` timestamp, [`Measurement::Invalid`]) and the rest of the
/// row is kept. A strict parser rejects rows with absent columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileRowParser {
    strict: bool,
}

impl ProfileRowParser {
    pub fn new() -> Self {
        Self { strict: false }
    }

    pub fn with_strict(strict: bool) -> Self {
        Self { strict }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Coerce every field; never fails
    pub fn parse(&self, row: &RawProfileRow) -> ProfileRow {
        ProfileRow {
            timestamp: row.datetime.as_deref().and_then(parse_timestamp),
            height: Measurement::parse(row.height.as_deref()),
            direction: Measurement::parse(row.dd.as_deref()),
            speed: Measurement::parse(row.ff.as_deref()),
            density: Measurement::parse(row.dens.as_deref()),
            standard_deviation: row.sd_vvp.clone(),
        }
    }

    /// Like [`parse`](Self::parse) but fails with `MalformedRow` if any column is absent
    pub fn parse_strict(&self, row: &RawProfileRow) -> Result<ProfileRow> {
        let missing = row.missing_columns();
        if !missing.is_empty() {
            return Err(ProcessingError::MalformedRow { missing });
        }

        Ok(self.parse(row))
    }

    /// Parse according to the configured mode
    pub fn parse_row(&self, row: &RawProfileRow) -> Result<ProfileRow> {
        if self.strict {
            self.parse_strict(row)
        } else {
            Ok(self.parse(row))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw_row(height: &str, sd_vvp: &str) -> RawProfileRow {
        RawProfileRow {
            datetime: Some("2016-09-01T00:05:00Z".to_string()),
            height: Some(height.to_string()),
            dd: Some("45.0".to_string()),
            ff: Some("3.2".to_string()),
            dens: Some("12.5".to_string()),
            sd_vvp: Some(sd_vvp.to_string()),
        }
    }

    #[test]
    fn test_parse_complete_row() {
        let row = ProfileRowParser::new().parse(&raw_row("200", "1.1"));
        let expected = Utc.with_ymd_and_hms(2016, 9, 1, 0, 5, 0).unwrap();

        assert_eq!(row.timestamp, Some(expected));
        assert_eq!(row.timestamp_millis(), Some(1_472_688_300_000));
        assert_eq!(row.height, Measurement::Value(200.0));
        assert_eq!(row.direction, Measurement::Value(45.0));
        assert_eq!(row.speed, Measurement::Value(3.2));
        assert_eq!(row.density, Measurement::Value(12.5));
        assert_eq!(row.standard_deviation.as_deref(), Some("1.1"));
        assert!(row.is_complete());
    }

    #[test]
    fn test_bad_field_only_invalidates_that_field() {
        let row = ProfileRowParser::new().parse(&raw_row("N/A", "NaN"));

        assert_eq!(row.height, Measurement::Invalid);
        assert_eq!(row.direction, Measurement::Value(45.0));
        assert_eq!(row.speed, Measurement::Value(3.2));
        assert_eq!(row.density, Measurement::Value(12.5));
        assert_eq!(row.standard_deviation.as_deref(), Some("NaN"));
        assert_eq!(row.standard_deviation_value(), Measurement::Invalid);
        assert_eq!(row.invalid_field_count(), 1);
    }

    #[test]
    fn test_missing_columns_are_sentinels() {
        let raw = RawProfileRow {
            datetime: Some("2016-09-01T00:05:00Z".to_string()),
            height: Some("400".to_string()),
            ..Default::default()
        };
        let row = ProfileRowParser::new().parse(&raw);

        assert_eq!(row.height, Measurement::Value(400.0));
        assert_eq!(row.direction, Measurement::Invalid);
        assert_eq!(row.speed, Measurement::Invalid);
        assert_eq!(row.density, Measurement::Invalid);
        assert_eq!(row.standard_deviation, None);
        assert!(!row.is_complete());
    }

    #[test]
    fn test_strict_rejects_missing_columns() {
        let raw = RawProfileRow {
            datetime: Some("2016-09-01T00:05:00Z".to_string()),
            height: Some("400".to_string()),
            ..Default::default()
        };

        match ProfileRowParser::with_strict(true).parse_row(&raw) {
            Err(ProcessingError::MalformedRow { missing }) => {
                assert_eq!(missing, vec!["dd", "ff", "dens", "sd_vvp"]);
            }
            other => panic!("expected MalformedRow, got {:?}", other),
        }

        assert!(ProfileRowParser::new().parse_row(&raw).is_ok());
    }

    #[test]
    fn test_strict_accepts_unparseable_values() {
        let row = ProfileRowParser::with_strict(true)
            .parse_row(&raw_row("N/A", "NaN"))
            .unwrap();
        assert_eq!(row.height, Measurement::Invalid);
    }

    #[test]
    fn test_parse_timestamp_is_utc() {
        let expected = Utc.with_ymd_and_hms(2016, 9, 1, 0, 5, 0).unwrap();

        assert_eq!(parse_timestamp("2016-09-01T00:05:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2016-09-01T00:05:00"), Some(expected));
        assert_eq!(parse_timestamp("2016-09-01 00:05:00"), Some(expected));
        assert_eq!(parse_timestamp("2016-09-01T00:05"), Some(expected));
        assert_eq!(parse_timestamp("2016-09-01T02:05:00+02:00"), Some(expected));
    }

    #[test]
    fn test_parse_timestamp_date_only_is_midnight_utc() {
        let expected = Utc.with_ymd_and_hms(2016, 9, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2016-09-01"), Some(expected));
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp("soon"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2016-13-01T00:00:00Z"), None);
    }
}
