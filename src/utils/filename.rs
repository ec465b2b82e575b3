use chrono::NaiveDate;
use tracing::debug;

use crate::error::Result;
use crate::models::{DateRange, FileReference, IntoCalendarDate};
use crate::settings::Settings;
use crate::utils::constants::{FILE_PREFIX, FILE_SUFFIX};

/// Callback invoked for every date an expansion enumerates
pub type DateObserver = Box<dyn Fn(NaiveDate) + Send + Sync>;

/// Maps an inclusive date range onto the daily VPTS files covering it
pub struct DateRangeExpander {
    prefix: String,
    suffix: String,
    observer: Option<DateObserver>,
}

impl DateRangeExpander {
    pub fn new() -> Self {
        Self::with_naming(FILE_PREFIX, FILE_SUFFIX)
    }

    pub fn with_naming(prefix: &str, suffix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            observer: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_naming(&settings.file_prefix, &settings.file_suffix)
    }

    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(NaiveDate) + Send + Sync + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Emit a debug event for each enumerated date
    pub fn with_logging(self) -> Self {
        self.with_observer(|date| debug!("Expanding date {}", date))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// One file reference per day from `start` to `end` inclusive, ascending.
    ///
    /// Fails with `InvalidRange` when `start` is after `end`, and with
    /// `InvalidDate` for dates outside years 0000 to 9999.
    pub fn expand(
        &self,
        start: impl IntoCalendarDate,
        end: impl IntoCalendarDate,
        directory: &str,
    ) -> Result<Vec<FileReference>> {
        let range = DateRange::parse(start, end)?;
        Ok(self.expand_range(&range, directory))
    }

    pub fn expand_range(&self, range: &DateRange, directory: &str) -> Vec<FileReference> {
        let mut references = Vec::with_capacity(range.num_days());

        for date in range.days() {
            if let Some(ref observer) = self.observer {
                observer(date);
            }
            references.push(FileReference::new(
                directory,
                &self.prefix,
                date,
                &self.suffix,
            ));
        }

        references
    }
}

impl Default for DateRangeExpander {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand with the default naming convention and no observer
///
/// # Examples
/// ```
/// use vpts_processor::utils::expand;
///
/// let files = expand("2016-09-01", "2016-09-02", "data/").unwrap();
/// assert_eq!(files[1].as_str(), "data/example_vpts_20160902.csv");
/// ```
pub fn expand(
    start: impl IntoCalendarDate,
    end: impl IntoCalendarDate,
    directory: &str,
) -> Result<Vec<FileReference>> {
    DateRangeExpander::new().expand(start, end, directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_expand_three_days() {
        let references = expand("2016-09-01", "2016-09-03", "../public/data/").unwrap();
        let paths: Vec<_> = references.iter().map(|r| r.as_str()).collect();

        assert_eq!(
            paths,
            vec![
                "../public/data/example_vpts_20160901.csv",
                "../public/data/example_vpts_20160902.csv",
                "../public/data/example_vpts_20160903.csv",
            ]
        );
    }

    #[test]
    fn test_expand_single_day() {
        let references = expand("2016-09-01", "2016-09-01", "./").unwrap();
        assert_eq!(references.len(), 1);
        assert_eq!(references[0].as_str(), "./example_vpts_20160901.csv");
    }

    #[test]
    fn test_expand_reversed_range_fails() {
        let result = expand("2016-09-03", "2016-09-01", "./");
        assert!(matches!(result, Err(ProcessingError::InvalidRange { .. })));
    }

    #[test]
    fn test_expand_invalid_date_fails() {
        let result = expand("not a date", "2016-09-01", "./");
        assert!(matches!(result, Err(ProcessingError::InvalidDate(_))));
    }

    #[test]
    fn test_expand_across_year_boundary() {
        let references = expand("2016-12-30", "2017-01-02", "").unwrap();
        let paths: Vec<_> = references.iter().map(|r| r.as_str()).collect();

        assert_eq!(
            paths,
            vec![
                "example_vpts_20161230.csv",
                "example_vpts_20161231.csv",
                "example_vpts_20170101.csv",
                "example_vpts_20170102.csv",
            ]
        );
    }

    #[test]
    fn test_custom_naming() {
        let expander = DateRangeExpander::with_naming("bejab_vpts_", ".txt");
        let references = expander.expand("2016-09-01", "2016-09-02", "data/").unwrap();

        assert_eq!(references[0].as_str(), "data/bejab_vpts_20160901.txt");
        assert_eq!(references[1].as_str(), "data/bejab_vpts_20160902.txt");
    }

    #[test]
    fn test_observer_sees_every_date() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let expander = DateRangeExpander::new().with_observer(move |date| {
            sink.lock().unwrap().push(date);
        });
        let references = expander.expand("2016-09-01", "2016-09-05", "./").unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 5);
        assert_eq!(
            *seen,
            references.iter().map(|r| r.date()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_observer_not_called_on_invalid_range() {
        let calls = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&calls);

        let expander = DateRangeExpander::new().with_observer(move |_| {
            *sink.lock().unwrap() += 1;
        });

        assert!(expander.expand("2016-09-05", "2016-09-01", "./").is_err());
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_round_trip_date_stamp() {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        for offset in [0i64, 59, 365, 1000, 5000, 9000] {
            let date = start + chrono::Duration::days(offset);
            let references = expand(date, date, "/data/").unwrap();
            let parsed =
                FileReference::parse_date_stamp(references[0].as_str(), FILE_PREFIX).unwrap();
            assert_eq!(parsed, date);
        }
    }

    #[test]
    fn test_round_trip_at_year_bounds() {
        for date in [
            NaiveDate::from_ymd_opt(0, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(9999, 12, 31).unwrap(),
        ] {
            let references = expand(date, date, "").unwrap();
            assert_eq!(references[0].as_str().len(), "example_vpts_YYYYMMDD.csv".len());
            let parsed =
                FileReference::parse_date_stamp(references[0].as_str(), FILE_PREFIX).unwrap();
            assert_eq!(parsed, date);
        }

        let beyond = NaiveDate::from_ymd_opt(10000, 1, 1).unwrap();
        assert!(matches!(
            expand(beyond, beyond, ""),
            Err(ProcessingError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_length_and_ordering() {
        let start = NaiveDate::from_ymd_opt(2015, 11, 20).unwrap();
        let end = NaiveDate::from_ymd_opt(2016, 3, 5).unwrap();
        let references = expand(start, end, "").unwrap();

        assert_eq!(references.len() as i64, (end - start).num_days() + 1);
        assert!(references.windows(2).all(|w| w[0].date() < w[1].date()));
        assert!(references.windows(2).all(|w| w[0].as_str() < w[1].as_str()));
    }
}
