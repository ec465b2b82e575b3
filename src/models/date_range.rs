use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::error::{ProcessingError, Result};

/// Date formats accepted for textual date inputs, tried in order
const DATE_INPUT_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

/// Anything that can be turned into a calendar date (UTC, time of day dropped)
pub trait IntoCalendarDate {
    fn into_calendar_date(self) -> Result<NaiveDate>;
}

impl IntoCalendarDate for NaiveDate {
    fn into_calendar_date(self) -> Result<NaiveDate> {
        Ok(self)
    }
}

impl IntoCalendarDate for DateTime<Utc> {
    fn into_calendar_date(self) -> Result<NaiveDate> {
        Ok(self.date_naive())
    }
}

impl IntoCalendarDate for &str {
    fn into_calendar_date(self) -> Result<NaiveDate> {
        parse_calendar_date(self)
    }
}

impl IntoCalendarDate for &String {
    fn into_calendar_date(self) -> Result<NaiveDate> {
        parse_calendar_date(self)
    }
}

impl IntoCalendarDate for String {
    fn into_calendar_date(self) -> Result<NaiveDate> {
        parse_calendar_date(&self)
    }
}

/// Parse a date-like string: `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYYMMDD` or an
/// RFC 3339 timestamp, which is reduced to its UTC calendar date.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();

    for format in DATE_INPUT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Ok(date);
        }
    }

    DateTime::parse_from_rfc3339(input)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| ProcessingError::InvalidDate(input.to_string()))
}

/// Years whose stamp formats as exactly four digits
const MIN_YEAR: i32 = 0;
const MAX_YEAR: i32 = 9999;

fn check_stamp_year(date: NaiveDate) -> Result<NaiveDate> {
    if (MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        Ok(date)
    } else {
        Err(ProcessingError::InvalidDate(format!(
            "{} is outside 0000-01-01..=9999-12-31",
            date
        )))
    }
}

/// Inclusive range of calendar dates with `start <= end`, both within
/// years 0000 to 9999
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let start = check_stamp_year(start)?;
        let end = check_stamp_year(end)?;

        if start > end {
            return Err(ProcessingError::InvalidRange { start, end });
        }

        Ok(Self { start, end })
    }

    pub fn parse(start: impl IntoCalendarDate, end: impl IntoCalendarDate) -> Result<Self> {
        Self::new(start.into_calendar_date()?, end.into_calendar_date()?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, both endpoints included
    pub fn num_days(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Days in ascending order, advanced one calendar day at a time
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}
