use chrono::{DateTime, Utc};
use csv::StringRecord;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

use crate::utils::constants::{
    COL_DATETIME, COL_DENSITY, COL_DIRECTION, COL_HEIGHT, COL_SD_VVP, COL_SPEED,
};

/// A numeric field that either parsed to a finite number or did not
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    Value(f64),
    Invalid,
}

impl Measurement {
    /// Coerce raw text; missing, empty, non-numeric and non-finite text is `Invalid`
    pub fn parse(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .map_or(Measurement::Invalid, Measurement::Value)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Measurement::Value(v) => Some(*v),
            Measurement::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Measurement::Value(_))
    }
}

impl Serialize for Measurement {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

/// Where each VPTS column sits in a table, found by header name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnPositions {
    datetime: Option<usize>,
    height: Option<usize>,
    dd: Option<usize>,
    ff: Option<usize>,
    dens: Option<usize>,
    sd_vvp: Option<usize>,
}

impl ColumnPositions {
    pub fn from_headers(headers: &StringRecord) -> Self {
        let position = |name: &str| headers.iter().position(|h| h == name);

        Self {
            datetime: position(COL_DATETIME),
            height: position(COL_HEIGHT),
            dd: position(COL_DIRECTION),
            ff: position(COL_SPEED),
            dens: position(COL_DENSITY),
            sd_vvp: position(COL_SD_VVP),
        }
    }
}

/// One table row as text, keyed by the VPTS column names.
///
/// Columns other than these are ignored; absent or empty cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProfileRow {
    pub datetime: Option<String>,
    pub height: Option<String>,
    pub dd: Option<String>,
    pub ff: Option<String>,
    pub dens: Option<String>,
    pub sd_vvp: Option<String>,
}

impl RawProfileRow {
    pub fn from_map(row: &HashMap<String, String>) -> Self {
        let field = |name: &str| row.get(name).filter(|s| !s.is_empty()).cloned();

        Self {
            datetime: field(COL_DATETIME),
            height: field(COL_HEIGHT),
            dd: field(COL_DIRECTION),
            ff: field(COL_SPEED),
            dens: field(COL_DENSITY),
            sd_vvp: field(COL_SD_VVP),
        }
    }

    /// Pick the VPTS cells out of a record; cells past the end of a short
    /// record or left empty are `None`
    pub fn from_record(columns: &ColumnPositions, record: &StringRecord) -> Self {
        let cell = |position: Option<usize>| {
            position
                .and_then(|i| record.get(i))
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            datetime: cell(columns.datetime),
            height: cell(columns.height),
            dd: cell(columns.dd),
            ff: cell(columns.ff),
            dens: cell(columns.dens),
            sd_vvp: cell(columns.sd_vvp),
        }
    }

    /// Names of the VPTS columns that have no value in this row
    pub fn missing_columns(&self) -> Vec<String> {
        [
            (COL_DATETIME, &self.datetime),
            (COL_HEIGHT, &self.height),
            (COL_DIRECTION, &self.dd),
            (COL_SPEED, &self.ff),
            (COL_DENSITY, &self.dens),
            (COL_SD_VVP, &self.sd_vvp),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name.to_string())
        .collect()
    }
}

/// A typed vertical-profile record: one (time, height) sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileRow {
    /// UTC instant; `None` when the datetime cell was missing or unparseable
    pub timestamp: Option<DateTime<Utc>>,
    /// Height above the radar in meters
    pub height: Measurement,
    /// Direction in degrees
    pub direction: Measurement,
    /// Speed in m/s
    pub speed: Measurement,
    pub density: Measurement,
    /// Kept as text since files sometimes carry a non-numeric placeholder here
    pub standard_deviation: Option<String>,
}

impl ProfileRow {
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.timestamp.map(|ts| ts.timestamp_millis())
    }

    /// The standard deviation coerced the same way as the other numeric fields
    pub fn standard_deviation_value(&self) -> Measurement {
        Measurement::parse(self.standard_deviation.as_deref())
    }

    pub fn invalid_field_count(&self) -> usize {
        let invalid_numbers = [self.height, self.direction, self.speed, self.density]
            .iter()
            .filter(|m| !m.is_valid())
            .count();

        invalid_numbers + usize::from(self.timestamp.is_none())
    }

    pub fn is_complete(&self) -> bool {
        self.invalid_field_count() == 0 && self.standard_deviation.is_some()
    }
}
