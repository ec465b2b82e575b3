use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::error::{ProcessingError, Result};
use crate::utils::constants::{DATE_STAMP_FORMAT, DATE_STAMP_LEN};

/// Location of one daily VPTS file: `<directory><prefix><YYYYMMDD><suffix>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileReference {
    path: String,
    #[serde(skip)]
    date: NaiveDate,
}

impl FileReference {
    /// The directory is prepended verbatim, no separator is inserted.
    pub fn new(directory: &str, prefix: &str, date: NaiveDate, suffix: &str) -> Self {
        let path = format!(
            "{}{}{}{}",
            directory,
            prefix,
            date.format(DATE_STAMP_FORMAT),
            suffix
        );

        Self { path, date }
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.path)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn into_string(self) -> String {
        self.path
    }

    /// Extract the date stamp that follows the last occurrence of `prefix`
    /// (e.g. `../data/example_vpts_20160901.csv` -> 2016-09-01)
    pub fn parse_date_stamp(reference: &str, prefix: &str) -> Result<NaiveDate> {
        let stamp = reference
            .rfind(prefix)
            .map(|pos| pos + prefix.len())
            .and_then(|start| reference.get(start..start + DATE_STAMP_LEN))
            .ok_or_else(|| {
                ProcessingError::InvalidFormat(format!(
                    "No date stamp after '{}' in: {}",
                    prefix, reference
                ))
            })?;

        if !stamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ProcessingError::InvalidFormat(format!(
                "Date stamp is not {} digits: '{}'",
                DATE_STAMP_LEN, stamp
            )));
        }

        Ok(NaiveDate::parse_from_str(stamp, DATE_STAMP_FORMAT)?)
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl AsRef<str> for FileReference {
    fn as_ref(&self) -> &str {
        &self.path
    }
}

impl AsRef<Path> for FileReference {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}
