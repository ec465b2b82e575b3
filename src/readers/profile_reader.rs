use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::{ColumnPositions, FileReference, ProfileRow, RawProfileRow};
use crate::readers::ProfileRowParser;
use crate::settings::Settings;
use crate::utils::constants::DEFAULT_HEADER_LINES;
use crate::utils::progress::ProgressReporter;

/// Rows read from a sequence of daily files
#[derive(Debug, Default)]
pub struct ProfileBatch {
    pub rows: Vec<ProfileRow>,
    pub files_read: usize,
    pub missing_files: Vec<FileReference>,
}

/// Reads VPTS CSV files: skips the leading non-data lines, then parses each
/// record of the comma-delimited table.
pub struct ProfileReader {
    header_lines: usize,
    parser: ProfileRowParser,
}

impl ProfileReader {
    pub fn new() -> Self {
        Self {
            header_lines: DEFAULT_HEADER_LINES,
            parser: ProfileRowParser::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new().with_header_lines(settings.header_lines)
    }

    pub fn with_header_lines(mut self, header_lines: usize) -> Self {
        self.header_lines = header_lines;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.parser = ProfileRowParser::with_strict(strict);
        self
    }

    pub fn header_lines(&self) -> usize {
        self.header_lines
    }

    /// Read every profile row of one file
    pub fn read_profiles(&self, path: &Path) -> Result<Vec<ProfileRow>> {
        let file = File::open(path)?;
        self.read_from(BufReader::new(file))
    }

    /// Read profile rows from any buffered source
    pub fn read_from<R: BufRead>(&self, mut reader: R) -> Result<Vec<ProfileRow>> {
        // Comment lines are discarded unread, so they need not be UTF-8
        let mut line = Vec::new();
        for _ in 0..self.header_lines {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(Vec::new());
            }
        }

        let mut csv_reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let columns = ColumnPositions::from_headers(csv_reader.headers()?);

        let mut rows = Vec::new();
        for (index, result) in csv_reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) if !self.parser.is_strict() => {
                    warn!("Skipping unreadable record {}: {}", index + 1, e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let raw = RawProfileRow::from_record(&columns, &record);
            rows.push(self.parser.parse_row(&raw)?);
        }

        Ok(rows)
    }

    /// Read the referenced files in order. Files that do not exist are
    /// reported in the batch instead of failing the read.
    pub fn read_references(
        &self,
        references: &[FileReference],
        progress: &ProgressReporter,
    ) -> Result<ProfileBatch> {
        let mut batch = ProfileBatch::default();

        for reference in references {
            if !reference.as_path().exists() {
                warn!("Missing file: {}", reference);
                batch.missing_files.push(reference.clone());
                progress.file_done(reference.as_str());
                continue;
            }

            let rows = self.read_profiles(reference.as_path())?;
            info!("Read {} rows from {}", rows.len(), reference);

            batch.rows.extend(rows);
            batch.files_read += 1;
            progress.file_done(reference.as_str());
        }

        progress.finish_with_message(&format!(
            "{} rows from {} files",
            batch.rows.len(),
            batch.files_read
        ));

        Ok(batch)
    }
}

impl Default for ProfileReader {
    fn default() -> Self {
        Self::new()
    }
}
