//! Runtime settings: built-in defaults, an optional TOML file, then
//! `VPTS_*` environment variables, later sources overriding earlier ones.

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::utils::constants::{
    DATA_BASE_URL, DEFAULT_CONFIG_FILE, DEFAULT_DATA_DIRECTORY, DEFAULT_HEADER_LINES,
    DEFAULT_RADAR, FILE_PREFIX, FILE_SUFFIX,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Prepended verbatim to every file name
    pub data_directory: String,
    pub file_prefix: String,
    pub file_suffix: String,
    /// Non-data lines preceding the CSV header
    pub header_lines: usize,
    pub initial_radar: String,
    pub data_base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_directory: DEFAULT_DATA_DIRECTORY.to_string(),
            file_prefix: FILE_PREFIX.to_string(),
            file_suffix: FILE_SUFFIX.to_string(),
            header_lines: DEFAULT_HEADER_LINES,
            initial_radar: DEFAULT_RADAR.to_string(),
            data_base_url: DATA_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    /// Load settings, reading `path` if given or `vpts.toml` if present
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env_prefix(path, "VPTS")
    }

    pub fn load_with_env_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("data_directory", defaults.data_directory)?
            .set_default("file_prefix", defaults.file_prefix)?
            .set_default("file_suffix", defaults.file_suffix)?
            .set_default("header_lines", defaults.header_lines as u64)?
            .set_default("initial_radar", defaults.initial_radar)?
            .set_default("data_base_url", defaults.data_base_url)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).format(FileFormat::Toml)),
            None => builder.add_source(
                File::with_name(DEFAULT_CONFIG_FILE)
                    .format(FileFormat::Toml)
                    .required(false),
            ),
        };

        let settings = builder
            .add_source(Environment::with_prefix(env_prefix).try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}
