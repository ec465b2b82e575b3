/// File naming convention
pub const FILE_PREFIX: &str = "example_vpts_";
pub const FILE_SUFFIX: &str = ".csv";
pub const DATE_STAMP_FORMAT: &str = "%Y%m%d";
pub const DATE_STAMP_LEN: usize = 8;

/// Directory defaults
pub const DEFAULT_DATA_DIRECTORY: &str = "./";
pub const DEFAULT_CONFIG_FILE: &str = "vpts.toml";

/// VPTS format description
pub const DEFAULT_HEADER_LINES: usize = 4;
pub const TEMPORAL_RESOLUTION_SECS: u32 = 5 * 60;
pub const HEIGHT_STEP_M: u32 = 200;
pub const MAX_HEIGHT_M: u32 = 4800;

/// Column names
pub const COL_DATETIME: &str = "datetime";
pub const COL_HEIGHT: &str = "height";
pub const COL_DIRECTION: &str = "dd";
pub const COL_SPEED: &str = "ff";
pub const COL_DENSITY: &str = "dens";
pub const COL_SD_VVP: &str = "sd_vvp";

/// Radar defaults
pub const DEFAULT_RADAR: &str = "behel";
pub const DATA_BASE_URL: &str = "https://crow.weernet.be";

/// Heights (m) at which profiles are reported: 0, 200, ..., 4800
pub fn available_heights() -> Vec<u32> {
    (0..=MAX_HEIGHT_M).step_by(HEIGHT_STEP_M as usize).collect()
}
