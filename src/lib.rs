pub mod cli;
pub mod error;
pub mod models;
pub mod readers;
pub mod settings;
pub mod utils;

pub use error::{ProcessingError, Result};
pub use models::{FileReference, Measurement, ProfileRow, RawProfileRow};
pub use readers::{ProfileReader, ProfileRowParser};
pub use settings::Settings;
pub use utils::{expand, DateRangeExpander};
