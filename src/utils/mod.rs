pub mod constants;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use filename::{expand, DateObserver, DateRangeExpander};
pub use progress::ProgressReporter;
