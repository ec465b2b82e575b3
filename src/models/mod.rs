pub mod date_range;
pub mod file_reference;
pub mod profile;
pub mod radar;
pub mod summary;

pub use date_range::{parse_calendar_date, DateRange, IntoCalendarDate};
pub use file_reference::FileReference;
pub use profile::{ColumnPositions, Measurement, ProfileRow, RawProfileRow};
pub use radar::{available_radars, find_radar, RadarSite};
pub use summary::ProfileSummary;
