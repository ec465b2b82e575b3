pub mod profile_parser;
pub mod profile_reader;

pub use profile_parser::{parse_timestamp, ProfileRowParser};
pub use profile_reader::{ProfileBatch, ProfileReader};
