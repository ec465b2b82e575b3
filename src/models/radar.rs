use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ProcessingError, Result};

/// A weather radar that publishes vertical profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RadarSite {
    #[validate(length(min = 1))]
    pub odim_code: String,

    pub location: String,

    pub country: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    /// Local timezone of the site; data timestamps are UTC regardless
    pub timezone: String,
}

impl RadarSite {
    pub fn new(
        odim_code: &str,
        location: &str,
        country: &str,
        latitude: f64,
        longitude: f64,
        timezone: &str,
    ) -> Self {
        Self {
            odim_code: odim_code.to_string(),
            location: location.to_string(),
            country: country.to_string(),
            latitude,
            longitude,
            timezone: timezone.to_string(),
        }
    }
}

/// Known radars, sorted by location
pub fn available_radars() -> Vec<RadarSite> {
    let mut radars = vec![
        RadarSite::new("behel", "Behel", "Belgium", 51.069199, 5.406138, "Europe/Brussels"),
        RadarSite::new("bejab", "Jabbeke", "Belgium", 51.1919, 3.0641, "Europe/Brussels"),
        RadarSite::new("bezav", "Zaventem", "Belgium", 50.9054, 4.4579, "Europe/Brussels"),
        RadarSite::new("bewid", "Wideumont", "Belgium", 49.9135, 5.5044, "Europe/Brussels"),
        RadarSite::new(
            "nlhrw",
            "Herwijnen",
            "the Netherlands",
            51.83708,
            5.13797,
            "Europe/Amsterdam",
        ),
        RadarSite::new("deess", "Essen", "Germany", 51.4055, 6.9669, "Europe/Berlin"),
        RadarSite::new("denhb", "Neuheilenbach", "Germany", 50.1097, 6.5483, "Europe/Berlin"),
    ];

    radars.sort_by(|a, b| a.location.cmp(&b.location));
    radars
}

/// Look up a radar by ODIM code (case-insensitive)
pub fn find_radar(code: &str) -> Result<RadarSite> {
    available_radars()
        .into_iter()
        .find(|r| r.odim_code.eq_ignore_ascii_case(code.trim()))
        .ok_or_else(|| ProcessingError::RadarNotFound {
            code: code.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_sorted_and_valid() {
        let radars = available_radars();
        assert_eq!(radars.len(), 7);

        let locations: Vec<_> = radars.iter().map(|r| r.location.as_str()).collect();
        let mut sorted = locations.clone();
        sorted.sort();
        assert_eq!(locations, sorted);

        for radar in &radars {
            assert!(radar.validate().is_ok(), "{} should validate", radar.odim_code);
        }
    }

    #[test]
    fn test_find_radar() {
        let radar = find_radar("BEJAB").unwrap();
        assert_eq!(radar.location, "Jabbeke");
        assert_eq!(radar.timezone, "Europe/Brussels");

        assert!(matches!(
            find_radar("xxxxx"),
            Err(ProcessingError::RadarNotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_coordinates() {
        let radar = RadarSite::new("test", "Nowhere", "None", 91.0, 0.0, "UTC");
        assert!(radar.validate().is_err());
    }
}
