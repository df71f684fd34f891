//! Geographic coordinate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RegistryError;

/// A latitude/longitude pair in decimal degrees.
///
/// Rendered (and parsed) as `"<lat>,<long>"`, the form the routing API
/// expects for a waypoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, RegistryError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(RegistryError::InvalidEntity(format!(
                "latitude {} is out of range",
                latitude
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(RegistryError::InvalidEntity(format!(
                "longitude {} is out of range",
                longitude
            )));
        }
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RegistryError::InvalidEntity(format!("invalid coordinate '{}'", s));

        let (lat, long) = s.split_once(',').ok_or_else(invalid)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let longitude: f64 = long.trim().parse().map_err(|_| invalid())?;
        Self::new(latitude, longitude)
    }
}

impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let c: Coordinate = "52.5,13.4".parse().unwrap();
        assert_eq!(c.latitude(), 52.5);
        assert_eq!(c.longitude(), 13.4);
        assert_eq!(c.to_string(), "52.5,13.4");
    }

    #[test]
    fn test_parse_tolerates_spaces() {
        let c: Coordinate = " 48.8 , 2.3 ".parse().unwrap();
        assert_eq!(c.to_string(), "48.8,2.3");
    }

    #[test]
    fn test_negative_values() {
        let c: Coordinate = "-33.8688,151.2093".parse().unwrap();
        assert_eq!(c.to_string(), "-33.8688,151.2093");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("52.5".parse::<Coordinate>().is_err());
        assert!("north,east".parse::<Coordinate>().is_err());
        assert!("".parse::<Coordinate>().is_err());
    }

    #[test]
    fn test_out_of_range() {
        assert!(Coordinate::new(91.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let c = Coordinate::new(52.5, 13.4).unwrap();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"52.5,13.4\"");

        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
