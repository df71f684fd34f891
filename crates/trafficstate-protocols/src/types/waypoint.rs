//! Waypoint definition.

use serde::{Deserialize, Serialize};

use super::{require, Coordinate};
use crate::error::RegistryError;

/// A named geographic point usable as a route endpoint or via-point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: String,
    pub coordinate: Coordinate,
    pub description: String,
}

impl Waypoint {
    pub fn new(
        id: impl Into<String>,
        coordinate: Coordinate,
        description: impl Into<String>,
    ) -> Result<Self, RegistryError> {
        let waypoint = Self {
            id: id.into(),
            coordinate,
            description: description.into(),
        };
        require("waypoint id", &waypoint.id)?;
        require("waypoint description", &waypoint.description)?;
        Ok(waypoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waypoint_new() {
        let wp = Waypoint::new("home", "52.5,13.4".parse().unwrap(), "Home").unwrap();
        assert_eq!(wp.id, "home");
        assert_eq!(wp.description, "Home");
    }

    #[test]
    fn test_waypoint_requires_id_and_description() {
        let c = Coordinate::new(1.0, 2.0).unwrap();
        assert!(Waypoint::new("", c, "Home").is_err());
        assert!(Waypoint::new("home", c, "  ").is_err());
    }
}
