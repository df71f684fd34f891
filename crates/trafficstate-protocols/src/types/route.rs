//! Route definition.

use serde::{Deserialize, Serialize};

use super::require;
use crate::error::RegistryError;

/// An ordered path from a start to a finish waypoint, optionally through
/// intermediate waypoints.
///
/// Waypoint references are resolved lazily, when a link is built for a poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub description: String,
    pub start_waypoint_id: String,
    pub finish_waypoint_id: String,
    #[serde(default)]
    pub intermediate_waypoint_ids: Vec<String>,
    /// Name of the downstream item that receives this route's state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sink_item_name: Option<String>,
}

impl Route {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        start_waypoint_id: impl Into<String>,
        finish_waypoint_id: impl Into<String>,
    ) -> Result<Self, RegistryError> {
        let route = Self {
            id: id.into(),
            description: description.into(),
            start_waypoint_id: start_waypoint_id.into(),
            finish_waypoint_id: finish_waypoint_id.into(),
            intermediate_waypoint_ids: Vec::new(),
            sink_item_name: None,
        };
        require("route id", &route.id)?;
        require("route description", &route.description)?;
        require("route start waypoint", &route.start_waypoint_id)?;
        require("route finish waypoint", &route.finish_waypoint_id)?;
        Ok(route)
    }

    pub fn with_via<I, S>(mut self, waypoint_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.intermediate_waypoint_ids = waypoint_ids.into_iter().map(Into::into).collect();
        self
    }

    /// Empty names are treated as "no sink".
    pub fn with_sink_item(mut self, item_name: impl Into<String>) -> Self {
        let item_name = item_name.into();
        self.sink_item_name = (!item_name.trim().is_empty()).then_some(item_name);
        self
    }
}
