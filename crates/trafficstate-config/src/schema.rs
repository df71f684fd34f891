//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use trafficstate_protocols::{
    JobDefinition, RegistryError, Route, ScheduleTimezone, Waypoint,
};

pub const DEFAULT_ROUTING_BASE_URL: &str = "https://dev.virtualearth.net/REST/v1/";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub sink: SinkConfig,

    #[serde(default)]
    pub scheduler: SchedulerConfig,

    #[serde(default)]
    pub waypoints: Vec<WaypointConfig>,

    #[serde(default)]
    pub routes: Vec<RouteConfig>,

    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Routing service settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Credential appended to every routing request.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_routing_base_url")]
    pub base_url: String,

    #[serde(default = "default_routing_timeout")]
    pub timeout_seconds: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_routing_base_url(),
            timeout_seconds: default_routing_timeout(),
        }
    }
}

// Keeps the key out of `{:?}` output.
impl std::fmt::Debug for RoutingConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = if self.api_key.is_empty() { "" } else { "***" };
        f.debug_struct("RoutingConfig")
            .field("api_key", &key)
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

fn default_routing_base_url() -> String {
    DEFAULT_ROUTING_BASE_URL.to_string()
}

fn default_routing_timeout() -> u64 {
    30
}

/// Downstream sink (openHAB REST) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// REST root, e.g. `http://openhab:8080/rest/`.
    #[serde(default)]
    pub base_url: String,

    #[serde(default = "default_sink_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_seconds: default_sink_timeout(),
        }
    }
}

fn default_sink_timeout() -> u64 {
    10
}

/// Scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// `"UTC"`, `"Local"` or a fixed offset such as `"+01:00"`.
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

impl SchedulerConfig {
    pub fn parsed_timezone(&self) -> Result<ScheduleTimezone, crate::ConfigError> {
        self.timezone
            .parse()
            .map_err(|e: trafficstate_protocols::InvalidTimezone| crate::ConfigError::InvalidValue {
                field: "scheduler.timezone".to_string(),
                message: e.to_string(),
            })
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

/// A `[[waypoints]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaypointConfig {
    pub id: String,
    /// `"latitude,longitude"`.
    pub coordinate: String,
    pub description: String,
}

impl WaypointConfig {
    pub fn to_waypoint(&self) -> Result<Waypoint, RegistryError> {
        Waypoint::new(&self.id, self.coordinate.parse()?, &self.description)
    }
}

/// A `[[routes]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    pub id: String,
    pub description: String,
    pub start: String,
    pub finish: String,

    /// Intermediate waypoint ids, in travel order.
    #[serde(default)]
    pub via: Vec<String>,

    /// openHAB item receiving the labelled state text.
    #[serde(default)]
    pub sink_item: Option<String>,
}

impl RouteConfig {
    pub fn to_route(&self) -> Result<Route, RegistryError> {
        let route = Route::new(&self.id, &self.description, &self.start, &self.finish)?
            .with_via(self.via.iter().cloned());
        Ok(match &self.sink_item {
            Some(item) => route.with_sink_item(item.clone()),
            None => route,
        })
    }
}

/// A `[[jobs]]` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    pub id: String,
    #[serde(default)]
    pub description: String,
    pub schedule: String,
    #[serde(default)]
    pub routes: Vec<String>,
}

impl JobConfig {
    pub fn to_definition(&self) -> Result<JobDefinition, RegistryError> {
        let description = if self.description.is_empty() {
            self.id.clone()
        } else {
            self.description.clone()
        };
        JobDefinition::new(&self.id, description, &self.schedule, self.routes.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.routing.base_url, DEFAULT_ROUTING_BASE_URL);
        assert_eq!(config.routing.timeout_seconds, 30);
        assert_eq!(config.sink.timeout_seconds, 10);
        assert_eq!(config.scheduler.timezone, "UTC");
        assert!(config.waypoints.is_empty());
    }

    #[test]
    fn test_routing_debug_hides_key() {
        let routing = RoutingConfig {
            api_key: "super-secret".to_string(),
            ..Default::default()
        };
        let debug = format!("{:?}", routing);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn test_waypoint_conversion() {
        let entry = WaypointConfig {
            id: "home".to_string(),
            coordinate: "52.5, 13.4".to_string(),
            description: "Home".to_string(),
        };
        let waypoint = entry.to_waypoint().unwrap();
        assert_eq!(waypoint.id, "home");

        let bad = WaypointConfig {
            coordinate: "north".to_string(),
            ..entry
        };
        assert!(bad.to_waypoint().is_err());
    }

    #[test]
    fn test_route_conversion() {
        let entry = RouteConfig {
            id: "R1".to_string(),
            description: "Commute".to_string(),
            start: "home".to_string(),
            finish: "work".to_string(),
            via: vec!["bridge".to_string()],
            sink_item: Some("Traffic_Commute".to_string()),
        };
        let route = entry.to_route().unwrap();
        assert_eq!(route.intermediate_waypoint_ids, vec!["bridge".to_string()]);
        assert_eq!(route.sink_item_name.as_deref(), Some("Traffic_Commute"));
    }

    #[test]
    fn test_job_description_falls_back_to_id() {
        let entry = JobConfig {
            id: "J1".to_string(),
            description: String::new(),
            schedule: "0 */5 * * * *".to_string(),
            routes: vec!["R1".to_string()],
        };
        let def = entry.to_definition().unwrap();
        assert_eq!(def.description, "J1");
        assert_eq!(def.route_ids, vec!["R1".to_string()]);
    }

    #[test]
    fn test_job_with_blank_schedule_is_rejected() {
        let entry = JobConfig {
            id: "J1".to_string(),
            description: "Morning".to_string(),
            schedule: "  ".to_string(),
            routes: vec!["R1".to_string()],
        };
        assert!(matches!(entry.to_definition(), Err(RegistryError::InvalidEntity(_))));
    }

    #[test]
    fn test_parsed_timezone() {
        let config = SchedulerConfig {
            timezone: "+01:00".to_string(),
        };
        assert!(config.parsed_timezone().is_ok());

        let config = SchedulerConfig {
            timezone: "Europe/Berlin".to_string(),
        };
        assert!(config.parsed_timezone().is_err());
    }
}
