//! Entity and job registration from configuration.

use std::sync::Arc;

use tracing::{error, info};

use trafficstate_config::{Config, ConfigError};
use trafficstate_core::{LinkBuilder, RouteRegistry, WaypointRegistry};
use trafficstate_runloop::JobScheduler;

/// Build the waypoint and route registries from `[[waypoints]]` and `[[routes]]`.
pub(crate) fn register_entities(
    config: &Config,
) -> Result<(Arc<WaypointRegistry>, Arc<RouteRegistry>), ConfigError> {
    let waypoints = Arc::new(WaypointRegistry::new());
    for entry in &config.waypoints {
        waypoints.add(entry.to_waypoint()?)?;
    }

    let routes = Arc::new(RouteRegistry::new());
    for entry in &config.routes {
        routes.add(entry.to_route()?)?;
    }

    info!(
        "Registered {} waypoints and {} routes",
        waypoints.len(),
        routes.len()
    );
    Ok((waypoints, routes))
}

pub(crate) fn link_builder(config: &Config) -> LinkBuilder {
    LinkBuilder::with_base_url(&config.routing.base_url, &config.routing.api_key)
}

/// Register every `[[jobs]]` entry. A rejected job is logged and skipped.
///
/// Returns the number of jobs registered.
pub(crate) fn register_jobs(scheduler: &JobScheduler, config: &Config) -> usize {
    let mut registered = 0;
    for entry in &config.jobs {
        let definition = match entry.to_definition() {
            Ok(definition) => definition,
            Err(e) => {
                error!("Failed to register job '{}': {}", entry.id, e);
                continue;
            }
        };
        match scheduler.register_job(definition) {
            Ok(_) => registered += 1,
            Err(e) => error!("Failed to register job '{}': {}", entry.id, e),
        }
    }
    info!("{} of {} jobs registered", registered, config.jobs.len());
    registered
}

#[cfg(test)]
mod tests {
    use super::*;
    use trafficstate_config::ConfigLoader;
    use trafficstate_core::{Poller, RouteStateStore};
    use trafficstate_routing_bing::BingRoutingClient;
    use trafficstate_runloop::SchedulerPrerequisites;

    const CONFIG: &str = r#"
        [routing]
        api_key = "abc"

        [sink]
        base_url = "http://openhab.local:8080/rest/"

        [[waypoints]]
        id = "home"
        coordinate = "52.5,13.4"
        description = "Home"

        [[waypoints]]
        id = "work"
        coordinate = "52.4,13.1"
        description = "Work"

        [[routes]]
        id = "R1"
        description = "Commute"
        start = "home"
        finish = "work"

        [[jobs]]
        id = "J1"
        description = "Every five minutes"
        schedule = "*/5 * * * *"
        routes = ["R1"]

        [[jobs]]
        id = "J2"
        description = "Broken"
        schedule = "whenever"
        routes = ["R1"]
    "#;

    #[test]
    fn test_register_entities() {
        let config = ConfigLoader::load_str(CONFIG).unwrap();
        let (waypoints, routes) = register_entities(&config).unwrap();
        assert_eq!(waypoints.len(), 2);
        assert!(routes.contains("R1"));
    }

    #[test]
    fn test_register_entities_duplicate_waypoint() {
        let mut config = ConfigLoader::load_str(CONFIG).unwrap();
        config.waypoints[1].id = "home".to_string();
        assert!(matches!(
            register_entities(&config),
            Err(ConfigError::Entity(_))
        ));
    }

    #[test]
    fn test_link_builder_uses_configured_base() {
        let mut config = ConfigLoader::load_str(CONFIG).unwrap();
        config.routing.base_url = "http://localhost:9999/REST/v1".to_string();
        assert_eq!(link_builder(&config).base_url(), "http://localhost:9999/REST/v1/");
    }

    #[tokio::test]
    async fn test_register_jobs_skips_rejected() {
        let config = ConfigLoader::load_str(CONFIG).unwrap();
        let (waypoints, routes) = register_entities(&config).unwrap();
        let poller = Poller::new(
            waypoints,
            routes,
            Arc::new(RouteStateStore::new()),
            link_builder(&config),
            Arc::new(BingRoutingClient::new(std::time::Duration::from_secs(1)).unwrap()),
        );
        let scheduler = JobScheduler::new(
            Arc::new(poller),
            SchedulerPrerequisites::new("abc", "http://openhab.local:8080/rest/", "UTC"),
        );

        assert_eq!(register_jobs(&scheduler, &config), 1);
        assert_eq!(scheduler.list_running_jobs(), vec!["Every five minutes".to_string()]);
        scheduler.shutdown().await;
    }
}
