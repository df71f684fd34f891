//! Routing-link builder.
//!
//! Turns a route and its waypoints into a request against the routing API:
//!
//! ```text
//! {base}Routes?wayPoint.1=<start>&viaWaypoint.2=<via>...&wayPoint.N=<finish>&key=<api key>
//! ```
//!
//! The first and last positions use `wayPoint.<n>`, interior ones
//! `viaWaypoint.<n>`, numbered from 1 across the whole sequence.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use trafficstate_protocols::error::{Endpoint, RoutingError};
use trafficstate_protocols::{Coordinate, RequestDescriptor, Route, Waypoint};

/// Default routing API base URL.
pub const DEFAULT_ROUTING_API_URL: &str = "https://dev.virtualearth.net/REST/v1/";

const ROUTES_RESOURCE: &str = "Routes";
const WAY_POINT_PARAM: &str = "wayPoint";
const VIA_WAY_POINT_PARAM: &str = "viaWaypoint";
const KEY_PARAM: &str = "key";
const COMMA: char = ',';
const COMMA_URL_FORMATTED: &str = "%2c";

/// Looks up waypoints by ID for link construction.
pub trait WaypointResolver: Send + Sync {
    fn resolve(&self, id: &str) -> Option<Arc<Waypoint>>;
}

impl WaypointResolver for HashMap<String, Arc<Waypoint>> {
    fn resolve(&self, id: &str) -> Option<Arc<Waypoint>> {
        self.get(id).cloned()
    }
}

/// Builds routing requests against a fixed base URL and API key.
#[derive(Clone)]
pub struct LinkBuilder {
    base_url: String,
    api_key: String,
}

impl LinkBuilder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_ROUTING_API_URL, api_key)
    }

    /// Use a custom base URL (e.g. a local mock of the routing API).
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            api_key: api_key.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request for `route`.
    ///
    /// Fails with `MissingEndpoint` if the start or finish waypoint cannot be
    /// resolved, and with `MissingWaypoint` for an unknown via-point.
    pub fn build(
        &self,
        route: &Route,
        waypoints: &dyn WaypointResolver,
    ) -> Result<RequestDescriptor, RoutingError> {
        let start = resolve_endpoint(route, waypoints, Endpoint::Start)?;
        let finish = resolve_endpoint(route, waypoints, Endpoint::Finish)?;

        let via = route
            .intermediate_waypoint_ids
            .iter()
            .map(|id| {
                waypoints.resolve(id).ok_or_else(|| RoutingError::MissingWaypoint {
                    route_id: route.id.clone(),
                    waypoint_id: id.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut params = Vec::with_capacity(via.len() + 3);
        let mut position = 1;
        params.push(waypoint_param(WAY_POINT_PARAM, position, &start.coordinate));
        for waypoint in &via {
            position += 1;
            params.push(waypoint_param(VIA_WAY_POINT_PARAM, position, &waypoint.coordinate));
        }
        position += 1;
        params.push(waypoint_param(WAY_POINT_PARAM, position, &finish.coordinate));
        params.push(format!("{}={}", KEY_PARAM, encode_query_value(&self.api_key)));

        let descriptor = RequestDescriptor::get(format!(
            "{}{}?{}",
            self.base_url,
            ROUTES_RESOURCE,
            params.join("&")
        ));
        debug!(
            "Built routing request for RouteID[{}]: {}",
            route.id,
            descriptor.redacted_url()
        );
        Ok(descriptor)
    }
}

/// Percent-encode a query value; `&`, `#`, `+` and friends in an API key
/// would otherwise split or truncate the query.
fn encode_query_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Build a routing request against the default routing API URL.
pub fn build_link(
    route: &Route,
    waypoints: &dyn WaypointResolver,
    api_key: &str,
) -> Result<RequestDescriptor, RoutingError> {
    LinkBuilder::new(api_key).build(route, waypoints)
}

fn resolve_endpoint(
    route: &Route,
    waypoints: &dyn WaypointResolver,
    endpoint: Endpoint,
) -> Result<Arc<Waypoint>, RoutingError> {
    let waypoint_id = match endpoint {
        Endpoint::Start => &route.start_waypoint_id,
        Endpoint::Finish => &route.finish_waypoint_id,
    };
    waypoints
        .resolve(waypoint_id)
        .ok_or_else(|| RoutingError::MissingEndpoint {
            route_id: route.id.clone(),
            endpoint,
            waypoint_id: waypoint_id.clone(),
        })
}

fn waypoint_param(name: &str, position: usize, coordinate: &Coordinate) -> String {
    format!("{}.{}={}", name, position, url_formatted_coordinate(coordinate))
}

fn url_formatted_coordinate(coordinate: &Coordinate) -> String {
    coordinate.to_string().replace(COMMA, COMMA_URL_FORMATTED)
}

#[cfg(test)]
#[path = "link_tests.rs"]
mod tests;
