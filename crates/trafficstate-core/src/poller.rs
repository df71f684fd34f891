//! Poller: one traffic poll for one route.
//!
//! Every failure is scoped to the route under poll. A failed lookup, link
//! build, API call or parse leaves the stored state untouched; a failed sink
//! push is reported but never undoes the state that was already committed.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

use trafficstate_protocols::error::{RegistryError, RoutingError, SinkError};
use trafficstate_protocols::{labelled_state_text, RoutingClient, StateSink, TrafficState};

use crate::link::LinkBuilder;
use crate::registry::{RouteRegistry, WaypointRegistry};
use crate::response::{format_state_text, parse_route_response};
use crate::state_store::RouteStateStore;

/// Why a poll did not update the route's state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Routing(#[from] RoutingError),
}

/// What happened to the downstream push after a successful update.
#[derive(Debug, PartialEq, Eq)]
pub enum SinkOutcome {
    /// The route declares no sink item.
    NoSinkItem,
    /// The route declares a sink item but no sink is configured.
    SinkUnavailable,
    Pushed,
    Failed(SinkError),
}

/// Result of [`Poller::poll_route`]. Never an `Err`: failures are values.
#[derive(Debug, PartialEq, Eq)]
pub enum PollOutcome {
    Updated { state: TrafficState, sink: SinkOutcome },
    Failed(PollError),
}

impl PollOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }

    pub fn error(&self) -> Option<&PollError> {
        match self {
            Self::Failed(e) => Some(e),
            Self::Updated { .. } => None,
        }
    }
}

/// Executes polls against the shared registries and state store.
pub struct Poller {
    waypoints: Arc<WaypointRegistry>,
    routes: Arc<RouteRegistry>,
    states: Arc<RouteStateStore>,
    links: LinkBuilder,
    routing: Arc<dyn RoutingClient>,
    sink: Option<Arc<dyn StateSink>>,
}

impl Poller {
    pub fn new(
        waypoints: Arc<WaypointRegistry>,
        routes: Arc<RouteRegistry>,
        states: Arc<RouteStateStore>,
        links: LinkBuilder,
        routing: Arc<dyn RoutingClient>,
    ) -> Self {
        Self {
            waypoints,
            routes,
            states,
            links,
            routing,
            sink: None,
        }
    }

    /// Forward updated states to `sink` for routes that declare an item.
    pub fn with_sink(mut self, sink: Arc<dyn StateSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn routes(&self) -> &Arc<RouteRegistry> {
        &self.routes
    }

    pub fn waypoints(&self) -> &Arc<WaypointRegistry> {
        &self.waypoints
    }

    pub fn states(&self) -> &Arc<RouteStateStore> {
        &self.states
    }

    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    /// Poll the routing API for `route_id` and update its state.
    pub async fn poll_route(&self, route_id: &str) -> PollOutcome {
        self.fetch_and_commit(route_id)
            .await
            .unwrap_or_else(PollOutcome::Failed)
    }

    async fn fetch_and_commit(&self, route_id: &str) -> Result<PollOutcome, PollError> {
        let route = self
            .routes
            .get(route_id)
            .inspect_err(|e| warn!("Cannot poll: {}", e))?;
        let request = self
            .links
            .build(&route, &*self.waypoints)
            .inspect_err(|e| {
                warn!("Cannot build the routing request for the RouteID[{}]: {}", route.id, e)
            })?;

        debug!("Create request for the Route[{}]", route.description);
        let summary = match self.routing.call(&request).await {
            Ok(body) => parse_route_response(&body),
            Err(e) => Err(e),
        }
        .inspect_err(|e| {
            warn!(
                "An error occurred during the routing API call for the RouteID[{}] description[{}]: {}",
                route.id, route.description, e
            );
        })?;

        let text = format_state_text(&summary);
        let state = self.states.commit(&route.id, text, Utc::now());
        info!(
            "The state[{}] has been retrieved for the RouteID[{}] with the description[{}]",
            state.text(),
            route.id,
            route.description
        );

        let sink = match (&route.sink_item_name, &self.sink) {
            (None, _) => SinkOutcome::NoSinkItem,
            (Some(item), None) => {
                warn!(
                    "RouteID[{}] declares item[{}] but no sink is configured",
                    route.id, item
                );
                SinkOutcome::SinkUnavailable
            }
            (Some(item), Some(sink)) => {
                let body = labelled_state_text(&route, &state);
                match sink.push(item, &body).await {
                    Ok(()) => {
                        info!(
                            "The item[{}] has been updated in {} for the RouteID[{}]",
                            item,
                            sink.id(),
                            route.id
                        );
                        SinkOutcome::Pushed
                    }
                    Err(e) => {
                        warn!(
                            "Updating item[{}] for the RouteID[{}] failed: {}",
                            item, route.id, e
                        );
                        SinkOutcome::Failed(e)
                    }
                }
            }
        };

        Ok(PollOutcome::Updated { state, sink })
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
