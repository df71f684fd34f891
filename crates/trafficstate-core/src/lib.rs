//! # trafficstate Core
//!
//! The polling core: registries for waypoints and routes, the per-route
//! state store, the routing-link builder and the poller that ties them to
//! the external routing client and the downstream sink.
//!
//! ```text
//! Poller::poll_route(id)
//!   -> RouteRegistry::get
//!   -> LinkBuilder::build (WaypointRegistry lookups)
//!   -> RoutingClient::call
//!   -> parse_route_response / format_state_text
//!   -> RouteStateStore::commit
//!   -> StateSink::push (optional)
//! ```

pub mod link;
pub mod poller;
pub mod registry;
pub mod response;
pub mod state_store;

pub use link::{build_link, LinkBuilder, WaypointResolver, DEFAULT_ROUTING_API_URL};
pub use poller::{PollError, PollOutcome, Poller, SinkOutcome};
pub use registry::{BaseRegistry, Registerable, RouteRegistry, WaypointRegistry};
pub use response::{format_state_text, parse_route_response, RouteSummary};
pub use state_store::RouteStateStore;
