//! Registries for waypoints and routes.

mod base;
mod route;
mod waypoint;

pub use base::{BaseRegistry, Registerable, RegistryIter};
pub use route::RouteRegistry;
pub use waypoint::WaypointRegistry;
