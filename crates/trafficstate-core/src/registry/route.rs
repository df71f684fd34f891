//! Route registry.

use std::sync::Arc;

use trafficstate_protocols::error::{EntityKind, RegistryError};
use trafficstate_protocols::Route;

use super::base::{BaseRegistry, Registerable, RegistryIter};

impl Registerable for Route {
    fn registry_id(&self) -> &str {
        &self.id
    }
}

/// Registry of route definitions.
///
/// Waypoint references are not checked here; they are resolved when a
/// routing link is built.
pub struct RouteRegistry {
    inner: BaseRegistry<Route>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self {
            inner: BaseRegistry::new(EntityKind::Route),
        }
    }

    /// Add a route. Fails with `DuplicateIdentifier` if the ID is taken.
    pub fn add(&self, route: Route) -> Result<(), RegistryError> {
        let id = route.id.clone();
        self.inner.register(Arc::new(route))?;
        tracing::info!("RouteID[{}] has been added to the registry", id);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Arc<Route>, RegistryError> {
        self.inner.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.contains(id)
    }

    /// All routes in insertion order.
    pub fn list(&self) -> RegistryIter<Route> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new()
    }
}
