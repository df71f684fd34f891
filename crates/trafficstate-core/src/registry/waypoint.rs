//! Waypoint registry.

use std::sync::Arc;

use trafficstate_protocols::error::{EntityKind, RegistryError};
use trafficstate_protocols::Waypoint;

use super::base::{BaseRegistry, Registerable, RegistryIter};
use crate::link::WaypointResolver;

impl Registerable for Waypoint {
    fn registry_id(&self) -> &str {
        &self.id
    }
}

/// Registry of named geographic points.
pub struct WaypointRegistry {
    inner: BaseRegistry<Waypoint>,
}

impl WaypointRegistry {
    pub fn new() -> Self {
        Self {
            inner: BaseRegistry::new(EntityKind::Waypoint),
        }
    }

    /// Add a waypoint. Fails with `DuplicateIdentifier` if the ID is taken.
    pub fn add(&self, waypoint: Waypoint) -> Result<(), RegistryError> {
        self.inner.register(Arc::new(waypoint))
    }

    pub fn get(&self, id: &str) -> Result<Arc<Waypoint>, RegistryError> {
        self.inner.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.contains(id)
    }

    pub fn list(&self) -> RegistryIter<Waypoint> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for WaypointRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WaypointResolver for WaypointRegistry {
    fn resolve(&self, id: &str) -> Option<Arc<Waypoint>> {
        self.inner.get(id).ok()
    }
}
