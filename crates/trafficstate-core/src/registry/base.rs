//! Base registry trait and implementation.
//!
//! Provides the keyed, insertion-ordered store shared by the waypoint,
//! route and job registries.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use trafficstate_protocols::error::{EntityKind, RegistryError};

/// Trait for items that can be stored in a registry.
///
/// Each registerable item must provide a unique ID.
pub trait Registerable: Send + Sync {
    /// Returns the unique identifier for this item.
    fn registry_id(&self) -> &str;
}

struct Entries<T> {
    index: HashMap<String, usize>,
    items: Vec<Arc<T>>,
}

impl<T> Entries<T> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            items: Vec::new(),
        }
    }
}

/// Generic registry for managing items by ID.
///
/// - Lookup by ID through a hash index
/// - Iteration in insertion order
/// - Duplicate check and insert happen under one write lock
pub struct BaseRegistry<T: Registerable> {
    kind: EntityKind,
    entries: RwLock<Entries<T>>,
}

impl<T: Registerable> BaseRegistry<T> {
    /// Create a new empty registry for items of `kind`.
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            entries: RwLock::new(Entries::new()),
        }
    }

    /// Register an item.
    ///
    /// Returns an error if an item with the same ID is already registered;
    /// the registry is left unchanged in that case.
    pub fn register(&self, item: Arc<T>) -> Result<(), RegistryError> {
        let id = item.registry_id().to_string();
        let mut entries = self.entries.write();

        if entries.index.contains_key(&id) {
            return Err(RegistryError::duplicate(self.kind, id));
        }

        let position = entries.items.len();
        entries.items.push(item);
        entries.index.insert(id, position);
        Ok(())
    }

    /// Unregister an item by ID, returning it.
    pub fn unregister(&self, id: &str) -> Result<Arc<T>, RegistryError> {
        let mut entries = self.entries.write();
        let position = entries
            .index
            .remove(id)
            .ok_or_else(|| RegistryError::not_found(self.kind, id))?;

        let item = entries.items.remove(position);
        for slot in entries.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Ok(item)
    }

    /// Get an item by ID.
    pub fn get(&self, id: &str) -> Result<Arc<T>, RegistryError> {
        let entries = self.entries.read();
        entries
            .index
            .get(id)
            .map(|&position| entries.items[position].clone())
            .ok_or_else(|| RegistryError::not_found(self.kind, id))
    }

    /// Check if an item with the given ID is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.read().index.contains_key(id)
    }

    /// List all registered item IDs in insertion order.
    pub fn list_ids(&self) -> Vec<String> {
        self.iter().map(|item| item.registry_id().to_string()).collect()
    }

    /// Get the number of registered items.
    pub fn len(&self) -> usize {
        self.entries.read().items.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().items.is_empty()
    }

    /// Iterate over a snapshot of all items in insertion order.
    ///
    /// The iterator is `Clone`, so a sequence can be restarted from the
    /// same snapshot.
    pub fn iter(&self) -> RegistryIter<T> {
        RegistryIter {
            inner: self.entries.read().items.clone().into_iter(),
        }
    }
}

/// Snapshot iterator returned by [`BaseRegistry::iter`].
pub struct RegistryIter<T> {
    inner: std::vec::IntoIter<Arc<T>>,
}

impl<T> Clone for RegistryIter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Iterator for RegistryIter<T> {
    type Item = Arc<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for RegistryIter<T> {}

#[cfg(test)]
#[path = "base_tests.rs"]
mod tests;
