//! Per-route live traffic state.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::info;

use trafficstate_protocols::TrafficState;

/// Holds the latest [`TrafficState`] of every polled route.
///
/// A route's text and timestamp are stored as one value and replaced in a
/// single insert, so readers never see a text from one poll paired with the
/// timestamp of another. Concurrent writes to the same route resolve to the
/// last completed insert.
pub struct RouteStateStore {
    states: DashMap<String, TrafficState>,
}

impl RouteStateStore {
    pub fn new() -> Self {
        Self {
            states: DashMap::new(),
        }
    }

    /// Current state of a route; `Unknown` if it was never updated.
    pub fn get(&self, route_id: &str) -> TrafficState {
        self.states
            .get(route_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Replace a route's state with `text` observed at `updated_at`.
    pub fn commit(&self, route_id: &str, text: impl Into<String>, updated_at: DateTime<Utc>) -> TrafficState {
        let state = TrafficState::known(text, updated_at);
        self.states.insert(route_id.to_string(), state.clone());
        info!(
            "The traffic-state for the RouteID[{}] has been changed to [{}]",
            route_id,
            state.text()
        );
        state
    }

    /// Number of routes with a known state.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl Default for RouteStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_unknown_until_committed() {
        let store = RouteStateStore::new();
        assert_eq!(store.get("R1"), TrafficState::Unknown);
        assert!(store.is_empty());
    }

    #[test]
    fn test_commit_replaces_text_and_timestamp_together() {
        let store = RouteStateStore::new();
        let first = Utc::now();
        store.commit("R1", "0:10hrs. Via(A1)", first);

        let later = first + chrono::Duration::minutes(5);
        store.commit("R1", "0:12hrs. Via(A1)", later);

        let state = store.get("R1");
        assert_eq!(state.text(), "0:12hrs. Via(A1)");
        assert_eq!(state.updated_at(), Some(later));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_routes_are_independent() {
        let store = RouteStateStore::new();
        let now = Utc::now();
        store.commit("R1", "one", now);
        store.commit("R2", "two", now);
        assert_eq!(store.get("R1").text(), "one");
        assert_eq!(store.get("R2").text(), "two");
    }

    #[test]
    fn test_concurrent_writes_never_mix_pairs() {
        let store = Arc::new(RouteStateStore::new());
        let base = Utc::now();

        let writers: Vec<_> = (0..8i64)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for round in 0..200i64 {
                        let n = i * 1000 + round;
                        store.commit("R1", n.to_string(), base + chrono::Duration::seconds(n));
                    }
                })
            })
            .collect();

        for _ in 0..2000 {
            if let TrafficState::Known { text, updated_at } = store.get("R1") {
                let n: i64 = text.parse().unwrap();
                assert_eq!(updated_at, base + chrono::Duration::seconds(n));
            }
        }

        for writer in writers {
            writer.join().unwrap();
        }
    }
}
