//! Live route state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Route;

/// State text reported for a route that has never been polled successfully.
pub const UNKNOWN_STATE_TEXT: &str = "-";

/// The latest traffic state of a route.
///
/// Text and timestamp live in one value so they are always replaced together.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrafficState {
    #[default]
    Unknown,
    Known {
        text: String,
        updated_at: DateTime<Utc>,
    },
}

impl TrafficState {
    pub fn known(text: impl Into<String>, updated_at: DateTime<Utc>) -> Self {
        Self::Known {
            text: text.into(),
            updated_at,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Unknown => UNKNOWN_STATE_TEXT,
            Self::Known { text, .. } => text,
        }
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Unknown => None,
            Self::Known { updated_at, .. } => Some(*updated_at),
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known { .. })
    }
}

/// Text pushed to the sink and served by the state endpoint:
/// `"<route description>: <state text>"`.
pub fn labelled_state_text(route: &Route, state: &TrafficState) -> String {
    format!("{}: {}", route.description, state.text())
}

/// Serializable view of a route together with its current state.
#[derive(Debug, Clone, Serialize)]
pub struct RouteRecord {
    #[serde(flatten)]
    pub route: Route,
    pub state: String,
    pub last_updated_at: Option<DateTime<Utc>>,
}

impl RouteRecord {
    pub fn new(route: Route, state: &TrafficState) -> Self {
        Self {
            route,
            state: state.text().to_string(),
            last_updated_at: state.updated_at(),
        }
    }
}
