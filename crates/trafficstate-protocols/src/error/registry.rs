//! Registry errors.

use std::fmt;

use thiserror::Error;

/// Kind of entity held by a registry, used to qualify error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Waypoint,
    Route,
    Job,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waypoint => write!(f, "WayPointID"),
            Self::Route => write!(f, "RouteID"),
            Self::Job => write!(f, "JobID"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{kind}[{id}] already exists")]
    DuplicateIdentifier { kind: EntityKind, id: String },

    #[error("{kind}[{id}] not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("Invalid entity: {0}")]
    InvalidEntity(String),
}

impl RegistryError {
    pub fn duplicate(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::DuplicateIdentifier { kind, id: id.into() }
    }

    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
