//! Recurring job definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::require;
use crate::error::RegistryError;

/// A named recurring schedule bound to one or more routes.
///
/// The constructor rejects empty text fields. Route list and cron syntax are
/// checked when the job is registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDefinition {
    pub id: String,
    pub description: String,
    /// Cron expression (5, 6 or 7 fields).
    pub schedule: String,
    pub route_ids: Vec<String>,
}

impl JobDefinition {
    pub fn new<I, S>(
        id: impl Into<String>,
        description: impl Into<String>,
        schedule: impl Into<String>,
        route_ids: I,
    ) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let job = Self {
            id: id.into(),
            description: description.into(),
            schedule: schedule.into(),
            route_ids: route_ids.into_iter().map(Into::into).collect(),
        };
        job.validate()?;
        Ok(job)
    }

    /// Check the required text fields of a definition built by hand or
    /// deserialized.
    pub fn validate(&self) -> Result<(), RegistryError> {
        require("job id", &self.id)?;
        require("job description", &self.description)?;
        require("job schedule", &self.schedule)
    }
}

/// Lifecycle of a registered job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Registered,
    Running,
    Stopped,
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registered => write!(f, "registered"),
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}
