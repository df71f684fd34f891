//! # trafficstate Config
//!
//! TOML configuration for the trafficstate service: server binding, the
//! routing and sink collaborators, the scheduler timezone, and the
//! waypoints, routes and jobs to register at startup.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::{ConfigLoader, DEFAULT_CONFIG_PATH};
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
