//! # trafficstate Protocols
//!
//! Shared definitions for the trafficstate workspace.
//! Contains only types and interface definitions - no I/O.
//!
//! ## Core Traits
//!
//! - [`RoutingClient`] - Executes a routing request against the external routing API
//! - [`StateSink`] - Pushes a route's state text to the downstream item store

pub mod error;
pub mod routing;
pub mod sink;
pub mod types;

pub use error::{RegistryError, RoutingError, SchedulerError, SinkError};
pub use routing::{RequestDescriptor, RequestMethod, RoutingClient};
pub use sink::StateSink;
pub use types::*;
