//! Error types for the trafficstate protocol layer.

mod registry;
mod routing;
mod scheduler;
mod sink;

pub use registry::*;
pub use routing::*;
pub use scheduler::*;
pub use sink::*;
