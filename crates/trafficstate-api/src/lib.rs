//! # trafficstate API
//!
//! HTTP surface over the route state store and the job scheduler.
//!
//! ```text
//! GET       /maps/route/{id}                          route record (JSON)
//! GET       /maps/route/{id}/state                    labelled state text
//! GET       /maps/route/{id}/lastStateUpdateDateTime  RFC 3339, 204 if never updated
//! GET|POST  /maps/route/{id}/state/update             start a poll
//! GET       /maps/running/cronjobs                    comma-joined job descriptions
//! GET       /maps/running/jobs                        job details (JSON)
//! GET       /livez                                    liveness probe
//! ```

pub mod error;
pub mod http;
pub mod server;
pub mod state;

pub use error::InterfaceError;
pub use http::routes::{create_app, create_router};
pub use server::{InterfaceConfig, InterfaceServer};
pub use state::{AppState, JobSummary};
