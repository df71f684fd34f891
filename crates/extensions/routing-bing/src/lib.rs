//! Bing Maps routing client for trafficstate.

mod client;

pub use client::{BingRoutingClient, DEFAULT_TIMEOUT};
