//! openHAB item sink for trafficstate.

mod sink;

pub use sink::{OpenHabSink, DEFAULT_TIMEOUT};
