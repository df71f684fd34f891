//! Shared state behind the HTTP handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::info;

use trafficstate_core::{PollOutcome, Poller};
use trafficstate_protocols::{labelled_state_text, JobStatus, RegistryError, RouteRecord};
use trafficstate_runloop::JobScheduler;

/// Per-job view served by `/maps/running/jobs`.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub id: String,
    pub description: String,
    pub schedule: String,
    pub routes: Vec<String>,
    pub status: JobStatus,
    pub fire_count: u64,
    pub next_fire_time: Option<DateTime<Utc>>,
}

/// Read and trigger operations exposed over HTTP.
pub struct AppState {
    scheduler: Arc<JobScheduler>,
}

impl AppState {
    pub fn new(scheduler: Arc<JobScheduler>) -> Self {
        Self { scheduler }
    }

    pub fn scheduler(&self) -> &Arc<JobScheduler> {
        &self.scheduler
    }

    fn poller(&self) -> &Arc<Poller> {
        self.scheduler.poller()
    }

    /// `"{description}: {state text}"`, or the sentinel text if never polled.
    pub fn get_state_text(&self, route_id: &str) -> Result<String, RegistryError> {
        let route = self.poller().routes().get(route_id)?;
        let state = self.poller().states().get(route_id);
        Ok(labelled_state_text(&route, &state))
    }

    pub fn get_last_updated(&self, route_id: &str) -> Result<Option<DateTime<Utc>>, RegistryError> {
        self.poller().routes().get(route_id)?;
        Ok(self.poller().states().get(route_id).updated_at())
    }

    pub fn get_route_record(&self, route_id: &str) -> Result<RouteRecord, RegistryError> {
        let route = self.poller().routes().get(route_id)?;
        let state = self.poller().states().get(route_id);
        Ok(RouteRecord::new((*route).clone(), &state))
    }

    /// Start a poll of `route_id` in the background.
    ///
    /// Fails only if the route is not registered.
    pub fn trigger_poll(&self, route_id: &str) -> Result<JoinHandle<PollOutcome>, RegistryError> {
        self.poller().routes().get(route_id)?;

        info!("Manual update requested for RouteID[{}]", route_id);
        let poller = self.poller().clone();
        let route_id = route_id.to_string();
        Ok(tokio::spawn(async move { poller.poll_route(&route_id).await }))
    }

    pub fn running_job_descriptions(&self) -> Vec<String> {
        self.scheduler.list_running_jobs()
    }

    pub fn job_summaries(&self) -> Vec<JobSummary> {
        self.scheduler
            .jobs()
            .into_iter()
            .map(|job| JobSummary {
                id: job.id().to_string(),
                description: job.description().to_string(),
                schedule: job.definition().schedule.clone(),
                routes: job.definition().route_ids.clone(),
                status: job.status(),
                fire_count: job.fire_count(),
                next_fire_time: job.next_fire_time(),
            })
            .collect()
    }
}
