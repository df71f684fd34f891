//! Job scheduler: owns the registered jobs and their cron timers.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use trafficstate_core::{BaseRegistry, PollError, PollOutcome, Poller, Registerable};
use trafficstate_protocols::error::{EntityKind, RegistryError};
use trafficstate_protocols::{JobDefinition, JobStatus, ScheduleTimezone, SchedulerError};

use crate::cron_timer::{parse_schedule, CronTimer};

/// Settings that must be present before any job may be registered.
#[derive(Debug, Clone, Default)]
pub struct SchedulerPrerequisites {
    pub routing_api_key: String,
    pub sink_base_url: String,
    pub timezone: String,
}

impl SchedulerPrerequisites {
    pub fn new(
        routing_api_key: impl Into<String>,
        sink_base_url: impl Into<String>,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            routing_api_key: routing_api_key.into(),
            sink_base_url: sink_base_url.into(),
            timezone: timezone.into(),
        }
    }

    /// Check that every prerequisite is set and resolve the timezone.
    pub fn check(&self) -> Result<ScheduleTimezone, SchedulerError> {
        if self.routing_api_key.trim().is_empty() {
            return Err(SchedulerError::InvalidConfiguration(
                "routing api key is empty".to_string(),
            ));
        }
        if self.sink_base_url.trim().is_empty() {
            return Err(SchedulerError::InvalidConfiguration(
                "sink base url is empty".to_string(),
            ));
        }
        if self.timezone.trim().is_empty() {
            return Err(SchedulerError::InvalidConfiguration(
                "scheduler timezone is empty".to_string(),
            ));
        }
        self.timezone
            .parse()
            .map_err(|e: trafficstate_protocols::InvalidTimezone| {
                SchedulerError::InvalidConfiguration(e.to_string())
            })
    }
}

struct JobState {
    status: JobStatus,
    timer: Option<Arc<CronTimer>>,
}

/// A job accepted by the scheduler.
pub struct ScheduledJob {
    definition: Arc<JobDefinition>,
    registered_at: DateTime<Utc>,
    state: Mutex<JobState>,
}

impl ScheduledJob {
    fn new(definition: JobDefinition) -> Self {
        Self {
            definition: Arc::new(definition),
            registered_at: Utc::now(),
            state: Mutex::new(JobState {
                status: JobStatus::Registered,
                timer: None,
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    pub fn description(&self) -> &str {
        &self.definition.description
    }

    pub fn definition(&self) -> &JobDefinition {
        &self.definition
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    pub fn status(&self) -> JobStatus {
        self.state.lock().status
    }

    /// Number of times the job's timer has fired.
    pub fn fire_count(&self) -> u64 {
        self.state
            .lock()
            .timer
            .as_ref()
            .map_or(0, |timer| timer.fire_count())
    }

    pub fn next_fire_time(&self) -> Option<DateTime<Utc>> {
        self.state
            .lock()
            .timer
            .as_ref()
            .and_then(|timer| timer.next_fire_time())
    }

    /// Attach the started timer. A job stopped in the meantime cancels it.
    fn attach(&self, timer: Arc<CronTimer>) {
        let mut state = self.state.lock();
        if state.status == JobStatus::Stopped {
            timer.cancel();
        } else {
            state.status = JobStatus::Running;
        }
        state.timer = Some(timer);
    }

    fn stop(&self) -> Option<Arc<CronTimer>> {
        let mut state = self.state.lock();
        state.status = JobStatus::Stopped;
        state.timer.take()
    }
}

impl fmt::Debug for ScheduledJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledJob")
            .field("id", &self.id())
            .field("status", &self.status())
            .field("fire_count", &self.fire_count())
            .finish()
    }
}

impl Registerable for ScheduledJob {
    fn registry_id(&self) -> &str {
        &self.definition.id
    }
}

/// Result of one trigger of a job.
#[derive(Debug)]
pub struct TriggerReport {
    pub job_id: String,
    /// Routes whose state was committed.
    pub updated: Vec<String>,
    pub failed: Vec<(String, PollError)>,
}

impl TriggerReport {
    pub fn all_updated(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Registers recurring jobs and polls their routes on schedule.
pub struct JobScheduler {
    poller: Arc<Poller>,
    prerequisites: SchedulerPrerequisites,
    jobs: BaseRegistry<ScheduledJob>,
}

impl JobScheduler {
    pub fn new(poller: Arc<Poller>, prerequisites: SchedulerPrerequisites) -> Self {
        Self {
            poller,
            prerequisites,
            jobs: BaseRegistry::new(EntityKind::Job),
        }
    }

    pub fn poller(&self) -> &Arc<Poller> {
        &self.poller
    }

    /// Validate and register a job, then start its timer.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` when a prerequisite is missing, the id,
    ///   description or schedule is empty, or the job names no routes
    /// - `InvalidSchedule` when the cron expression does not parse
    /// - `DuplicateIdentifier` when the id is already registered
    pub fn register_job(
        &self,
        definition: JobDefinition,
    ) -> Result<Arc<ScheduledJob>, SchedulerError> {
        let timezone = self.prerequisites.check()?;

        definition
            .validate()
            .map_err(|e| SchedulerError::InvalidConfiguration(e.to_string()))?;
        if definition.route_ids.is_empty() {
            return Err(SchedulerError::InvalidConfiguration(format!(
                "JobID[{}] has no routes",
                definition.id
            )));
        }
        parse_schedule(&definition.schedule)?;

        let job = Arc::new(ScheduledJob::new(definition));
        self.jobs.register(job.clone()).map_err(|e| match e {
            RegistryError::DuplicateIdentifier { id, .. } => SchedulerError::DuplicateIdentifier(id),
            other => SchedulerError::InvalidConfiguration(other.to_string()),
        })?;

        let poller = self.poller.clone();
        let definition = job.definition.clone();
        let started = CronTimer::start(job.id(), &job.definition.schedule, timezone, move || {
            let poller = poller.clone();
            let definition = definition.clone();
            tokio::spawn(async move {
                run_trigger(poller, &definition).await;
            });
        });

        let timer = match started {
            Ok(timer) => timer,
            Err(e) => {
                if let Err(unregister_err) = self.jobs.unregister(job.id()) {
                    debug!("Rollback of JobID[{}] found nothing: {}", job.id(), unregister_err);
                }
                return Err(e);
            }
        };
        job.attach(timer);

        info!(
            "Registered JobID[{}] '{}' ({}, {} routes, tz {})",
            job.id(),
            job.description(),
            job.definition.schedule,
            job.definition.route_ids.len(),
            timezone
        );
        Ok(job)
    }

    /// Remove a job and stop its timer.
    ///
    /// Returns once the timer task has exited: no trigger of this job starts
    /// after that point. Polls already running complete normally.
    pub async fn unregister_job(&self, id: &str) -> Result<(), SchedulerError> {
        let job = self.jobs.unregister(id).map_err(|e| {
            debug!("Unregister failed: {}", e);
            SchedulerError::NotFound(id.to_string())
        })?;

        if let Some(timer) = job.stop() {
            timer.cancel();
            timer.join().await;
        }

        info!("Unregistered JobID[{}]", id);
        Ok(())
    }

    /// Descriptions of the registered jobs in registration order.
    pub fn list_running_jobs(&self) -> Vec<String> {
        self.jobs
            .iter()
            .map(|job| job.description().to_string())
            .collect()
    }

    pub fn jobs(&self) -> Vec<Arc<ScheduledJob>> {
        self.jobs.iter().collect()
    }

    pub fn get_job(&self, id: &str) -> Option<Arc<ScheduledJob>> {
        self.jobs.get(id).ok()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Run one trigger of a registered job immediately and wait for it.
    pub async fn trigger_now(&self, id: &str) -> Result<TriggerReport, SchedulerError> {
        let job = self
            .jobs
            .get(id)
            .map_err(|_| SchedulerError::NotFound(id.to_string()))?;
        Ok(run_trigger(self.poller.clone(), &job.definition).await)
    }

    /// Unregister every job.
    pub async fn shutdown(&self) {
        let ids = self.jobs.list_ids();
        info!("Stopping {} jobs", ids.len());
        for id in ids {
            if let Err(e) = self.unregister_job(&id).await {
                debug!("Job already gone during shutdown: {}", e);
            }
        }
    }
}

/// Poll every route of `definition` concurrently.
async fn run_trigger(poller: Arc<Poller>, definition: &JobDefinition) -> TriggerReport {
    debug!("JobID[{}] triggered", definition.id);

    let mut polls = JoinSet::new();
    for route_id in &definition.route_ids {
        let poller = poller.clone();
        let route_id = route_id.clone();
        polls.spawn(async move {
            let outcome = poller.poll_route(&route_id).await;
            (route_id, outcome)
        });
    }

    let mut report = TriggerReport {
        job_id: definition.id.clone(),
        updated: Vec::new(),
        failed: Vec::new(),
    };
    while let Some(joined) = polls.join_next().await {
        match joined {
            Ok((route_id, PollOutcome::Updated { .. })) => report.updated.push(route_id),
            Ok((route_id, PollOutcome::Failed(e))) => report.failed.push((route_id, e)),
            Err(e) => warn!("JobID[{}] poll task ended abnormally: {}", definition.id, e),
        }
    }

    info!(
        job_id = %definition.id,
        updated = report.updated.len(),
        failed = report.failed.len(),
        "Job trigger complete"
    );
    report
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
