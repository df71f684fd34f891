//! CronTimer - cron expression based timer running as a tokio task.
//!
//! The timer sleeps until the next schedule point in its timezone, invokes
//! the fire callback, and repeats until cancelled.

use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use cron::Schedule;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use trafficstate_protocols::{ScheduleTimezone, SchedulerError};

/// Bring a cron expression to the 6/7-field form the parser expects.
///
/// A classic 5-field expression (`minute hour dom month dow`) gets a leading
/// `0` seconds field. Runs of whitespace collapse to one space.
pub fn normalize_expression(expr: &str) -> String {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    if fields.len() == 5 {
        format!("0 {}", fields.join(" "))
    } else {
        fields.join(" ")
    }
}

/// Parse a cron expression, accepting the 5, 6 and 7-field forms.
///
/// # Errors
///
/// Returns [`SchedulerError::InvalidSchedule`] when the expression is empty
/// or does not parse.
pub fn parse_schedule(expr: &str) -> Result<Schedule, SchedulerError> {
    let normalized = normalize_expression(expr);
    if normalized.is_empty() {
        return Err(SchedulerError::InvalidSchedule {
            expression: expr.to_string(),
            message: "expression is empty".to_string(),
        });
    }
    Schedule::from_str(&normalized).map_err(|e| SchedulerError::InvalidSchedule {
        expression: expr.to_string(),
        message: e.to_string(),
    })
}

/// First schedule point strictly after `after`, evaluated in `timezone`.
pub fn next_fire_after(
    schedule: &Schedule,
    timezone: ScheduleTimezone,
    after: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match timezone {
        ScheduleTimezone::Utc => schedule.after(&after).next(),
        ScheduleTimezone::Local => schedule
            .after(&after.with_timezone(&chrono::Local))
            .next()
            .map(|t| t.with_timezone(&Utc)),
        ScheduleTimezone::Fixed(offset) => schedule
            .after(&after.with_timezone(&offset))
            .next()
            .map(|t| t.with_timezone(&Utc)),
    }
}

/// CronTimer - Cron expression based timer.
pub struct CronTimer {
    /// Timer ID.
    id: String,

    /// Cron schedule.
    schedule: Schedule,

    /// Cron expression as given (for display).
    cron_expr: String,

    timezone: ScheduleTimezone,

    cancel: CancellationToken,

    /// Fire count.
    fire_count: AtomicU64,

    next_fire: Mutex<Option<DateTime<Utc>>>,

    handle: Mutex<Option<JoinHandle<()>>>,
}

impl CronTimer {
    /// Parse `cron_expr` and start the timer task.
    ///
    /// `on_fire` runs on the timer task at every schedule point; it must not
    /// block. Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the cron expression is invalid.
    pub fn start<F>(
        id: impl Into<String>,
        cron_expr: &str,
        timezone: ScheduleTimezone,
        on_fire: F,
    ) -> Result<Arc<Self>, SchedulerError>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let schedule = parse_schedule(cron_expr)?;
        let timer = Arc::new(Self {
            id: id.into(),
            schedule,
            cron_expr: cron_expr.to_string(),
            timezone,
            cancel: CancellationToken::new(),
            fire_count: AtomicU64::new(0),
            next_fire: Mutex::new(None),
            handle: Mutex::new(None),
        });

        let handle = tokio::spawn(timer.clone().run(on_fire));
        *timer.handle.lock() = Some(handle);
        Ok(timer)
    }

    /// Get the timer ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the cron expression.
    pub fn cron_expr(&self) -> &str {
        &self.cron_expr
    }

    pub fn timezone(&self) -> ScheduleTimezone {
        self.timezone
    }

    /// Check if the timer is valid (not cancelled).
    pub fn is_valid(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Get the fire count.
    pub fn fire_count(&self) -> u64 {
        self.fire_count.load(Ordering::Relaxed)
    }

    /// Get the next scheduled time, `None` once cancelled or exhausted.
    pub fn next_fire_time(&self) -> Option<DateTime<Utc>> {
        if !self.is_valid() {
            return None;
        }
        *self.next_fire.lock()
    }

    /// Cancel the timer.
    ///
    /// The timer task observes the cancellation at its next await point.
    /// Use [`CronTimer::join`] to wait for it to exit.
    pub fn cancel(&self) {
        self.cancel.cancel();
        debug!("CronTimer {} cancelled", self.id);
    }

    /// Wait for the timer task to exit. Returns immediately if already joined.
    pub async fn join(&self) {
        let handle = self.handle.lock().take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                warn!("CronTimer {} task ended abnormally: {}", self.id, e);
            }
        }
    }

    async fn run<F>(self: Arc<Self>, on_fire: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut after = Utc::now();

        loop {
            let Some(next) = next_fire_after(&self.schedule, self.timezone, after) else {
                debug!("CronTimer {} has no upcoming schedule", self.id);
                break;
            };
            *self.next_fire.lock() = Some(next);

            let wait = (next - Utc::now()).to_std().unwrap_or(Duration::ZERO);
            debug!("CronTimer {} scheduled for {}", self.id, next.to_rfc3339());

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep(wait) => {}
            }

            self.fire_count.fetch_add(1, Ordering::Relaxed);
            on_fire();

            // Never re-fire the same point if the sleep woke early against
            // the wall clock; skip points missed while the task lagged.
            after = next.max(Utc::now());
        }

        *self.next_fire.lock() = None;
        debug!("CronTimer {} stopped", self.id);
    }
}

#[cfg(test)]
#[path = "cron_timer_tests.rs"]
mod tests;
