//! # trafficstate RunLoop
//!
//! Recurring jobs: each registered job owns a [`CronTimer`] task that wakes
//! at the next schedule point and polls every route bound to the job.
//!
//! Unregistering a job cancels its timer and waits for the timer task to
//! exit, so no trigger starts afterwards. Polls already in flight finish.

pub mod cron_timer;
pub mod scheduler;

pub use cron_timer::{next_fire_after, normalize_expression, parse_schedule, CronTimer};
pub use scheduler::{JobScheduler, ScheduledJob, SchedulerPrerequisites, TriggerReport};
