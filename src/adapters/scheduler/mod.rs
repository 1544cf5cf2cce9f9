//! Scheduler adapters.

mod cron_scheduler;

pub use cron_scheduler::CronScheduler;
