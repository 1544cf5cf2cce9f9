//! Scheduler port: fires a named action at configured wall-clock times.

use async_trait::async_trait;
use futures::future::BoxFuture;
use std::sync::Arc;
use thiserror::Error;

/// The action a scheduled job runs on each firing.
pub type ScheduledAction = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

/// Port for the recurring check-in scheduler.
#[async_trait]
pub trait CheckInScheduler: Send + Sync {
    /// Registers a job firing per the cron expression.
    ///
    /// Replace-existing semantics: re-submitting a `job_id` overwrites its
    /// prior trigger, never duplicates it.
    async fn schedule(
        &self,
        job_id: &str,
        cron_expr: &str,
        action: ScheduledAction,
    ) -> Result<(), SchedulerError>;
}

/// Errors from the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("Invalid cron expression '{expr}': {reason}")]
    InvalidCronExpr { expr: String, reason: String },
}
