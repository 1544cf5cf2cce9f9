//! Cron-based check-in scheduler.
//!
//! One tokio task per job sleeps until the next cron firing and runs the
//! action. Re-submitting a job id aborts the previous task before the new
//! one is registered, giving replace-existing semantics. Trigger times are
//! interpreted in the configured timezone, never the host's.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use chrono_tz::Tz;
use cron::Schedule;
use tokio::task::JoinHandle;

use crate::ports::{CheckInScheduler, ScheduledAction, SchedulerError};

/// Scheduler backed by `cron` schedules and tokio tasks.
pub struct CronScheduler {
    timezone: Tz,
    jobs: Mutex<HashMap<String, JoinHandle<()>>>,
}

impl CronScheduler {
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            jobs: Mutex::new(HashMap::new()),
        }
    }

    /// Number of registered jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }
}

impl Drop for CronScheduler {
    fn drop(&mut self) {
        for (_, task) in self.jobs.lock().unwrap().drain() {
            task.abort();
        }
    }
}

#[async_trait]
impl CheckInScheduler for CronScheduler {
    async fn schedule(
        &self,
        job_id: &str,
        cron_expr: &str,
        action: ScheduledAction,
    ) -> Result<(), SchedulerError> {
        let schedule =
            Schedule::from_str(cron_expr).map_err(|e| SchedulerError::InvalidCronExpr {
                expr: cron_expr.to_string(),
                reason: e.to_string(),
            })?;

        let task = tokio::spawn(run_job(job_id.to_string(), schedule, self.timezone, action));

        let mut jobs = self.jobs.lock().unwrap();
        if let Some(previous) = jobs.insert(job_id.to_string(), task) {
            tracing::debug!(job_id, "replacing existing schedule");
            previous.abort();
        }
        Ok(())
    }
}

async fn run_job(job_id: String, schedule: Schedule, timezone: Tz, action: ScheduledAction) {
    loop {
        let now = Utc::now().with_timezone(&timezone);
        let Some(next) = schedule.upcoming(timezone).next() else {
            tracing::warn!(job_id, "schedule has no upcoming firings, stopping");
            break;
        };
        let delay = (next - now).to_std().unwrap_or_default();
        tokio::time::sleep(delay).await;

        tracing::debug!(job_id, "trigger fired");
        action().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::mpsc;
    use tokio::time::{timeout, Duration};

    fn noop_action() -> ScheduledAction {
        Arc::new(|| Box::pin(async {}))
    }

    fn scheduler() -> CronScheduler {
        CronScheduler::new(chrono_tz::America::Sao_Paulo)
    }

    #[tokio::test]
    async fn invalid_cron_expr_is_rejected() {
        let scheduler = scheduler();
        let result = scheduler.schedule("job", "not a cron", noop_action()).await;
        assert!(matches!(result, Err(SchedulerError::InvalidCronExpr { .. })));
        assert_eq!(scheduler.job_count(), 0);
    }

    #[tokio::test]
    async fn resubmitted_job_id_replaces_rather_than_duplicates() {
        let scheduler = scheduler();
        scheduler
            .schedule("gustavo_10_11", "0 11 10 * * *", noop_action())
            .await
            .unwrap();
        scheduler
            .schedule("gustavo_10_11", "0 30 10 * * *", noop_action())
            .await
            .unwrap();

        assert_eq!(scheduler.job_count(), 1);
    }

    #[tokio::test]
    async fn every_second_schedule_fires_the_action() {
        let scheduler = scheduler();
        let (tx, mut rx) = mpsc::channel::<()>(4);

        let action: ScheduledAction = Arc::new(move || {
            let tx = tx.clone();
            Box::pin(async move {
                let _ = tx.send(()).await;
            })
        });

        scheduler
            .schedule("tick", "* * * * * *", action)
            .await
            .unwrap();

        let fired = timeout(Duration::from_secs(3), rx.recv()).await;
        assert!(fired.is_ok(), "scheduled action never fired");
    }
}
