//! ScheduleCheckInHandler - Registers recurring check-in triggers.

use std::sync::Arc;

use crate::application::handlers::checkin::{StartCheckInCommand, StartCheckInHandler};
use crate::config::{TriggerTable, TriggerTime};
use crate::domain::contact::ContactName;
use crate::ports::{CheckInScheduler, ScheduledAction, SchedulerError};

/// Command to schedule a daily check-in for a contact.
#[derive(Debug, Clone)]
pub struct ScheduleCheckInCommand {
    pub contact_name: ContactName,
    pub time: TriggerTime,
}

/// Handler registering check-in triggers with the scheduler.
///
/// Job ids are derived from the contact and time, so re-submitting the same
/// trigger replaces it rather than duplicating it. Each firing runs an
/// independent check-in flow; failures are logged, never retried here.
pub struct ScheduleCheckInHandler {
    scheduler: Arc<dyn CheckInScheduler>,
    start_handler: Arc<StartCheckInHandler>,
}

impl ScheduleCheckInHandler {
    pub fn new(
        scheduler: Arc<dyn CheckInScheduler>,
        start_handler: Arc<StartCheckInHandler>,
    ) -> Self {
        Self {
            scheduler,
            start_handler,
        }
    }

    pub async fn handle(&self, cmd: ScheduleCheckInCommand) -> Result<String, SchedulerError> {
        let job_id = format!(
            "{}_{}_{}",
            cmd.contact_name, cmd.time.hour, cmd.time.minute
        );
        let action = self.check_in_action(cmd.contact_name.clone());

        self.scheduler
            .schedule(&job_id, &cmd.time.cron_expr(), action)
            .await?;

        tracing::info!(
            contact = %cmd.contact_name,
            time = format!("{:02}:{:02}", cmd.time.hour, cmd.time.minute),
            job_id = %job_id,
            "check-in scheduled"
        );

        Ok(job_id)
    }

    /// Registers every trigger from the startup table.
    ///
    /// Entries whose names are invalid are skipped with a warning rather
    /// than failing startup.
    pub async fn register_table(&self, table: &TriggerTable) -> Result<(), SchedulerError> {
        for (name, time) in table.iter() {
            let contact_name = match ContactName::new(name) {
                Ok(name) => name,
                Err(e) => {
                    tracing::warn!(name, error = %e, "skipping schedule entry");
                    continue;
                }
            };
            self.handle(ScheduleCheckInCommand { contact_name, time }).await?;
        }
        Ok(())
    }

    fn check_in_action(&self, contact_name: ContactName) -> ScheduledAction {
        let start_handler = self.start_handler.clone();
        Arc::new(move || {
            let start_handler = start_handler.clone();
            let contact_name = contact_name.clone();
            Box::pin(async move {
                if let Err(e) = start_handler
                    .handle(StartCheckInCommand {
                        contact_name: contact_name.clone(),
                    })
                    .await
                {
                    tracing::error!(contact = %contact_name, error = %e, "scheduled check-in failed");
                }
            })
        })
    }
}
