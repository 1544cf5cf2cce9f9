//! Check-in command handlers.

mod confirmation_callback;
mod escalate;
mod schedule_check_in;
mod speech_callback;
mod start_check_in;

pub use confirmation_callback::{
    ConfirmationCallbackCommand, ConfirmationCallbackHandler, ConfirmationCallbackResult,
};
pub use escalate::{EscalateCommand, EscalateHandler, EscalateResult};
pub use schedule_check_in::{ScheduleCheckInCommand, ScheduleCheckInHandler};
pub use speech_callback::{SpeechCallbackCommand, SpeechCallbackHandler, SpeechCallbackResult};
pub use start_check_in::{StartCheckInCommand, StartCheckInHandler, StartCheckInResult};

use crate::config::CheckInConfig;

/// Check-in policy threaded into the callback handlers: the passphrase, the
/// retry budgets of both state machines, and the acknowledgement vocabulary.
#[derive(Debug, Clone)]
pub struct CheckInPolicy {
    pub passphrase: String,
    pub max_attempts: u32,
    pub confirmation_max_attempts: u32,
    pub acknowledgements: Vec<String>,
}

impl From<&CheckInConfig> for CheckInPolicy {
    fn from(config: &CheckInConfig) -> Self {
        Self {
            passphrase: config.passphrase.clone(),
            max_attempts: config.max_attempts,
            confirmation_max_attempts: config.confirmation_max_attempts,
            acknowledgements: config.acknowledgements.clone(),
        }
    }
}
