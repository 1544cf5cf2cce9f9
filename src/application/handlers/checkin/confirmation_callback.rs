//! ConfirmationCallbackHandler - Drives the confirmation state machine from
//! emergency-call speech callbacks.

use crate::application::handlers::checkin::CheckInPolicy;
use crate::domain::checkin::{
    CheckInError, ConfirmationOutcome, ConfirmationPhase, ConfirmationSession, Correlator,
    CONFIRMED_PROMPT, CONFIRM_RETRY_PROMPT, UNCONFIRMED_PROMPT,
};
use crate::domain::foundation::StateMachine;
use crate::ports::CallInstruction;

/// One transcribed utterance from the emergency contact.
#[derive(Debug, Clone)]
pub struct ConfirmationCallbackCommand {
    pub attempt: u32,
    pub transcript: String,
}

/// Outcome of one confirmation callback.
#[derive(Debug, Clone)]
pub enum ConfirmationCallbackResult {
    /// Alert acknowledged; the chain ends confirmed.
    Confirmed { instruction: CallInstruction },
    /// No acknowledgement yet; collection is re-armed.
    Retrying {
        instruction: CallInstruction,
        next_attempt: u32,
    },
    /// Attempts exhausted; the chain ends unconfirmed. There is no further
    /// escalation tier.
    Unconfirmed { instruction: CallInstruction },
}

impl ConfirmationCallbackResult {
    pub fn instruction(&self) -> &CallInstruction {
        match self {
            ConfirmationCallbackResult::Confirmed { instruction }
            | ConfirmationCallbackResult::Retrying { instruction, .. }
            | ConfirmationCallbackResult::Unconfirmed { instruction } => instruction,
        }
    }
}

/// Handler for confirmation speech callbacks.
pub struct ConfirmationCallbackHandler {
    policy: CheckInPolicy,
}

impl ConfirmationCallbackHandler {
    pub fn new(policy: CheckInPolicy) -> Self {
        Self { policy }
    }

    pub async fn handle(
        &self,
        cmd: ConfirmationCallbackCommand,
    ) -> Result<ConfirmationCallbackResult, CheckInError> {
        let session =
            ConfirmationSession::resume(cmd.attempt, self.policy.confirmation_max_attempts)
                .map_err(|e| CheckInError::MalformedCallback(e.to_string()))?;

        let outcome = session.evaluate(&cmd.transcript, &self.policy.acknowledgements);

        // Transition guarded the same way as verification: a callback only
        // ever advances out of AwaitingAck.
        let phase = ConfirmationPhase::AwaitingAck
            .transition_to(outcome.phase())
            .map_err(|e| CheckInError::MalformedCallback(e.to_string()))?;

        tracing::info!(
            attempt = cmd.attempt,
            transcript = %cmd.transcript,
            outcome = ?outcome,
            ?phase,
            terminal = phase.is_terminal(),
            "confirmation callback evaluated"
        );

        match outcome {
            ConfirmationOutcome::Confirmed => Ok(ConfirmationCallbackResult::Confirmed {
                instruction: CallInstruction::SpeakAndHangUp {
                    prompt: CONFIRMED_PROMPT.to_string(),
                },
            }),
            ConfirmationOutcome::Retry { next_attempt } => {
                Ok(ConfirmationCallbackResult::Retrying {
                    instruction: CallInstruction::SpeakAndCollect {
                        prompt: CONFIRM_RETRY_PROMPT.to_string(),
                        next: Correlator::Confirmation {
                            attempt: next_attempt,
                        },
                    },
                    next_attempt,
                })
            }
            ConfirmationOutcome::Unconfirmed => {
                tracing::warn!(
                    attempts = cmd.attempt,
                    "escalation alert never acknowledged, ending unconfirmed"
                );
                Ok(ConfirmationCallbackResult::Unconfirmed {
                    instruction: CallInstruction::SpeakAndHangUp {
                        prompt: UNCONFIRMED_PROMPT.to_string(),
                    },
                })
            }
        }
    }
}
