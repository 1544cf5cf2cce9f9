//! SpeechCallbackHandler - Drives the verification state machine from
//! provider speech callbacks.

use std::sync::Arc;

use crate::application::handlers::checkin::{CheckInPolicy, EscalateCommand, EscalateHandler};
use crate::domain::checkin::{
    CheckInError, Correlator, VerificationOutcome, VerificationPhase, VerificationSession,
    ESCALATING_PROMPT, ESCALATION_FAILED_PROMPT, RETRY_PROMPT, SUCCESS_PROMPT,
};
use crate::domain::contact::ContactName;
use crate::domain::foundation::StateMachine;
use crate::ports::CallInstruction;

/// One transcribed utterance, as reported by the provider callback.
#[derive(Debug, Clone)]
pub struct SpeechCallbackCommand {
    /// Contact the session belongs to, from the correlator.
    pub contact: ContactName,
    /// Attempt number the callback reports. Authoritative.
    pub attempt: u32,
    /// Number the failed call was placed to, when the provider reports it.
    pub dialed_number: Option<String>,
    /// Transcribed speech.
    pub transcript: String,
}

/// Outcome of one verification callback, with the instruction the webhook
/// answers with. Every variant speaks: the call is never left silent.
#[derive(Debug, Clone)]
pub enum SpeechCallbackResult {
    /// Passphrase recognized.
    Succeeded { instruction: CallInstruction },
    /// Mismatch with attempts left; collection is re-armed.
    Retrying {
        instruction: CallInstruction,
        next_attempt: u32,
    },
    /// Attempts exhausted and the escalation call was placed.
    Escalated { instruction: CallInstruction },
    /// Attempts exhausted but escalation could not proceed. The verification
    /// failure is still reported to the caller-facing response.
    EscalationFailed {
        instruction: CallInstruction,
        error: CheckInError,
    },
}

impl SpeechCallbackResult {
    pub fn instruction(&self) -> &CallInstruction {
        match self {
            SpeechCallbackResult::Succeeded { instruction }
            | SpeechCallbackResult::Retrying { instruction, .. }
            | SpeechCallbackResult::Escalated { instruction }
            | SpeechCallbackResult::EscalationFailed { instruction, .. } => instruction,
        }
    }
}

/// Handler for verification speech callbacks.
///
/// Stateless: the session is reconstructed from the callback's correlator,
/// evaluated once, and the resulting instruction is handed back to the
/// transport. Only a malformed correlator errors; every real transition
/// produces a speakable response.
pub struct SpeechCallbackHandler {
    escalate: Arc<EscalateHandler>,
    policy: CheckInPolicy,
}

impl SpeechCallbackHandler {
    pub fn new(escalate: Arc<EscalateHandler>, policy: CheckInPolicy) -> Self {
        Self { escalate, policy }
    }

    pub async fn handle(
        &self,
        cmd: SpeechCallbackCommand,
    ) -> Result<SpeechCallbackResult, CheckInError> {
        let session =
            VerificationSession::resume(cmd.contact.clone(), cmd.attempt, self.policy.max_attempts)
                .map_err(|e| CheckInError::MalformedCallback(e.to_string()))?;

        let outcome = session.evaluate(&cmd.transcript, &self.policy.passphrase);

        // Every callback is evaluated from AwaitingSpeech; the state machine
        // guards the transition before any side effect happens.
        let phase = VerificationPhase::AwaitingSpeech
            .transition_to(outcome.phase())
            .map_err(|e| CheckInError::MalformedCallback(e.to_string()))?;

        tracing::info!(
            contact = %cmd.contact,
            attempt = cmd.attempt,
            transcript = %cmd.transcript,
            outcome = ?outcome,
            ?phase,
            terminal = phase.is_terminal(),
            "verification callback evaluated"
        );

        match outcome {
            VerificationOutcome::Succeeded => Ok(SpeechCallbackResult::Succeeded {
                instruction: CallInstruction::SpeakAndHangUp {
                    prompt: SUCCESS_PROMPT.to_string(),
                },
            }),
            VerificationOutcome::Retry { next_attempt } => Ok(SpeechCallbackResult::Retrying {
                instruction: CallInstruction::SpeakAndCollect {
                    prompt: RETRY_PROMPT.to_string(),
                    next: Correlator::Verification {
                        contact: cmd.contact,
                        attempt: next_attempt,
                    },
                },
                next_attempt,
            }),
            VerificationOutcome::Escalate => {
                let escalate_cmd = EscalateCommand {
                    failed_name: Some(cmd.contact),
                    failed_number: cmd.dialed_number,
                };
                match self.escalate.handle(escalate_cmd).await {
                    Ok(_) => Ok(SpeechCallbackResult::Escalated {
                        instruction: CallInstruction::SpeakAndHangUp {
                            prompt: ESCALATING_PROMPT.to_string(),
                        },
                    }),
                    Err(error) => {
                        tracing::warn!(error = %error, "escalation aborted");
                        Ok(SpeechCallbackResult::EscalationFailed {
                            instruction: CallInstruction::SpeakAndHangUp {
                                prompt: ESCALATION_FAILED_PROMPT.to_string(),
                            },
                            error,
                        })
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryContactStore;
    use crate::adapters::telephony::MockCallGateway;
    use crate::domain::foundation::PhoneNumberValidator;
    use crate::ports::ContactStore;
    use phonenumber::country;

    fn policy() -> CheckInPolicy {
        CheckInPolicy {
            passphrase: "protegido".to_string(),
            max_attempts: 2,
            confirmation_max_attempts: 3,
            acknowledgements: vec!["ok".to_string()],
        }
    }

    async fn handler_with(
        entries: &[(&str, &str)],
    ) -> (SpeechCallbackHandler, Arc<MockCallGateway>) {
        let store = Arc::new(InMemoryContactStore::new());
        for (name, number) in entries {
            store
                .upsert(ContactName::new(name).unwrap(), number.to_string())
                .await
                .unwrap();
        }
        let gateway = Arc::new(MockCallGateway::new());
        let escalate = Arc::new(EscalateHandler::new(
            store,
            gateway.clone(),
            PhoneNumberValidator::new(Some(country::BR)),
        ));
        (SpeechCallbackHandler::new(escalate, policy()), gateway)
    }

    fn cmd(attempt: u32, transcript: &str) -> SpeechCallbackCommand {
        SpeechCallbackCommand {
            contact: ContactName::new("gustavo").unwrap(),
            attempt,
            dialed_number: Some("+5511999999999".to_string()),
            transcript: transcript.to_string(),
        }
    }

    #[tokio::test]
    async fn matching_transcript_succeeds_and_hangs_up() {
        let (handler, gateway) = handler_with(&[]).await;

        let result = handler.handle(cmd(2, "estou protegido")).await.unwrap();

        match result {
            SpeechCallbackResult::Succeeded { instruction } => {
                assert_eq!(instruction.prompt(), SUCCESS_PROMPT);
            }
            other => panic!("expected Succeeded, got {other:?}"),
        }
        assert!(gateway.placed_calls().is_empty());
    }

    #[tokio::test]
    async fn first_mismatch_rearms_collection_with_next_attempt() {
        let (handler, gateway) = handler_with(&[]).await;

        let result = handler.handle(cmd(1, "não sei")).await.unwrap();

        match result {
            SpeechCallbackResult::Retrying {
                instruction,
                next_attempt,
            } => {
                assert_eq!(next_attempt, 2);
                match instruction {
                    CallInstruction::SpeakAndCollect { next, .. } => {
                        assert_eq!(next.attempt(), 2);
                    }
                    other => panic!("expected SpeakAndCollect, got {other:?}"),
                }
            }
            other => panic!("expected Retrying, got {other:?}"),
        }
        assert!(gateway.placed_calls().is_empty());
    }

    #[tokio::test]
    async fn final_mismatch_escalates_and_dials_emergency() {
        let (handler, gateway) = handler_with(&[("emergencia", "+5511988888888")]).await;

        let result = handler.handle(cmd(2, "não sei")).await.unwrap();

        assert!(matches!(result, SpeechCallbackResult::Escalated { .. }));
        let calls = gateway.placed_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].to, "+5511988888888");
        assert!(calls[0].instruction.prompt().contains("gustavo"));
    }

    #[tokio::test]
    async fn mismatch_below_budget_never_escalates() {
        let (handler, gateway) = handler_with(&[("emergencia", "+5511988888888")]).await;

        let result = handler.handle(cmd(1, "não sei")).await.unwrap();

        assert!(matches!(result, SpeechCallbackResult::Retrying { .. }));
        assert!(gateway.placed_calls().is_empty());
    }

    #[tokio::test]
    async fn missing_emergency_contact_still_reports_failure() {
        let (handler, gateway) = handler_with(&[]).await;

        let result = handler.handle(cmd(2, "não sei")).await.unwrap();

        match result {
            SpeechCallbackResult::EscalationFailed { instruction, error } => {
                assert_eq!(instruction.prompt(), ESCALATION_FAILED_PROMPT);
                assert!(matches!(error, CheckInError::NoEmergencyContact));
            }
            other => panic!("expected EscalationFailed, got {other:?}"),
        }
        assert!(gateway.placed_calls().is_empty());
    }

    #[tokio::test]
    async fn attempt_beyond_budget_is_malformed() {
        let (handler, _) = handler_with(&[]).await;

        let result = handler.handle(cmd(3, "não sei")).await;

        assert!(matches!(result, Err(CheckInError::MalformedCallback(_))));
    }
}
