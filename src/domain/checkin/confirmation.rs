//! Confirmation session: the reduced state machine on the escalation path.
//!
//! The emergency contact must utter one of the acknowledgement words within
//! a bounded number of attempts. The budget is wider than the primary check
//! since this is already the fallback path, and exhaustion is the end of the
//! chain: there is no further escalation tier.

use crate::domain::foundation::{StateMachine, ValidationError};

/// Re-prompt after an unrecognized confirmation attempt.
pub const CONFIRM_RETRY_PROMPT: &str = "Por favor, confirme o recebimento do alerta.";
/// Spoken once the alert is acknowledged.
pub const CONFIRMED_PROMPT: &str = "Confirmação recebida. Obrigado.";
/// Final message when no acknowledgement ever arrives.
pub const UNCONFIRMED_PROMPT: &str = "Não foi possível confirmar. Encerrando ligação.";

/// Lifecycle phase of a confirmation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationPhase {
    AwaitingAck,
    Confirmed,
    Unconfirmed,
}

impl StateMachine for ConfirmationPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConfirmationPhase::*;
        matches!(
            (self, target),
            (AwaitingAck, AwaitingAck) | (AwaitingAck, Confirmed) | (AwaitingAck, Unconfirmed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConfirmationPhase::*;
        match self {
            AwaitingAck => vec![AwaitingAck, Confirmed, Unconfirmed],
            Confirmed | Unconfirmed => vec![],
        }
    }
}

/// Outcome of evaluating one confirmation utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    Confirmed,
    Retry { next_attempt: u32 },
    Unconfirmed,
}

impl ConfirmationOutcome {
    pub fn phase(&self) -> ConfirmationPhase {
        match self {
            ConfirmationOutcome::Confirmed => ConfirmationPhase::Confirmed,
            ConfirmationOutcome::Retry { .. } => ConfirmationPhase::AwaitingAck,
            ConfirmationOutcome::Unconfirmed => ConfirmationPhase::Unconfirmed,
        }
    }
}

/// A confirmation session reconstructed from a callback correlator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationSession {
    attempt: u32,
    max_attempts: u32,
}

impl ConfirmationSession {
    pub fn resume(attempt: u32, max_attempts: u32) -> Result<Self, ValidationError> {
        if attempt == 0 || attempt > max_attempts {
            return Err(ValidationError::invalid_format(
                "attempt",
                format!("attempt {attempt} outside 1..={max_attempts}"),
            ));
        }
        Ok(Self { attempt, max_attempts })
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Evaluates one utterance against the acknowledgement word set.
    ///
    /// Case-insensitive substring membership, first match wins.
    pub fn evaluate(&self, transcript: &str, acknowledgements: &[String]) -> ConfirmationOutcome {
        let transcript = transcript.to_lowercase();
        let acknowledged = acknowledgements
            .iter()
            .any(|word| !word.is_empty() && transcript.contains(&word.to_lowercase()));

        if acknowledged {
            ConfirmationOutcome::Confirmed
        } else if self.attempt < self.max_attempts {
            ConfirmationOutcome::Retry {
                next_attempt: self.attempt + 1,
            }
        } else {
            ConfirmationOutcome::Unconfirmed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ack_set() -> Vec<String> {
        ["ok", "confirmo", "entendido", "entendi", "obrigado", "valeu"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn session(attempt: u32) -> ConfirmationSession {
        ConfirmationSession::resume(attempt, 3).unwrap()
    }

    #[test]
    fn acknowledgement_word_confirms() {
        let outcome = session(1).evaluate("confirmo, pode deixar", &ack_set());
        assert_eq!(outcome, ConfirmationOutcome::Confirmed);
    }

    #[test]
    fn acknowledgement_is_case_insensitive() {
        let outcome = session(1).evaluate("OK", &ack_set());
        assert_eq!(outcome, ConfirmationOutcome::Confirmed);
    }

    #[test]
    fn unrecognized_utterance_retries_while_attempts_remain() {
        let outcome = session(2).evaluate("tudo bem", &ack_set());
        assert_eq!(outcome, ConfirmationOutcome::Retry { next_attempt: 3 });
    }

    #[test]
    fn exhaustion_ends_unconfirmed() {
        let outcome = session(3).evaluate("tudo bem", &ack_set());
        assert_eq!(outcome, ConfirmationOutcome::Unconfirmed);
    }

    #[test]
    fn resume_rejects_attempt_beyond_budget() {
        assert!(ConfirmationSession::resume(4, 3).is_err());
        assert!(ConfirmationSession::resume(0, 3).is_err());
    }

    #[test]
    fn terminal_phases() {
        assert!(ConfirmationPhase::Confirmed.is_terminal());
        assert!(ConfirmationPhase::Unconfirmed.is_terminal());
        assert!(!ConfirmationPhase::AwaitingAck.is_terminal());
    }

    #[test]
    fn every_outcome_phase_is_a_valid_transition() {
        let awaiting = ConfirmationPhase::AwaitingAck;
        for outcome in [
            ConfirmationOutcome::Confirmed,
            ConfirmationOutcome::Retry { next_attempt: 2 },
            ConfirmationOutcome::Unconfirmed,
        ] {
            assert_eq!(
                awaiting.transition_to(outcome.phase()),
                Ok(outcome.phase())
            );
        }
    }
}
