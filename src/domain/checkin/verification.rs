//! Verification session: the primary check-in state machine.
//!
//! One session owns one check-in attempt series for one contact. The system
//! is purely reactive: exactly one outbound call is placed per
//! `AwaitingSpeech` entry, and no transition happens outside a callback.
//! The session itself is reconstructed from the callback correlator on every
//! inbound request; nothing is stored server-side.

use crate::domain::contact::ContactName;
use crate::domain::foundation::{StateMachine, ValidationError};

/// Opening prompt spoken when the check-in call is answered.
pub const CHECK_IN_PROMPT: &str = "Central de monitoramento?";
/// Re-prompt after a failed passphrase attempt.
pub const RETRY_PROMPT: &str = "Contra senha incorreta. Fale novamente.";
/// Acknowledgement spoken when the passphrase is recognized.
pub const SUCCESS_PROMPT: &str = "Entendido. Obrigado.";
/// Spoken to the monitored contact when escalation starts.
pub const ESCALATING_PROMPT: &str = "Falha na confirmação. Chamando responsáveis.";
/// Spoken when escalation itself cannot proceed.
pub const ESCALATION_FAILED_PROMPT: &str = "Erro ao tentar contatar emergência.";

/// Lifecycle phase of a verification session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationPhase {
    /// A call is out and the session waits for a transcribed utterance.
    AwaitingSpeech,
    /// Passphrase recognized; the session is over.
    Succeeded,
    /// All attempts exhausted; the escalation chain owns the flow now.
    Escalating,
}

impl StateMachine for VerificationPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use VerificationPhase::*;
        matches!(
            (self, target),
            (AwaitingSpeech, AwaitingSpeech)
                | (AwaitingSpeech, Succeeded)
                | (AwaitingSpeech, Escalating)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use VerificationPhase::*;
        match self {
            AwaitingSpeech => vec![AwaitingSpeech, Succeeded, Escalating],
            Succeeded | Escalating => vec![],
        }
    }
}

/// Outcome of evaluating one transcribed utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Passphrase matched; acknowledge and end the call.
    Succeeded,
    /// Mismatch with attempts left; re-prompt and re-arm speech collection.
    Retry { next_attempt: u32 },
    /// Mismatch on the final attempt; hand off to the escalation chain.
    Escalate,
}

impl VerificationOutcome {
    pub fn phase(&self) -> VerificationPhase {
        match self {
            VerificationOutcome::Succeeded => VerificationPhase::Succeeded,
            VerificationOutcome::Retry { .. } => VerificationPhase::AwaitingSpeech,
            VerificationOutcome::Escalate => VerificationPhase::Escalating,
        }
    }
}

/// A verification session reconstructed from a callback correlator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationSession {
    contact: ContactName,
    attempt: u32,
    max_attempts: u32,
}

impl VerificationSession {
    /// Rebuilds the session for the attempt the callback reports.
    ///
    /// The attempt counter is authoritative and bounded by `max_attempts`;
    /// anything outside `1..=max_attempts` means a corrupted correlator.
    pub fn resume(
        contact: ContactName,
        attempt: u32,
        max_attempts: u32,
    ) -> Result<Self, ValidationError> {
        if attempt == 0 || attempt > max_attempts {
            return Err(ValidationError::invalid_format(
                "attempt",
                format!("attempt {attempt} outside 1..={max_attempts}"),
            ));
        }
        Ok(Self {
            contact,
            attempt,
            max_attempts,
        })
    }

    pub fn contact(&self) -> &ContactName {
        &self.contact
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Evaluates one transcribed utterance against the expected passphrase.
    ///
    /// The check runs once per callback: a case-insensitive substring match
    /// succeeds, otherwise the session retries while attempts remain and
    /// escalates exactly at `attempt == max_attempts`.
    pub fn evaluate(&self, transcript: &str, passphrase: &str) -> VerificationOutcome {
        let matched = transcript
            .to_lowercase()
            .contains(&passphrase.to_lowercase());

        if matched {
            VerificationOutcome::Succeeded
        } else if self.attempt < self.max_attempts {
            VerificationOutcome::Retry {
                next_attempt: self.attempt + 1,
            }
        } else {
            VerificationOutcome::Escalate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(attempt: u32) -> VerificationSession {
        VerificationSession::resume(ContactName::new("gustavo").unwrap(), attempt, 2).unwrap()
    }

    #[test]
    fn passphrase_substring_match_succeeds() {
        let outcome = session(1).evaluate("estou protegido", "protegido");
        assert_eq!(outcome, VerificationOutcome::Succeeded);
    }

    #[test]
    fn match_is_case_insensitive() {
        let outcome = session(1).evaluate("PROTEGIDO, sim", "protegido");
        assert_eq!(outcome, VerificationOutcome::Succeeded);
    }

    #[test]
    fn mismatch_on_first_attempt_retries_with_incremented_attempt() {
        let outcome = session(1).evaluate("não sei", "protegido");
        assert_eq!(outcome, VerificationOutcome::Retry { next_attempt: 2 });
    }

    #[test]
    fn mismatch_on_final_attempt_escalates() {
        let outcome = session(2).evaluate("não sei", "protegido");
        assert_eq!(outcome, VerificationOutcome::Escalate);
    }

    #[test]
    fn match_on_final_attempt_still_succeeds() {
        let outcome = session(2).evaluate("protegido", "protegido");
        assert_eq!(outcome, VerificationOutcome::Succeeded);
    }

    #[test]
    fn resume_rejects_attempt_beyond_budget() {
        let contact = ContactName::new("gustavo").unwrap();
        assert!(VerificationSession::resume(contact.clone(), 3, 2).is_err());
        assert!(VerificationSession::resume(contact, 0, 2).is_err());
    }

    #[test]
    fn outcome_phases_follow_the_state_machine() {
        let awaiting = VerificationPhase::AwaitingSpeech;
        for outcome in [
            VerificationOutcome::Succeeded,
            VerificationOutcome::Retry { next_attempt: 2 },
            VerificationOutcome::Escalate,
        ] {
            assert!(awaiting.can_transition_to(&outcome.phase()));
        }
    }

    #[test]
    fn succeeded_and_escalating_are_terminal() {
        assert!(VerificationPhase::Succeeded.is_terminal());
        assert!(VerificationPhase::Escalating.is_terminal());
        assert!(!VerificationPhase::AwaitingSpeech.is_terminal());
    }

    #[test]
    fn duplicate_callback_produces_the_same_transition() {
        // Re-delivering the same callback must not skip an attempt: the
        // evaluation is pure in (attempt, transcript).
        let first = session(1).evaluate("não sei", "protegido");
        let second = session(1).evaluate("não sei", "protegido");
        assert_eq!(first, second);
    }
}
