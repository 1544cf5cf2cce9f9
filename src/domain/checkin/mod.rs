//! Check-in domain: verification and confirmation state machines,
//! escalation events, and the callback correlator that carries session
//! state through the voice provider.

mod confirmation;
mod correlator;
mod errors;
mod escalation;
mod verification;

pub use confirmation::{
    ConfirmationOutcome, ConfirmationPhase, ConfirmationSession, CONFIRMED_PROMPT,
    CONFIRM_RETRY_PROMPT, UNCONFIRMED_PROMPT,
};
pub use correlator::Correlator;
pub use errors::CheckInError;
pub use escalation::EscalationEvent;
pub use verification::{
    VerificationOutcome, VerificationPhase, VerificationSession, CHECK_IN_PROMPT,
    ESCALATING_PROMPT, ESCALATION_FAILED_PROMPT, RETRY_PROMPT, SUCCESS_PROMPT,
};
