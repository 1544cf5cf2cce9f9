//! Callback correlator: session state threaded through the wire.
//!
//! There is no server-side session table. A session's identity and attempt
//! count travel inside the callback URL itself, so each inbound callback is
//! self-contained and two sessions never race on shared mutable state. The
//! correlator is the opaque value round-tripped through the voice provider.

use crate::domain::checkin::CheckInError;
use crate::domain::contact::ContactName;

/// Identifies which session and attempt an inbound callback belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correlator {
    /// A verification callback for a monitored contact.
    Verification { contact: ContactName, attempt: u32 },
    /// A confirmation callback for the emergency contact.
    Confirmation { attempt: u32 },
}

impl Correlator {
    /// Correlator for the first verification attempt of a contact.
    pub fn first_verification(contact: ContactName) -> Self {
        Correlator::Verification { contact, attempt: 1 }
    }

    /// Correlator for the first confirmation attempt.
    pub fn first_confirmation() -> Self {
        Correlator::Confirmation { attempt: 1 }
    }

    pub fn attempt(&self) -> u32 {
        match self {
            Correlator::Verification { attempt, .. } => *attempt,
            Correlator::Confirmation { attempt } => *attempt,
        }
    }

    /// Query pairs encoding this correlator into a callback URL.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Correlator::Verification { contact, attempt } => vec![
                ("stage", STAGE_VERIFICATION.to_string()),
                ("contact", contact.to_string()),
                ("attempt", attempt.to_string()),
            ],
            Correlator::Confirmation { attempt } => vec![
                ("stage", STAGE_CONFIRMATION.to_string()),
                ("attempt", attempt.to_string()),
            ],
        }
    }

    /// Reconstructs a correlator from decoded callback fields.
    ///
    /// Missing or unparseable fields are a `MalformedCallback`: the callback
    /// is dropped without a transition and the session stays pending.
    pub fn from_parts(
        stage: &str,
        contact: Option<&str>,
        attempt: Option<u32>,
    ) -> Result<Self, CheckInError> {
        let attempt = attempt
            .ok_or_else(|| CheckInError::MalformedCallback("missing attempt".to_string()))?;
        if attempt == 0 {
            return Err(CheckInError::MalformedCallback("attempt must be >= 1".to_string()));
        }

        match stage {
            STAGE_VERIFICATION => {
                let contact = contact
                    .ok_or_else(|| {
                        CheckInError::MalformedCallback("missing contact".to_string())
                    })?
                    .parse::<ContactName>()
                    .map_err(|e| CheckInError::MalformedCallback(e.to_string()))?;
                Ok(Correlator::Verification { contact, attempt })
            }
            STAGE_CONFIRMATION => Ok(Correlator::Confirmation { attempt }),
            other => Err(CheckInError::MalformedCallback(format!(
                "unknown stage '{other}'"
            ))),
        }
    }
}

const STAGE_VERIFICATION: &str = "verification";
const STAGE_CONFIRMATION: &str = "confirmation";
