//! Check-in flow error types.

use thiserror::Error;

use crate::domain::contact::ContactName;

/// Errors surfaced by the check-in and escalation flows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckInError {
    /// Unknown contact name; nothing was dialed.
    #[error("Contact '{0}' not found")]
    ContactNotFound(ContactName),

    /// The contact's number failed validation; nothing was dialed.
    #[error("'{0}' is not a valid phone number")]
    InvalidNumber(String),

    /// The gateway could not place the call. Surfaced immediately, never
    /// retried by the core; re-triggering is up to the operator or scheduler.
    #[error("Call could not be placed: {0}")]
    DialFailure(String),

    /// Escalation cannot proceed: no valid emergency contact on file.
    #[error("No valid emergency contact configured")]
    NoEmergencyContact,

    /// Callback missing required correlator fields; the session is untouched.
    #[error("Malformed callback: {0}")]
    MalformedCallback(String),

    /// Underlying contact store failure.
    #[error("Contact store error: {0}")]
    Store(String),
}
