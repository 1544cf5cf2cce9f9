//! EscalateHandler - Command handler for the escalation chain.

use std::sync::Arc;

use crate::domain::checkin::{CheckInError, Correlator, EscalationEvent};
use crate::domain::contact::{reverse_lookup, ContactName};
use crate::domain::foundation::PhoneNumberValidator;
use crate::ports::{CallGateway, CallHandle, CallInstruction, ContactStore, PlaceCallRequest};

/// Command to escalate a failed check-in.
#[derive(Debug, Clone, Default)]
pub struct EscalateCommand {
    /// Contact whose check-in failed, if the correlator carried one.
    pub failed_name: Option<ContactName>,
    /// Number the failed call was placed to, if the callback reported it.
    pub failed_number: Option<String>,
}

/// Result of a started escalation.
#[derive(Debug, Clone)]
pub struct EscalateResult {
    pub event: EscalationEvent,
    pub call: CallHandle,
}

/// Handler for the escalation chain.
///
/// Resolves the reserved emergency contact, composes the alert message, and
/// starts a confirmation session against the emergency number. A missing or
/// invalid emergency contact is terminal: logged, no call placed, no retry.
pub struct EscalateHandler {
    store: Arc<dyn ContactStore>,
    gateway: Arc<dyn CallGateway>,
    validator: PhoneNumberValidator,
}

impl EscalateHandler {
    pub fn new(
        store: Arc<dyn ContactStore>,
        gateway: Arc<dyn CallGateway>,
        validator: PhoneNumberValidator,
    ) -> Self {
        Self {
            store,
            gateway,
            validator,
        }
    }

    pub async fn handle(&self, cmd: EscalateCommand) -> Result<EscalateResult, CheckInError> {
        let emergency_raw = self
            .store
            .get(&ContactName::emergency())
            .await
            .map_err(|e| CheckInError::Store(e.to_string()))?
            .ok_or(CheckInError::NoEmergencyContact)?;

        let emergency_number = self
            .validator
            .normalize(&emergency_raw)
            .ok_or(CheckInError::NoEmergencyContact)?;

        // The correlator usually names the failed contact; when it does not,
        // the dialed number's owner is looked up in the directory. No match
        // still escalates, with the raw number in the alert text.
        let failed_name = match cmd.failed_name {
            Some(name) => Some(name),
            None => match &cmd.failed_number {
                Some(number) => {
                    let directory = self
                        .store
                        .all()
                        .await
                        .map_err(|e| CheckInError::Store(e.to_string()))?;
                    reverse_lookup(&directory, number).cloned()
                }
                None => None,
            },
        };

        let event = EscalationEvent {
            failed_name,
            failed_number: cmd.failed_number,
            emergency_number: emergency_number.clone(),
        };

        let request = PlaceCallRequest {
            to: emergency_number,
            instruction: CallInstruction::SpeakAndCollect {
                prompt: event.alert_message(),
                next: Correlator::first_confirmation(),
            },
        };

        let call = self
            .gateway
            .place_call(request)
            .await
            .map_err(|e| CheckInError::DialFailure(e.to_string()))?;

        tracing::warn!(
            failed_contact = ?event.failed_name,
            failed_number = ?event.failed_number,
            call_id = %call.call_id,
            "check-in failed, escalation call placed"
        );

        Ok(EscalateResult { event, call })
    }
}
