//! StartCheckInHandler - Command handler for triggering a check-in call.

use std::sync::Arc;

use crate::domain::checkin::{CheckInError, Correlator, CHECK_IN_PROMPT};
use crate::domain::contact::ContactName;
use crate::domain::foundation::PhoneNumberValidator;
use crate::ports::{CallGateway, CallHandle, CallInstruction, ContactStore, PlaceCallRequest};

/// Command to start a check-in for a contact.
#[derive(Debug, Clone)]
pub struct StartCheckInCommand {
    pub contact_name: ContactName,
}

/// Result of a successfully placed check-in call.
#[derive(Debug, Clone)]
pub struct StartCheckInResult {
    pub contact_name: ContactName,
    pub phone_number: String,
    pub call: CallHandle,
}

/// Handler for starting check-ins.
///
/// Resolves the contact, validates the number at the edge, and places the
/// opening call with the first-attempt correlator armed. Everything after
/// this point is driven by provider callbacks.
pub struct StartCheckInHandler {
    store: Arc<dyn ContactStore>,
    gateway: Arc<dyn CallGateway>,
    validator: PhoneNumberValidator,
}

impl StartCheckInHandler {
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

    pub async fn handle(
        &self,
        cmd: StartCheckInCommand,
    ) -> Result<StartCheckInResult, CheckInError> {
        let raw_number = self
            .store
            .get(&cmd.contact_name)
            .await
            .map_err(|e| CheckInError::Store(e.to_string()))?
            .ok_or_else(|| CheckInError::ContactNotFound(cmd.contact_name.clone()))?;

        let phone_number = self
            .validator
            .normalize(&raw_number)
            .ok_or(CheckInError::InvalidNumber(raw_number))?;

        let request = PlaceCallRequest {
            to: phone_number.clone(),
            instruction: CallInstruction::SpeakAndCollect {
                prompt: CHECK_IN_PROMPT.to_string(),
                next: Correlator::first_verification(cmd.contact_name.clone()),
            },
        };

        let call = self
            .gateway
            .place_call(request)
            .await
            .map_err(|e| CheckInError::DialFailure(e.to_string()))?;

        tracing::info!(
            contact = %cmd.contact_name,
            number = %phone_number,
            call_id = %call.call_id,
            "check-in call placed"
        );

        Ok(StartCheckInResult {
            contact_name: cmd.contact_name,
            phone_number,
            call,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryContactStore;
    use crate::adapters::telephony::MockCallGateway;
    use phonenumber::country;

    fn validator() -> PhoneNumberValidator {
        PhoneNumberValidator::new(Some(country::BR))
    }

    async fn store_with(name: &str, number: &str) -> Arc<InMemoryContactStore> {
        let store = Arc::new(InMemoryContactStore::new());
        store
            .upsert(ContactName::new(name).unwrap(), number.to_string())
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn places_call_with_first_attempt_correlator() {
        let store = store_with("gustavo", "+5511999999999").await;
        let gateway = Arc::new(MockCallGateway::new());
        let handler = StartCheckInHandler::new(store, gateway.clone(), validator());

        let result = handler
            .handle(StartCheckInCommand {
                contact_name: ContactName::new("gustavo").unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(result.phone_number, "+5511999999999");

        let calls = gateway.placed_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].to, "+5511999999999");
        match &calls[0].instruction {
            CallInstruction::SpeakAndCollect { prompt, next } => {
                assert_eq!(prompt, CHECK_IN_PROMPT);
                assert_eq!(next.attempt(), 1);
            }
            other => panic!("expected SpeakAndCollect, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unknown_contact_is_not_dialed() {
        let store = Arc::new(InMemoryContactStore::new());
        let gateway = Arc::new(MockCallGateway::new());
        let handler = StartCheckInHandler::new(store, gateway.clone(), validator());

        let result = handler
            .handle(StartCheckInCommand {
                contact_name: ContactName::new("gustavo").unwrap(),
            })
            .await;

        assert!(matches!(result, Err(CheckInError::ContactNotFound(_))));
        assert!(gateway.placed_calls().is_empty());
    }

    #[tokio::test]
    async fn invalid_number_is_not_dialed() {
        let store = store_with("gustavo", "123").await;
        let gateway = Arc::new(MockCallGateway::new());
        let handler = StartCheckInHandler::new(store, gateway.clone(), validator());

        let result = handler
            .handle(StartCheckInCommand {
                contact_name: ContactName::new("gustavo").unwrap(),
            })
            .await;

        assert!(matches!(result, Err(CheckInError::InvalidNumber(_))));
        assert!(gateway.placed_calls().is_empty());
    }

    #[tokio::test]
    async fn dial_failure_is_surfaced_not_retried() {
        let store = store_with("gustavo", "+5511999999999").await;
        let gateway = Arc::new(MockCallGateway::failing("line busy"));
        let handler = StartCheckInHandler::new(store, gateway.clone(), validator());

        let result = handler
            .handle(StartCheckInCommand {
                contact_name: ContactName::new("gustavo").unwrap(),
            })
            .await;

        assert!(matches!(result, Err(CheckInError::DialFailure(_))));
        assert_eq!(gateway.attempted_calls(), 1);
    }
}
