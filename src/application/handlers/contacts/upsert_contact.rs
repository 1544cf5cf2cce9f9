//! UpsertContactHandler - Command handler for adding/updating contacts.

use std::sync::Arc;

use crate::domain::contact::{Contact, ContactDirectoryError, ContactName};
use crate::domain::foundation::PhoneNumberValidator;
use crate::ports::ContactStore;

/// Command to create or overwrite a directory entry.
#[derive(Debug, Clone)]
pub struct UpsertContactCommand {
    pub name: String,
    pub phone_number: String,
}

/// Handler for contact upserts.
///
/// Bad numbers are rejected here, before the store is touched: a failed
/// upsert leaves the directory unchanged. Numbers are persisted normalized
/// to E.164.
pub struct UpsertContactHandler {
    store: Arc<dyn ContactStore>,
    validator: PhoneNumberValidator,
}

impl UpsertContactHandler {
    pub fn new(store: Arc<dyn ContactStore>, validator: PhoneNumberValidator) -> Self {
        Self { store, validator }
    }

    pub async fn handle(&self, cmd: UpsertContactCommand) -> Result<Contact, ContactDirectoryError> {
        let name = ContactName::new(&cmd.name)
            .map_err(|e| ContactDirectoryError::InvalidInput(e.to_string()))?;

        if cmd.phone_number.trim().is_empty() {
            return Err(ContactDirectoryError::InvalidInput(
                "phone number cannot be empty".to_string(),
            ));
        }

        let phone_number = self
            .validator
            .normalize(&cmd.phone_number)
            .ok_or_else(|| ContactDirectoryError::InvalidNumber(cmd.phone_number.clone()))?;

        self.store
            .upsert(name.clone(), phone_number.clone())
            .await
            .map_err(|e| ContactDirectoryError::Store(e.to_string()))?;

        tracing::info!(contact = %name, "contact saved");

        Ok(Contact { name, phone_number })
    }
}
