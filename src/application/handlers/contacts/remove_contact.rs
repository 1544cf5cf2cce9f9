//! RemoveContactHandler - Command handler for deleting contacts.

use std::sync::Arc;

use crate::domain::contact::{ContactDirectoryError, ContactName};
use crate::ports::ContactStore;

/// Command to delete a directory entry.
#[derive(Debug, Clone)]
pub struct RemoveContactCommand {
    pub name: String,
}

/// Handler for contact removal.
pub struct RemoveContactHandler {
    store: Arc<dyn ContactStore>,
}

impl RemoveContactHandler {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, cmd: RemoveContactCommand) -> Result<(), ContactDirectoryError> {
        let name = ContactName::new(&cmd.name)
            .map_err(|e| ContactDirectoryError::InvalidInput(e.to_string()))?;

        let removed = self
            .store
            .remove(&name)
            .await
            .map_err(|e| ContactDirectoryError::Store(e.to_string()))?;

        if !removed {
            return Err(ContactDirectoryError::NotFound(name));
        }

        tracing::info!(contact = %name, "contact removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryContactStore;

    #[tokio::test]
    async fn removes_existing_contact_case_insensitively() {
        let store = Arc::new(InMemoryContactStore::new());
        store
            .upsert(
                ContactName::new("gustavo").unwrap(),
                "+5511999999999".to_string(),
            )
            .await
            .unwrap();
        let handler = RemoveContactHandler::new(store.clone());

        handler
            .handle(RemoveContactCommand {
                name: "Gustavo".to_string(),
            })
            .await
            .unwrap();

        let stored = store
            .get(&ContactName::new("gustavo").unwrap())
            .await
            .unwrap();
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn unknown_contact_reports_not_found() {
        let handler = RemoveContactHandler::new(Arc::new(InMemoryContactStore::new()));

        let result = handler
            .handle(RemoveContactCommand {
                name: "gustavo".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ContactDirectoryError::NotFound(_))));
    }
}
