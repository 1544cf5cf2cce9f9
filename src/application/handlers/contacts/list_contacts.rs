//! ListContactsHandler - Query handler for the directory snapshot.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::contact::{ContactDirectoryError, ContactName};
use crate::ports::ContactStore;

/// Handler returning the full name -> number mapping.
pub struct ListContactsHandler {
    store: Arc<dyn ContactStore>,
}

impl ListContactsHandler {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<BTreeMap<ContactName, String>, ContactDirectoryError> {
        self.store
            .all()
            .await
            .map_err(|e| ContactDirectoryError::Store(e.to_string()))
    }
}
