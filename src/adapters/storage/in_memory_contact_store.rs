//! In-memory contact store for tests and ephemeral runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::contact::ContactName;
use crate::ports::{ContactStore, ContactStoreError};

/// Contact store backed by an in-process map. Not persisted.
#[derive(Debug, Default)]
pub struct InMemoryContactStore {
    contacts: RwLock<BTreeMap<ContactName, String>>,
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn get(&self, name: &ContactName) -> Result<Option<String>, ContactStoreError> {
        let contacts = self
            .contacts
            .read()
            .map_err(|e| ContactStoreError::Io(e.to_string()))?;
        Ok(contacts.get(name).cloned())
    }

    async fn upsert(
        &self,
        name: ContactName,
        phone_number: String,
    ) -> Result<(), ContactStoreError> {
        let mut contacts = self
            .contacts
            .write()
            .map_err(|e| ContactStoreError::Io(e.to_string()))?;
        contacts.insert(name, phone_number);
        Ok(())
    }

    async fn remove(&self, name: &ContactName) -> Result<bool, ContactStoreError> {
        let mut contacts = self
            .contacts
            .write()
            .map_err(|e| ContactStoreError::Io(e.to_string()))?;
        Ok(contacts.remove(name).is_some())
    }

    async fn all(&self) -> Result<BTreeMap<ContactName, String>, ContactStoreError> {
        let contacts = self
            .contacts
            .read()
            .map_err(|e| ContactStoreError::Io(e.to_string()))?;
        Ok(contacts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upsert_get_remove_round_trip() {
        let store = InMemoryContactStore::new();
        let name = ContactName::new("gustavo").unwrap();

        store
            .upsert(name.clone(), "+5511999999999".to_string())
            .await
            .unwrap();
        assert_eq!(
            store.get(&name).await.unwrap().as_deref(),
            Some("+5511999999999")
        );

        assert!(store.remove(&name).await.unwrap());
        assert!(!store.remove(&name).await.unwrap());
        assert!(store.get(&name).await.unwrap().is_none());
    }
}
