//! Contact store port: persistence for the name -> number directory.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::contact::ContactName;

/// Port for the contact directory's backing store.
///
/// The store is dumb persistence: number validation happens in the
/// application layer before any write reaches it. Implementations must
/// serialize mutations so concurrent add/remove never lose updates.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Phone number on file for a name, if any.
    async fn get(&self, name: &ContactName) -> Result<Option<String>, ContactStoreError>;

    /// Inserts or overwrites an entry. Last write wins; no history kept.
    async fn upsert(&self, name: ContactName, phone_number: String)
        -> Result<(), ContactStoreError>;

    /// Removes an entry, reporting whether it existed.
    async fn remove(&self, name: &ContactName) -> Result<bool, ContactStoreError>;

    /// Full directory snapshot, ordered by name for deterministic
    /// reverse-lookup tie-breaking.
    async fn all(&self) -> Result<BTreeMap<ContactName, String>, ContactStoreError>;
}

/// Errors from the contact store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactStoreError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
