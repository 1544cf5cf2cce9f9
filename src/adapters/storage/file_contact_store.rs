//! File-based contact store.
//!
//! Persists the directory as a single JSON object mapping names to numbers
//! (the `contacts.json` shape). Every operation runs behind one async mutex
//! and writes go through a temp-file rename, so a read concurrent with an
//! add/remove never observes a truncated document and never loses an update
//! while an escalation is reading the directory for its reverse lookup.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::contact::ContactName;
use crate::ports::{ContactStore, ContactStoreError};

/// Contact store backed by a JSON file.
#[derive(Debug)]
pub struct FileContactStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileContactStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<BTreeMap<ContactName, String>, ContactStoreError> {
        match fs::read_to_string(&self.path).await {
            Ok(json) => {
                serde_json::from_str(&json).map_err(|e| ContactStoreError::Serialization(e.to_string()))
            }
            // A missing file is an empty directory.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(ContactStoreError::Io(e.to_string())),
        }
    }

    /// Writes the full document to a sibling temp file and renames it into
    /// place, so the directory file always holds a complete document even
    /// if the process dies mid-write.
    async fn save(&self, contacts: &BTreeMap<ContactName, String>) -> Result<(), ContactStoreError> {
        let json = serde_json::to_string_pretty(contacts)
            .map_err(|e| ContactStoreError::Serialization(e.to_string()))?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .await
            .map_err(|e| ContactStoreError::Io(e.to_string()))?;
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| ContactStoreError::Io(e.to_string()))
    }
}

#[async_trait]
impl ContactStore for FileContactStore {
    async fn get(&self, name: &ContactName) -> Result<Option<String>, ContactStoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.get(name).cloned())
    }

    async fn upsert(
        &self,
        name: ContactName,
        phone_number: String,
    ) -> Result<(), ContactStoreError> {
        let _guard = self.lock.lock().await;
        let mut contacts = self.load().await?;
        contacts.insert(name, phone_number);
        self.save(&contacts).await
    }

    async fn remove(&self, name: &ContactName) -> Result<bool, ContactStoreError> {
        let _guard = self.lock.lock().await;
        let mut contacts = self.load().await?;
        let removed = contacts.remove(name).is_some();
        if removed {
            self.save(&contacts).await?;
        }
        Ok(removed)
    }

    async fn all(&self) -> Result<BTreeMap<ContactName, String>, ContactStoreError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }
}
