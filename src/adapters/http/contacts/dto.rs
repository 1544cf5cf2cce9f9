//! Wire types for contact directory endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::contact::{Contact, ContactName};

/// Request body to create or overwrite a contact.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertContactRequest {
    pub name: String,
    pub phone_number: String,
}

/// A single directory entry, number normalized to E.164.
#[derive(Debug, Clone, Serialize)]
pub struct ContactResponse {
    pub name: String,
    pub phone_number: String,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            name: contact.name.to_string(),
            phone_number: contact.phone_number,
        }
    }
}

/// The full directory listing.
#[derive(Debug, Clone, Serialize)]
pub struct ContactListResponse {
    pub contacts: Vec<ContactResponse>,
}

impl From<BTreeMap<ContactName, String>> for ContactListResponse {
    fn from(entries: BTreeMap<ContactName, String>) -> Self {
        Self {
            contacts: entries
                .into_iter()
                .map(|(name, phone_number)| ContactResponse {
                    name: name.to_string(),
                    phone_number,
                })
                .collect(),
        }
    }
}
