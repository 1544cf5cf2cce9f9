//! Contact name value object.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Reserved directory name denoting the default escalation target.
pub const EMERGENCY_CONTACT: &str = "emergencia";

/// A contact's name, the case-insensitive key into the directory.
///
/// Stored lowercase so `"Gustavo"` and `"gustavo"` address the same entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactName(String);

impl ContactName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the reserved emergency contact name.
    pub fn is_emergency(&self) -> bool {
        self.0 == EMERGENCY_CONTACT
    }

    /// The reserved emergency contact name.
    pub fn emergency() -> Self {
        Self(EMERGENCY_CONTACT.to_string())
    }
}

impl fmt::Display for ContactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContactName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
