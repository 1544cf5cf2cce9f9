//! Contact directory domain: names, entries, and reverse lookup.

mod errors;
mod name;

pub use errors::ContactDirectoryError;
pub use name::{ContactName, EMERGENCY_CONTACT};

use std::collections::BTreeMap;

/// A directory entry: a name mapped to a dialable phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: ContactName,
    pub phone_number: String,
}

/// Finds the contact name owning a phone number.
///
/// Linear scan; when two names share a number the first in iteration order
/// wins (names are expected to be unique per number by convention, not
/// enforced). The map is ordered, so ties resolve deterministically.
pub fn reverse_lookup<'a>(
    directory: &'a BTreeMap<ContactName, String>,
    phone_number: &str,
) -> Option<&'a ContactName> {
    directory
        .iter()
        .find(|(_, number)| number.as_str() == phone_number)
        .map(|(name, _)| name)
}
