//! Contact store adapters.

mod file_contact_store;
mod in_memory_contact_store;

pub use file_contact_store::FileContactStore;
pub use in_memory_contact_store::InMemoryContactStore;
