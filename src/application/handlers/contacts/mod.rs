//! Contact directory command/query handlers.

mod list_contacts;
mod remove_contact;
mod upsert_contact;

pub use list_contacts::ListContactsHandler;
pub use remove_contact::{RemoveContactCommand, RemoveContactHandler};
pub use upsert_contact::{UpsertContactCommand, UpsertContactHandler};
