//! HTTP adapter for contact directory endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ContactListResponse, ContactResponse, UpsertContactRequest};
pub use handlers::ContactHandlers;
pub use routes::contact_routes;
