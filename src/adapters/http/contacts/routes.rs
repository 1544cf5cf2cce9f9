//! HTTP routes for contact directory endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{list_contacts, remove_contact, upsert_contact, ContactHandlers};

/// Creates the contact directory router.
pub fn contact_routes(handlers: ContactHandlers) -> Router {
    Router::new()
        .route("/api/contacts", post(upsert_contact))
        .route("/api/contacts", get(list_contacts))
        .route("/api/contacts/:name", delete(remove_contact))
        .with_state(handlers)
}
