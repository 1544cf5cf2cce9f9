//! HTTP handlers for contact directory endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::ErrorResponse;
use crate::application::handlers::contacts::{
    ListContactsHandler, RemoveContactCommand, RemoveContactHandler, UpsertContactCommand,
    UpsertContactHandler,
};
use crate::domain::contact::ContactDirectoryError;

use super::dto::{ContactListResponse, ContactResponse, UpsertContactRequest};

#[derive(Clone)]
pub struct ContactHandlers {
    upsert_handler: Arc<UpsertContactHandler>,
    remove_handler: Arc<RemoveContactHandler>,
    list_handler: Arc<ListContactsHandler>,
}

impl ContactHandlers {
    pub fn new(
        upsert_handler: Arc<UpsertContactHandler>,
        remove_handler: Arc<RemoveContactHandler>,
        list_handler: Arc<ListContactsHandler>,
    ) -> Self {
        Self {
            upsert_handler,
            remove_handler,
            list_handler,
        }
    }
}

/// POST /api/contacts - Create or overwrite a directory entry
pub async fn upsert_contact(
    State(handlers): State<ContactHandlers>,
    Json(request): Json<UpsertContactRequest>,
) -> Response {
    match handlers
        .upsert_handler
        .handle(UpsertContactCommand {
            name: request.name,
            phone_number: request.phone_number,
        })
        .await
    {
        Ok(contact) => {
            (StatusCode::CREATED, Json(ContactResponse::from(contact))).into_response()
        }
        Err(e) => handle_directory_error(e),
    }
}

/// DELETE /api/contacts/:name - Remove a directory entry
pub async fn remove_contact(
    State(handlers): State<ContactHandlers>,
    Path(name): Path<String>,
) -> Response {
    match handlers
        .remove_handler
        .handle(RemoveContactCommand { name })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_directory_error(e),
    }
}

/// GET /api/contacts - List the directory
pub async fn list_contacts(State(handlers): State<ContactHandlers>) -> Response {
    match handlers.list_handler.handle().await {
        Ok(entries) => (StatusCode::OK, Json(ContactListResponse::from(entries))).into_response(),
        Err(e) => handle_directory_error(e),
    }
}

fn handle_directory_error(error: ContactDirectoryError) -> Response {
    match error {
        ContactDirectoryError::InvalidInput(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.to_string())),
        )
            .into_response(),
        ContactDirectoryError::InvalidNumber(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::unprocessable(error.to_string())),
        )
            .into_response(),
        ContactDirectoryError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(error.to_string())),
        )
            .into_response(),
        ContactDirectoryError::Store(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(error.to_string())),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contact::ContactName;

    #[test]
    fn invalid_input_maps_to_400() {
        let error = ContactDirectoryError::InvalidInput("name cannot be empty".to_string());
        assert_eq!(
            handle_directory_error(error).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn invalid_number_maps_to_422() {
        let error = ContactDirectoryError::InvalidNumber("abc".to_string());
        assert_eq!(
            handle_directory_error(error).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn not_found_maps_to_404() {
        let error = ContactDirectoryError::NotFound(ContactName::new("ana").unwrap());
        assert_eq!(
            handle_directory_error(error).status(),
            StatusCode::NOT_FOUND
        );
    }
}
