//! HTTP adapters - webhook and REST endpoints.
//!
//! Each area has its own router: check-ins and provider callbacks,
//! contact directory CRUD, and on-demand scheduling.

pub mod checkin;
pub mod contacts;
pub mod schedules;

pub use checkin::{checkin_routes, CheckInHandlers};
pub use contacts::{contact_routes, ContactHandlers};
pub use schedules::{schedule_routes, ScheduleHandlers};

use serde::Serialize;

/// Standard JSON error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: "bad_request".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            error: "not_found".to_string(),
            message: message.into(),
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self {
            error: "unprocessable".to_string(),
            message: message.into(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            error: "bad_gateway".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            error: "internal_error".to_string(),
            message: message.into(),
        }
    }
}
