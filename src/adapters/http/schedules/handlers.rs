//! HTTP handlers for schedule endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::ErrorResponse;
use crate::application::handlers::checkin::{ScheduleCheckInCommand, ScheduleCheckInHandler};
use crate::config::TriggerTime;
use crate::domain::contact::ContactName;

use super::dto::{CreateScheduleRequest, ScheduleResponse};

#[derive(Clone)]
pub struct ScheduleHandlers {
    schedule_handler: Arc<ScheduleCheckInHandler>,
}

impl ScheduleHandlers {
    pub fn new(schedule_handler: Arc<ScheduleCheckInHandler>) -> Self {
        Self { schedule_handler }
    }
}

/// POST /api/schedules - Register a daily check-in trigger
///
/// Re-submitting the same contact and time replaces the existing trigger.
pub async fn create_schedule(
    State(handlers): State<ScheduleHandlers>,
    Json(request): Json<CreateScheduleRequest>,
) -> Response {
    let contact_name = match request.name.parse::<ContactName>() {
        Ok(name) => name,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    let time = match TriggerTime::new(request.hour, request.minute) {
        Ok(time) => time,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(format!(
                    "'{:02}:{:02}' is not a valid time of day",
                    request.hour, request.minute
                ))),
            )
                .into_response()
        }
    };

    match handlers
        .schedule_handler
        .handle(ScheduleCheckInCommand {
            contact_name: contact_name.clone(),
            time,
        })
        .await
    {
        Ok(job_id) => (
            StatusCode::CREATED,
            Json(ScheduleResponse {
                job_id,
                contact: contact_name.to_string(),
                time: format!("{:02}:{:02}", time.hour, time.minute),
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        )
            .into_response(),
    }
}
