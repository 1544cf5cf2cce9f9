//! HTTP routes for schedule endpoints.

use axum::{routing::post, Router};

use super::handlers::{create_schedule, ScheduleHandlers};

/// Creates the schedule router.
pub fn schedule_routes(handlers: ScheduleHandlers) -> Router {
    Router::new()
        .route("/api/schedules", post(create_schedule))
        .with_state(handlers)
}
