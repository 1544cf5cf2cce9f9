//! HTTP routes for check-in and provider callback endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{answer_callback, speech_callback, start_check_in, CheckInHandlers};

/// Creates the check-in router: the trigger endpoint plus the two webhooks
/// the voice provider calls back on. Providers differ on webhook verb, so
/// the callbacks accept both GET and POST.
pub fn checkin_routes(handlers: CheckInHandlers) -> Router {
    Router::new()
        .route("/api/check-ins/:name", post(start_check_in))
        .route(
            "/callbacks/answer",
            get(answer_callback).post(answer_callback),
        )
        .route(
            "/callbacks/speech",
            get(speech_callback).post(speech_callback),
        )
        .with_state(handlers)
}
