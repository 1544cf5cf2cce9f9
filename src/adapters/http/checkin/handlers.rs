//! HTTP handlers for check-in and provider callback endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};

use crate::adapters::http::ErrorResponse;
use crate::application::handlers::checkin::{
    ConfirmationCallbackCommand, ConfirmationCallbackHandler, SpeechCallbackCommand,
    SpeechCallbackHandler, StartCheckInCommand, StartCheckInHandler,
};
use crate::domain::checkin::{CheckInError, Correlator};
use crate::domain::contact::ContactName;
use crate::ports::{CallGateway, CallInstruction, RenderedInstruction};

use super::dto::{AnswerQuery, CallbackForm, CallbackQuery, StartCheckInResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CheckInHandlers {
    start_handler: Arc<StartCheckInHandler>,
    speech_handler: Arc<SpeechCallbackHandler>,
    confirmation_handler: Arc<ConfirmationCallbackHandler>,
    gateway: Arc<dyn CallGateway>,
}

impl CheckInHandlers {
    pub fn new(
        start_handler: Arc<StartCheckInHandler>,
        speech_handler: Arc<SpeechCallbackHandler>,
        confirmation_handler: Arc<ConfirmationCallbackHandler>,
        gateway: Arc<dyn CallGateway>,
    ) -> Self {
        Self {
            start_handler,
            speech_handler,
            confirmation_handler,
            gateway,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/check-ins/:name - Trigger a check-in call for a contact
pub async fn start_check_in(
    State(handlers): State<CheckInHandlers>,
    Path(name): Path<String>,
) -> Response {
    let contact_name = match name.parse::<ContactName>() {
        Ok(name) => name,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    match handlers
        .start_handler
        .handle(StartCheckInCommand { contact_name })
        .await
    {
        Ok(result) => (
            StatusCode::ACCEPTED,
            Json(StartCheckInResponse {
                contact: result.contact_name.to_string(),
                phone_number: result.phone_number,
                call_id: result.call.call_id,
            }),
        )
            .into_response(),
        Err(e) => handle_check_in_error(e),
    }
}

/// GET|POST /callbacks/speech - Provider reports a transcribed utterance
///
/// The correlator in the query says which session and attempt this is;
/// the response body is the rendered next instruction for the provider.
pub async fn speech_callback(
    State(handlers): State<CheckInHandlers>,
    Query(query): Query<CallbackQuery>,
    form: Option<Form<CallbackForm>>,
) -> Response {
    let form = form.map(|Form(f)| f).unwrap_or_default();
    let transcript = form
        .speech_result
        .or(query.speech_result)
        .unwrap_or_default();
    let dialed_number = form.to.or(query.to);

    let correlator = match Correlator::from_parts(
        query.stage.as_deref().unwrap_or_default(),
        query.contact.as_deref(),
        query.attempt,
    ) {
        Ok(correlator) => correlator,
        Err(e) => return malformed_callback(e),
    };

    let result = match correlator {
        Correlator::Verification { contact, attempt } => handlers
            .speech_handler
            .handle(SpeechCallbackCommand {
                contact,
                attempt,
                dialed_number,
                transcript,
            })
            .await
            .map(|r| r.instruction().clone()),
        Correlator::Confirmation { attempt } => handlers
            .confirmation_handler
            .handle(ConfirmationCallbackCommand { attempt, transcript })
            .await
            .map(|r| r.instruction().clone()),
    };

    match result {
        Ok(instruction) => rendered(handlers.gateway.render(&instruction)),
        Err(e) => malformed_callback(e),
    }
}

/// GET|POST /callbacks/answer - Provider fetches what an answered call does
///
/// The instruction was encoded into this URL when the call was placed, so
/// it only has to be re-rendered; nothing is evaluated here.
pub async fn answer_callback(
    State(handlers): State<CheckInHandlers>,
    Query(query): Query<AnswerQuery>,
) -> Response {
    let prompt = query
        .prompt
        .unwrap_or_else(|| "Alerta. Falha de verificação.".to_string());

    let instruction = if query.hangup.as_deref() == Some("1") {
        CallInstruction::SpeakAndHangUp { prompt }
    } else {
        match Correlator::from_parts(
            query.stage.as_deref().unwrap_or_default(),
            query.contact.as_deref(),
            query.attempt,
        ) {
            Ok(next) => CallInstruction::SpeakAndCollect { prompt, next },
            Err(e) => return malformed_callback(e),
        }
    };

    rendered(handlers.gateway.render(&instruction))
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn rendered(instruction: RenderedInstruction) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, instruction.content_type)],
        instruction.body,
    )
        .into_response()
}

/// Malformed callbacks are a no-op: nothing transitioned, and a later
/// well-formed callback still advances the session.
fn malformed_callback(error: CheckInError) -> Response {
    tracing::warn!(error = %error, "dropping malformed callback");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(error.to_string())),
    )
        .into_response()
}

fn handle_check_in_error(error: CheckInError) -> Response {
    match error {
        CheckInError::ContactNotFound(name) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(format!(
                "Contact '{name}' not found"
            ))),
        )
            .into_response(),
        CheckInError::InvalidNumber(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::unprocessable(error.to_string())),
        )
            .into_response(),
        CheckInError::DialFailure(_) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::bad_gateway(error.to_string())),
        )
            .into_response(),
        CheckInError::MalformedCallback(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.to_string())),
        )
            .into_response(),
        CheckInError::NoEmergencyContact | CheckInError::Store(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal(error.to_string())),
        )
            .into_response(),
    }
}
