//! Wire types for check-in and callback endpoints.

use serde::{Deserialize, Serialize};

/// Query parameters of a provider speech callback.
///
/// Carries the correlator (`stage`, `contact`, `attempt`) that was armed in
/// the previous instruction, plus optional fallbacks for providers that put
/// the result in the query instead of the form body.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CallbackQuery {
    pub stage: Option<String>,
    pub contact: Option<String>,
    pub attempt: Option<u32>,
    #[serde(rename = "SpeechResult")]
    pub speech_result: Option<String>,
    #[serde(rename = "To")]
    pub to: Option<String>,
}

/// Form body of a provider speech callback.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CallbackForm {
    #[serde(rename = "SpeechResult")]
    pub speech_result: Option<String>,
    #[serde(rename = "To")]
    pub to: Option<String>,
}

/// Query parameters of the call-answered webhook.
///
/// The instruction to open the call with was encoded into the answer URL
/// when the call was placed.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AnswerQuery {
    pub prompt: Option<String>,
    pub hangup: Option<String>,
    pub stage: Option<String>,
    pub contact: Option<String>,
    pub attempt: Option<u32>,
}

/// Response to a successfully started check-in.
#[derive(Debug, Clone, Serialize)]
pub struct StartCheckInResponse {
    pub contact: String,
    pub phone_number: String,
    pub call_id: String,
}
