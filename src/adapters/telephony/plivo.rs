//! Plivo call gateway adapter.
//!
//! Implements `CallGateway` against the Plivo voice API: outbound calls are
//! placed through the REST Call endpoint, and callback answers are rendered
//! as Plivo XML (`<Speak>` and `<GetInput inputType="speech">`, pt-BR voice).
//! All session state is encoded into the answer/action URLs, so the adapter
//! itself is stateless.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use uuid::Uuid;

use crate::config::TelephonyConfig;
use crate::ports::{
    CallGateway, CallHandle, CallInstruction, GatewayError, PlaceCallRequest, RenderedInstruction,
};

/// Plivo gateway configuration.
#[derive(Clone)]
pub struct PlivoConfig {
    auth_id: String,
    auth_token: SecretString,
    caller_number: String,
    /// Public base URL our callback endpoints are reachable at.
    callback_base_url: String,
    /// Base URL of the Plivo REST API (overridable for tests).
    api_base_url: String,
    speech_timeout_secs: u64,
}

impl PlivoConfig {
    pub fn new(
        auth_id: impl Into<String>,
        auth_token: impl Into<String>,
        caller_number: impl Into<String>,
        callback_base_url: impl Into<String>,
    ) -> Self {
        Self {
            auth_id: auth_id.into(),
            auth_token: SecretString::new(auth_token.into()),
            caller_number: caller_number.into(),
            callback_base_url: callback_base_url.into(),
            api_base_url: "https://api.plivo.com".to_string(),
            speech_timeout_secs: 5,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_speech_timeout(mut self, secs: u64) -> Self {
        self.speech_timeout_secs = secs;
        self
    }
}

impl From<&TelephonyConfig> for PlivoConfig {
    fn from(config: &TelephonyConfig) -> Self {
        Self {
            auth_id: config.auth_id.clone(),
            auth_token: config.auth_token.clone(),
            caller_number: config.caller_number.clone(),
            callback_base_url: config.base_url_trimmed().to_string(),
            api_base_url: "https://api.plivo.com".to_string(),
            speech_timeout_secs: config.speech_timeout_secs,
        }
    }
}

/// Plivo call gateway adapter.
pub struct PlivoCallGateway {
    config: PlivoConfig,
    http_client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct PlivoCallResponse {
    request_uuid: Option<String>,
}

impl PlivoCallGateway {
    pub fn new(config: PlivoConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// URL the provider fetches when the call is answered.
    ///
    /// The full instruction (prompt plus correlator, or hang-up marker) is
    /// encoded into the query so the answer endpoint can re-render it
    /// without any server-side call state.
    fn answer_url(&self, instruction: &CallInstruction) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        match instruction {
            CallInstruction::SpeakAndCollect { prompt, next } => {
                pairs.push(("prompt", prompt.clone()));
                pairs.extend(next.query_pairs());
            }
            CallInstruction::SpeakAndHangUp { prompt } => {
                pairs.push(("prompt", prompt.clone()));
                pairs.push(("hangup", "1".to_string()));
            }
        }
        format!(
            "{}/callbacks/answer?{}",
            self.config.callback_base_url,
            encode_query(&pairs)
        )
    }

    /// Action URL the speech-collection result is posted to.
    fn speech_action_url(&self, next: &crate::domain::checkin::Correlator) -> String {
        format!(
            "{}/callbacks/speech?{}",
            self.config.callback_base_url,
            encode_query(&next.query_pairs())
        )
    }
}

#[async_trait]
impl CallGateway for PlivoCallGateway {
    async fn place_call(&self, request: PlaceCallRequest) -> Result<CallHandle, GatewayError> {
        let url = format!(
            "{}/v1/Account/{}/Call/",
            self.config.api_base_url, self.config.auth_id
        );
        let body = serde_json::json!({
            "from": self.config.caller_number,
            "to": request.to,
            "answer_url": self.answer_url(&request.instruction),
            "answer_method": "POST",
        });

        let response = self
            .http_client
            .post(&url)
            .basic_auth(
                &self.config.auth_id,
                Some(self.config.auth_token.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::DialFailure(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(GatewayError::DialFailure(format!(
                "provider returned {status}: {detail}"
            )));
        }

        let parsed: PlivoCallResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::DialFailure(e.to_string()))?;

        Ok(CallHandle {
            call_id: parsed
                .request_uuid
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
        })
    }

    fn render(&self, instruction: &CallInstruction) -> RenderedInstruction {
        let body = match instruction {
            CallInstruction::SpeakAndCollect { prompt, next } => format!(
                "<Response>\
                 <GetInput action=\"{action}\" method=\"POST\" inputType=\"speech\" \
                 language=\"pt-BR\" speechEndTimeout=\"{timeout}\">\
                 <Speak language=\"pt-BR\" voice=\"WOMAN\">{prompt}</Speak>\
                 </GetInput>\
                 </Response>",
                action = xml_escape(&self.speech_action_url(next)),
                timeout = self.config.speech_timeout_secs,
                prompt = xml_escape(prompt),
            ),
            CallInstruction::SpeakAndHangUp { prompt } => format!(
                "<Response>\
                 <Speak language=\"pt-BR\" voice=\"WOMAN\">{prompt}</Speak>\
                 </Response>",
                prompt = xml_escape(prompt),
            ),
        };
        RenderedInstruction {
            body,
            content_type: "text/xml",
        }
    }
}

fn encode_query(pairs: &[(&str, String)]) -> String {
    serde_urlencoded::to_string(pairs).unwrap_or_default()
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
