//! Call gateway port for the voice provider.
//!
//! The state machine only ever asks two things of a provider: speak a prompt
//! and collect an utterance (re-arming the next callback with a correlator),
//! or speak a prompt and hang up. Adapters translate those into vendor wire
//! formats; the core is written once against this contract.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::checkin::Correlator;

/// Port for placing calls and rendering provider answer documents.
#[async_trait]
pub trait CallGateway: Send + Sync {
    /// Places an outbound call that opens with the given instruction.
    ///
    /// Side effect: a real-world phone call. One explicit invocation places
    /// exactly one call; a `DialFailure` is surfaced to the caller and never
    /// retried here.
    async fn place_call(&self, request: PlaceCallRequest) -> Result<CallHandle, GatewayError>;

    /// Renders an instruction as the provider's answer-document payload.
    ///
    /// Used to respond to inbound callbacks: a "speak and collect again"
    /// directive carrying the next correlator, or a "hang up" directive.
    fn render(&self, instruction: &CallInstruction) -> RenderedInstruction;
}

/// A request to place one outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceCallRequest {
    /// Destination number in E.164 format.
    pub to: String,
    /// What the call does once answered.
    pub instruction: CallInstruction,
}

/// What a call or callback response should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallInstruction {
    /// Speak the prompt, then collect speech; the transcription callback
    /// carries `next` so the session can be reconstructed.
    SpeakAndCollect { prompt: String, next: Correlator },
    /// Speak the prompt, then end the call. Every terminal path uses this:
    /// a call is never left silent.
    SpeakAndHangUp { prompt: String },
}

impl CallInstruction {
    pub fn prompt(&self) -> &str {
        match self {
            CallInstruction::SpeakAndCollect { prompt, .. } => prompt,
            CallInstruction::SpeakAndHangUp { prompt } => prompt,
        }
    }
}

/// Handle for a placed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallHandle {
    /// Provider-assigned (or locally generated) call identifier.
    pub call_id: String,
}

/// A rendered provider answer document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedInstruction {
    pub body: String,
    pub content_type: &'static str,
}

/// Errors from the voice provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The provider could not place the call.
    #[error("Dial failure: {0}")]
    DialFailure(String),
}
