//! Mock call gateway for testing.
//!
//! Records every placed call for assertions and supports error injection.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{
    CallGateway, CallHandle, CallInstruction, GatewayError, PlaceCallRequest, RenderedInstruction,
};

/// Mock call gateway.
///
/// # Example
///
/// ```ignore
/// let mock = MockCallGateway::new();
/// handler_under_test(mock.clone()).await;
/// assert_eq!(mock.placed_calls().len(), 1);
/// ```
#[derive(Default)]
pub struct MockCallGateway {
    calls: Mutex<Vec<PlaceCallRequest>>,
    attempts: Mutex<usize>,
    fail_with: Option<String>,
}

impl MockCallGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway whose every dial fails with the given reason.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            fail_with: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Calls successfully placed so far.
    pub fn placed_calls(&self) -> Vec<PlaceCallRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Dial attempts, including failed ones.
    pub fn attempted_calls(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl CallGateway for MockCallGateway {
    async fn place_call(&self, request: PlaceCallRequest) -> Result<CallHandle, GatewayError> {
        *self.attempts.lock().unwrap() += 1;
        if let Some(reason) = &self.fail_with {
            return Err(GatewayError::DialFailure(reason.clone()));
        }
        let mut calls = self.calls.lock().unwrap();
        calls.push(request);
        Ok(CallHandle {
            call_id: format!("mock-call-{}", calls.len()),
        })
    }

    fn render(&self, instruction: &CallInstruction) -> RenderedInstruction {
        let body = match instruction {
            CallInstruction::SpeakAndCollect { prompt, next } => {
                format!("COLLECT {prompt} [next attempt {}]", next.attempt())
            }
            CallInstruction::SpeakAndHangUp { prompt } => format!("HANGUP {prompt}"),
        };
        RenderedInstruction {
            body,
            content_type: "text/plain",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_placed_calls() {
        let mock = MockCallGateway::new();
        let handle = mock
            .place_call(PlaceCallRequest {
                to: "+5511999999999".to_string(),
                instruction: CallInstruction::SpeakAndHangUp {
                    prompt: "oi".to_string(),
                },
            })
            .await
            .unwrap();

        assert_eq!(handle.call_id, "mock-call-1");
        assert_eq!(mock.placed_calls().len(), 1);
        assert_eq!(mock.attempted_calls(), 1);
    }

    #[tokio::test]
    async fn failing_gateway_counts_attempts_without_recording_calls() {
        let mock = MockCallGateway::failing("no signal");
        let result = mock
            .place_call(PlaceCallRequest {
                to: "+5511999999999".to_string(),
                instruction: CallInstruction::SpeakAndHangUp {
                    prompt: "oi".to_string(),
                },
            })
            .await;

        assert!(matches!(result, Err(GatewayError::DialFailure(_))));
        assert!(mock.placed_calls().is_empty());
        assert_eq!(mock.attempted_calls(), 1);
    }
}
