//! Scripted provider shared by the unit tests

use async_trait::async_trait;
use invezt_llm::{
    CompletionRequest, CompletionResponse, LLMError, LLMProvider, Message, StopReason, TokenUsage,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays queued answers in order and records every request it sees
#[derive(Default)]
pub(crate) struct ScriptedProvider {
    replies: Mutex<VecDeque<invezt_llm::Result<(Message, StopReason)>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_text(&self, text: impl Into<String>) {
        self.push(Ok((Message::assistant(text), StopReason::EndTurn)));
    }

    /// Queue text that came back with the given stop reason
    pub(crate) fn push_stopped(&self, text: impl Into<String>, stop_reason: StopReason) {
        self.push(Ok((Message::assistant(text), stop_reason)));
    }

    pub(crate) fn push_no_text(&self) {
        self.push(Ok((Message::empty_assistant(), StopReason::EndTurn)));
    }

    pub(crate) fn push_error(&self, error: LLMError) {
        self.push(Err(error));
    }

    fn push(&self, reply: invezt_llm::Result<(Message, StopReason)>) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> invezt_llm::Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request);

        let (message, stop_reason) = self.replies.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(LLMError::UnexpectedResponse(
                "no scripted reply left".to_string(),
            ))
        })?;

        Ok(CompletionResponse {
            message,
            stop_reason,
            usage: TokenUsage::default(),
        })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
