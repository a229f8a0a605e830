//! One-shot completion request and response types
//!
//! A request is a single round trip: no streaming, no client-side tool loop.
//! Anything the model needs to look up happens through [`HostedTool`]s that
//! the provider runs on its own side.

use crate::{HostedTool, Message};
use serde::{Deserialize, Serialize};

/// Output ceiling used when the caller does not set one
pub const DEFAULT_MAX_TOKENS: usize = 1024;

/// A single completion call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier, passed to the provider untouched
    pub model: String,

    /// Conversation so far; usually one user message
    pub messages: Vec<Message>,

    /// Output token ceiling
    pub max_tokens: usize,

    /// Provider-side tools enabled for this call
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosted_tools: Vec<HostedTool>,
}

impl CompletionRequest {
    pub fn builder(model: impl Into<String>) -> CompletionRequestBuilder {
        CompletionRequestBuilder {
            request: Self {
                model: model.into(),
                messages: Vec::new(),
                max_tokens: DEFAULT_MAX_TOKENS,
                hosted_tools: Vec::new(),
            },
        }
    }

    /// Whether the given hosted tool is enabled
    pub fn uses(&self, tool: HostedTool) -> bool {
        self.hosted_tools.contains(&tool)
    }
}

/// Builder for [`CompletionRequest`]
#[derive(Debug)]
pub struct CompletionRequestBuilder {
    request: CompletionRequest,
}

impl CompletionRequestBuilder {
    pub fn add_message(mut self, message: Message) -> Self {
        self.request.messages.push(message);
        self
    }

    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.request.max_tokens = max_tokens;
        self
    }

    /// Enable a hosted tool; enabling it twice is a no-op
    pub fn hosted_tool(mut self, tool: HostedTool) -> Self {
        if !self.request.uses(tool) {
            self.request.hosted_tools.push(tool);
        }
        self
    }

    pub fn build(self) -> CompletionRequest {
        self.request
    }
}

/// What came back from one completion call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Assistant message; its content may be absent
    pub message: Message,

    pub stop_reason: StopReason,

    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Whether the answer was cut off by the output ceiling
    pub fn is_truncated(&self) -> bool {
        self.stop_reason == StopReason::MaxTokens
    }

    /// Whether the provider yielded before the answer was finished
    pub fn is_paused(&self) -> bool {
        self.stop_reason == StopReason::Paused
    }
}

/// Why generation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The model finished its answer
    EndTurn,

    /// Hit the output token ceiling
    MaxTokens,

    /// The provider's hosted tool loop yielded mid-answer
    Paused,

    /// Withheld by the provider's safety filters
    Refusal,
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: usize,
    pub output_tokens: usize,
}

impl TokenUsage {
    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let request = CompletionRequest::builder("gemini-3-pro-preview")
            .add_message(Message::user("Analyze NVDA"))
            .build();

        assert_eq!(request.model, "gemini-3-pro-preview");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.max_tokens, DEFAULT_MAX_TOKENS);
        assert!(!request.uses(HostedTool::WebSearch));
    }

    #[test]
    fn test_hosted_tool_added_once() {
        let request = CompletionRequest::builder("m")
            .hosted_tool(HostedTool::WebSearch)
            .hosted_tool(HostedTool::WebSearch)
            .max_tokens(8192)
            .build();

        assert_eq!(request.hosted_tools, vec![HostedTool::WebSearch]);
        assert_eq!(request.max_tokens, 8192);
    }

    #[test]
    fn test_truncation_and_usage() {
        let response = CompletionResponse {
            message: Message::assistant("{\"ticker\":"),
            stop_reason: StopReason::MaxTokens,
            usage: TokenUsage {
                input_tokens: 900,
                output_tokens: 8192,
            },
        };

        assert!(response.is_truncated());
        assert!(!response.is_paused());
        assert_eq!(response.usage.total(), 9092);
    }
}
