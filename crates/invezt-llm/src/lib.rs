//! LLM provider abstraction layer for invezt
//!
//! This crate provides provider-agnostic abstractions for sending a single
//! completion request to a hosted Large Language Model. It includes:
//!
//! - Message types for LLM communication
//! - Completion request/response types
//! - Hosted tool directives (provider-side web search)
//! - Provider trait for LLM implementations
//! - Concrete provider implementations (behind feature flags)

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod tools;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{ContentBlock, Message, MessageContent, Role};
pub use provider::LLMProvider;
pub use tools::HostedTool;

// Provider implementations (feature-gated)
#[cfg(any(feature = "gemini", feature = "anthropic"))]
pub mod providers;
