//! Provider seam

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// A hosted model service
///
/// One call is one HTTP round trip. Hosted tools named in the request run on
/// the provider's side before the answer comes back. A response that carries
/// no text is returned as such; deciding whether that is an error is up to
/// the caller.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Short identifier used in logs, e.g. "gemini"
    fn name(&self) -> &str;
}
