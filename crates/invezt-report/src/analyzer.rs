//! Single-shot analysis requests

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::model::InvestmentAnalysis;
use crate::prompts::render_analysis_prompt;
use invezt_llm::{CompletionRequest, HostedTool, LLMProvider, Message};
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

/// Sends one search-grounded request per call and decodes the answer
///
/// No caching and no retry: analysing the same ticker twice issues two
/// independent requests.
pub struct StockAnalyzer {
    provider: Arc<dyn LLMProvider>,
    config: Arc<AnalysisConfig>,
}

impl StockAnalyzer {
    /// Create an analyzer over the given provider
    pub fn new(provider: Arc<dyn LLMProvider>, config: Arc<AnalysisConfig>) -> Self {
        Self { provider, config }
    }

    /// Create an analyzer with the provider the configuration names
    pub fn from_config(config: AnalysisConfig) -> Result<Self> {
        let provider = config.build_provider()?;
        Ok(Self::new(provider, Arc::new(config)))
    }

    /// The configuration in use
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// The request sent for `ticker`
    pub fn build_request(&self, ticker: &str) -> Result<CompletionRequest> {
        let prompt = render_analysis_prompt(ticker)?;

        Ok(CompletionRequest::builder(&self.config.model)
            .add_message(Message::user(prompt))
            .hosted_tool(HostedTool::WebSearch)
            .max_tokens(self.config.max_tokens)
            .build())
    }

    /// Analyse one ticker or company name
    #[instrument(skip(self), fields(provider = %self.provider.name(), model = %self.config.model))]
    pub async fn analyze(&self, ticker: &str) -> Result<InvestmentAnalysis> {
        let request = self.build_request(ticker)?;

        let response = self.provider.complete(request).await.map_err(|e| {
            error!("Model request failed: {e}");
            AnalysisError::from(e)
        })?;

        debug!(
            stop_reason = ?response.stop_reason,
            tokens = response.usage.total(),
            "Model responded"
        );
        if response.is_truncated() {
            warn!(max_tokens = self.config.max_tokens, "Answer hit the output token ceiling");
        }
        if response.is_paused() {
            warn!("Provider paused before the answer was finished");
        }

        let text = response
            .message
            .text()
            .filter(|text| !text.trim().is_empty())
            .ok_or(AnalysisError::EmptyResponse)?;

        InvestmentAnalysis::from_json(strip_code_fences(&text)).inspect_err(|e| {
            error!(error = ?e, raw = %text, "Failed to decode analysis");
        })
    }
}

/// Remove a markdown code fence wrapped around the payload
///
/// Handles a leading ```` ```json ```` or ```` ``` ```` and a trailing
/// ```` ``` ````, plus surrounding whitespace. Anything else is left for the
/// decoder to reject.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed)
        .trim_end();
    body.strip_suffix("```").unwrap_or(body).trim()
}
