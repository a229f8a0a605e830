//! Configuration for analysis requests

use crate::error::{AnalysisError, Result};
use invezt_llm::LLMProvider;
use invezt_llm::providers::{AnthropicConfig, AnthropicProvider, GeminiConfig, GeminiProvider};
use invezt_utils::{env_or, env_parse};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Model service that performs the analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LlmBackend {
    /// Google Gemini with Google Search grounding (default)
    #[default]
    Gemini,
    /// Anthropic Claude with the web search server tool
    Anthropic,
}

impl LlmBackend {
    /// Model used when none is configured
    pub fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => "gemini-3-pro-preview",
            Self::Anthropic => "claude-sonnet-4-5-20250929",
        }
    }
}

impl FromStr for LlmBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            other => Err(format!(
                "unknown provider '{other}' (expected 'gemini' or 'anthropic')"
            )),
        }
    }
}

impl fmt::Display for LlmBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::Anthropic => write!(f, "anthropic"),
        }
    }
}

/// Configuration for analysis requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Which service answers the request
    pub backend: LlmBackend,

    /// Model identifier sent with every request
    pub model: String,

    /// Base URL override for the provider
    pub api_base: Option<String>,

    /// HTTP timeout for the single request
    pub request_timeout: Duration,

    /// Output token ceiling
    pub max_tokens: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            backend: LlmBackend::Gemini,
            model: LlmBackend::Gemini.default_model().to_string(),
            api_base: None,
            request_timeout: Duration::from_secs(180),
            max_tokens: 8192,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Configuration from `INVEZT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env()?.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(AnalysisError::Config("model must not be empty".to_string()));
        }

        if self.max_tokens == 0 {
            return Err(AnalysisError::Config(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(AnalysisError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the provider for the configured backend
    ///
    /// Credentials come from the provider's own environment variables. A
    /// missing key is not reported here; the service rejects the request.
    pub fn build_provider(&self) -> Result<Arc<dyn LLMProvider>> {
        let timeout = self.request_timeout.as_secs().max(1);

        let provider: Arc<dyn LLMProvider> = match self.backend {
            LlmBackend::Gemini => {
                let mut config = GeminiConfig::from_env().with_timeout(timeout);
                if let Some(base) = &self.api_base {
                    config = config.with_api_base(base);
                }
                Arc::new(GeminiProvider::with_config(config)?)
            }
            LlmBackend::Anthropic => {
                let mut config = AnthropicConfig::from_env().with_timeout(timeout);
                if let Some(base) = &self.api_base {
                    config = config.with_api_base(base);
                }
                Arc::new(AnthropicProvider::with_config(config)?)
            }
        };

        Ok(provider)
    }
}

/// Builder for AnalysisConfig
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    backend: Option<LlmBackend>,
    model: Option<String>,
    api_base: Option<String>,
    request_timeout: Option<Duration>,
    max_tokens: Option<usize>,
}

impl AnalysisConfigBuilder {
    /// Set the backend
    pub fn backend(mut self, backend: LlmBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the provider base URL
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Set the request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the output token ceiling
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Fill unset values from the environment
    ///
    /// Reads `INVEZT_PROVIDER`, `INVEZT_MODEL`, `INVEZT_API_BASE`,
    /// `INVEZT_TIMEOUT_SECS` and `INVEZT_MAX_TOKENS`. Values already set on
    /// the builder win.
    pub fn with_env(self) -> Result<Self> {
        self.with_env_prefix("INVEZT")
    }

    fn with_env_prefix(mut self, prefix: &str) -> Result<Self> {
        let key = |name: &str| format!("{prefix}_{name}");

        if self.backend.is_none() {
            self.backend = env_parse::<LlmBackend>(&key("PROVIDER"))?;
        }
        if self.model.is_none() {
            self.model = Some(env_or(&key("MODEL"), "")).filter(|m| !m.is_empty());
        }
        if self.api_base.is_none() {
            self.api_base = Some(env_or(&key("API_BASE"), "")).filter(|b| !b.is_empty());
        }
        if self.request_timeout.is_none() {
            self.request_timeout =
                env_parse::<u64>(&key("TIMEOUT_SECS"))?.map(Duration::from_secs);
        }
        if self.max_tokens.is_none() {
            self.max_tokens = env_parse::<usize>(&key("MAX_TOKENS"))?;
        }
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<AnalysisConfig> {
        let defaults = AnalysisConfig::default();
        let backend = self.backend.unwrap_or(defaults.backend);

        let config = AnalysisConfig {
            backend,
            model: self
                .model
                .unwrap_or_else(|| backend.default_model().to_string()),
            api_base: self.api_base,
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.backend, LlmBackend::Gemini);
        assert_eq!(config.model, "gemini-3-pro-preview");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_defaults_model_per_backend() {
        let config = AnalysisConfig::builder()
            .backend(LlmBackend::Anthropic)
            .build()
            .unwrap();
        assert_eq!(config.model, LlmBackend::Anthropic.default_model());

        let config = AnalysisConfig::builder()
            .backend(LlmBackend::Anthropic)
            .model("claude-opus-4-5-20251101")
            .max_tokens(2048)
            .build()
            .unwrap();
        assert_eq!(config.model, "claude-opus-4-5-20251101");
        assert_eq!(config.max_tokens, 2048);
    }

    #[test]
    fn test_validation() {
        assert!(AnalysisConfig::builder().model("  ").build().is_err());
        assert!(AnalysisConfig::builder().max_tokens(0).build().is_err());
        assert!(
            AnalysisConfig::builder()
                .request_timeout(Duration::ZERO)
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("Gemini".parse::<LlmBackend>(), Ok(LlmBackend::Gemini));
        assert_eq!("claude".parse::<LlmBackend>(), Ok(LlmBackend::Anthropic));
        assert!("openai".parse::<LlmBackend>().is_err());
        assert_eq!(LlmBackend::Anthropic.to_string(), "anthropic");
    }

    #[test]
    fn test_env_fills_unset_fields() {
        // SAFETY: each test uses its own variable prefix
        unsafe {
            std::env::set_var("INVEZT_CFG_FILL_PROVIDER", "claude");
            std::env::set_var("INVEZT_CFG_FILL_MODEL", "claude-opus-4-5-20251101");
            std::env::set_var("INVEZT_CFG_FILL_API_BASE", "http://127.0.0.1:9");
            std::env::set_var("INVEZT_CFG_FILL_TIMEOUT_SECS", "30");
            std::env::set_var("INVEZT_CFG_FILL_MAX_TOKENS", "4096");
        }

        let config = AnalysisConfig::builder()
            .with_env_prefix("INVEZT_CFG_FILL")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.backend, LlmBackend::Anthropic);
        assert_eq!(config.model, "claude-opus-4-5-20251101");
        assert_eq!(config.api_base.as_deref(), Some("http://127.0.0.1:9"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.max_tokens, 4096);
    }

    #[test]
    fn test_builder_values_beat_env() {
        // SAFETY: each test uses its own variable prefix
        unsafe {
            std::env::set_var("INVEZT_CFG_CLI_PROVIDER", "anthropic");
            std::env::set_var("INVEZT_CFG_CLI_MODEL", "claude-opus-4-5-20251101");
            std::env::set_var("INVEZT_CFG_CLI_MAX_TOKENS", "4096");
        }

        let config = AnalysisConfig::builder()
            .backend(LlmBackend::Gemini)
            .model("gemini-2.5-pro")
            .with_env_prefix("INVEZT_CFG_CLI")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config.backend, LlmBackend::Gemini);
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.max_tokens, 4096);
        assert!(config.api_base.is_none());
    }

    #[test]
    fn test_env_without_values_keeps_defaults() {
        let config = AnalysisConfig::builder()
            .with_env_prefix("INVEZT_CFG_UNSET")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_bad_env_value_is_config_error() {
        // SAFETY: each test uses its own variable prefix
        unsafe {
            std::env::set_var("INVEZT_CFG_BAD_TIMEOUT_SECS", "soon");
            std::env::set_var("INVEZT_CFG_BADP_PROVIDER", "openai");
        }

        let err = AnalysisConfig::builder()
            .with_env_prefix("INVEZT_CFG_BAD")
            .unwrap_err();
        match err {
            AnalysisError::Config(msg) => assert!(msg.contains("INVEZT_CFG_BAD_TIMEOUT_SECS")),
            other => panic!("Expected Config error, got {other:?}"),
        }

        assert!(matches!(
            AnalysisConfig::builder().with_env_prefix("INVEZT_CFG_BADP"),
            Err(AnalysisError::Config(_))
        ));

        // An explicit value means the bad variable is never read
        assert!(
            AnalysisConfig::builder()
                .request_timeout(Duration::from_secs(5))
                .with_env_prefix("INVEZT_CFG_BAD")
                .is_ok()
        );
    }

    #[test]
    fn test_build_provider_without_key() {
        let config = AnalysisConfig::builder()
            .api_base("http://127.0.0.1:9")
            .build()
            .unwrap();
        let provider = config.build_provider().unwrap();
        assert_eq!(provider.name(), "gemini");
    }
}
