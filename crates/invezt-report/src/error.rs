//! Error types for stock analysis operations

use invezt_llm::LLMError;
use thiserror::Error;

/// Shown when an error renders to an empty string
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred while fetching data.";

/// Analysis request errors
///
/// The parse family (`Parse`, `Schema`, `InvalidField`) shares one user-facing
/// message; the detail is kept on the variant for logs.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The model returned no text at all
    #[error("No response received from AI.")]
    EmptyResponse,

    /// The text is not syntactically valid JSON
    #[error("Failed to parse analysis data. Please try again.")]
    Parse { detail: String },

    /// Valid JSON that does not match the report shape
    #[error("Failed to parse analysis data. Please try again.")]
    Schema { detail: String },

    /// Decoded, but a field holds an unusable value
    #[error("Failed to parse analysis data. Please try again.")]
    InvalidField { field: String, reason: String },

    /// Transport or service failure, passed through untouched
    #[error(transparent)]
    Llm(#[from] LLMError),

    /// Prompt template failed to render
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalysisError {
    /// Whether the model answered but the answer could not be used
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::Schema { .. } | Self::InvalidField { .. }
        )
    }

    /// The single string shown to the user
    pub fn user_message(&self) -> String {
        display_message(&self.to_string())
    }
}

/// Turn any error text into what the user sees
pub fn display_message(raw: &str) -> String {
    if raw.trim().is_empty() {
        UNEXPECTED_ERROR_MESSAGE.to_string()
    } else {
        raw.to_string()
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Data => Self::Schema {
                detail: err.to_string(),
            },
            Category::Syntax | Category::Eof | Category::Io => Self::Parse {
                detail: err.to_string(),
            },
        }
    }
}

impl From<minijinja::Error> for AnalysisError {
    fn from(err: minijinja::Error) -> Self {
        Self::Prompt(err.to_string())
    }
}

impl From<invezt_utils::EnvError> for AnalysisError {
    fn from(err: invezt_utils::EnvError) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
