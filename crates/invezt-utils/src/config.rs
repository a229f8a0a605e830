//! Environment-based configuration helpers

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// The variable is set but its value does not parse
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },
}

/// Load a `.env` file from the working directory or its parents, if any
///
/// Variables already present in the process environment are not overridden.
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(_) => None,
    }
}

/// Read a variable, falling back to `default` when unset or blank
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Read and parse a variable; `Ok(None)` when unset or blank
pub fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>, EnvError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| EnvError::Invalid {
                    key: key.to_string(),
                    value,
                })
        }
        _ => Ok(None),
    }
}
