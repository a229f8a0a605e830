//! Shared utilities for invezt
//!
//! This crate provides common functionality used across the invezt workspace,
//! including logging setup and environment-based configuration helpers.

pub mod config;
pub mod logging;

pub use config::{EnvError, env_or, env_parse, load_dotenv};
pub use logging::{LogFormat, init_tracing};
