//! Search-grounded equity research reports
//!
//! This crate turns one free-text ticker or company name into a structured
//! investment memo. It includes:
//!
//! - A fixed research brief rendered with minijinja
//! - One search-grounded model request per submission (Gemini or Anthropic)
//! - Validate-then-construct decoding of the JSON answer
//! - An explicit `Idle / Loading / Loaded / Error` state machine
//! - Terminal rendering of the memo, metrics grid and text charts
//!
//! # Example
//!
//! ```rust,ignore
//! use invezt_report::{AnalysisConfig, AnalysisSession, ReportRenderer, StockAnalyzer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let analyzer = StockAnalyzer::from_config(AnalysisConfig::from_env()?)?;
//!     let mut session = AnalysisSession::new(analyzer);
//!     let renderer = ReportRenderer::default();
//!
//!     session.edit_input("NVDA");
//!     session
//!         .submit(|s| println!("{}", renderer.render_state(s.state())))
//!         .await;
//!
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod prompts;
pub mod render;
pub mod session;
pub mod state;

#[cfg(test)]
mod test_support;

// Re-export main types for convenience
pub use analyzer::{StockAnalyzer, strip_code_fences};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, LlmBackend};
pub use error::{AnalysisError, Result};
pub use input::StockInput;
pub use model::{
    ChartData, ChartPoint, InvestmentAnalysis, Metrics, RiskMetrics, ValuationMetrics, Verdict,
};
pub use render::{ReportRenderer, Theme};
pub use session::AnalysisSession;
pub use state::{AnalysisState, View};
