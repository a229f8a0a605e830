//! Analysis session: owns the input and the state machine

use crate::analyzer::StockAnalyzer;
use crate::input::StockInput;
use crate::state::AnalysisState;
use tracing::{info, warn};

/// Single-user controller driving one request at a time
///
/// `submit` holds `&mut self` across the await, so a second submission cannot
/// start while one is in flight.
pub struct AnalysisSession {
    analyzer: StockAnalyzer,
    input: StockInput,
    state: AnalysisState,
}

impl AnalysisSession {
    pub fn new(analyzer: StockAnalyzer) -> Self {
        Self {
            analyzer,
            input: StockInput::new(),
            state: AnalysisState::Idle,
        }
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    pub fn input(&self) -> &StockInput {
        &self.input
    }

    pub fn analyzer(&self) -> &StockAnalyzer {
        &self.analyzer
    }

    pub fn input_enabled(&self) -> bool {
        self.input.input_enabled(self.state.is_loading())
    }

    pub fn submit_enabled(&self) -> bool {
        self.input.submit_enabled(self.state.is_loading())
    }

    /// Replace the input text; ignored while loading
    pub fn edit_input(&mut self, value: impl Into<String>) -> bool {
        let loading = self.state.is_loading();
        self.input.edit(value, loading)
    }

    /// Submit the current input
    ///
    /// Returns `false` without touching the state when there is nothing to
    /// submit. Otherwise moves to `Loading`, calls `observe`, awaits the
    /// analysis, moves to `Loaded` or `Error` and calls `observe` again.
    pub async fn submit<F>(&mut self, mut observe: F) -> bool
    where
        F: FnMut(&AnalysisSession),
    {
        let Some(ticker) = self
            .input
            .submission(self.state.is_loading())
            .map(str::to_owned)
        else {
            return false;
        };

        info!(%ticker, "Submitting analysis");
        self.state = AnalysisState::Loading;
        observe(&*self);

        self.state = match self.analyzer.analyze(&ticker).await {
            Ok(analysis) => {
                info!(ticker = %analysis.ticker, verdict = %analysis.verdict, "Analysis loaded");
                AnalysisState::Loaded(Box::new(analysis))
            }
            Err(e) => {
                warn!(%ticker, error = %e, "Analysis failed");
                AnalysisState::Error(e.user_message())
            }
        };
        observe(&*self);

        true
    }
}
