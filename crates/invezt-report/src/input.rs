//! Ticker input field

/// Placeholder shown while the field is empty
pub const PLACEHOLDER: &str = "Enter Stock Symbol (e.g., AAPL, NVDA)";

/// Hint shown under the field
pub const HINT: &str = "AI-Powered Analysis based on Yahoo Finance data via Google Search";

/// A single free-text value: a ticker or a company name
///
/// There is no format validation. The only gate is that the trimmed value is
/// non-empty and no request is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockInput {
    value: String,
}

impl StockInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current raw value, untrimmed
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value. Ignored while loading; returns whether it took effect.
    pub fn edit(&mut self, value: impl Into<String>, loading: bool) -> bool {
        if !self.input_enabled(loading) {
            return false;
        }
        self.value = value.into();
        true
    }

    pub fn input_enabled(&self, loading: bool) -> bool {
        !loading
    }

    pub fn submit_enabled(&self, loading: bool) -> bool {
        !loading && !self.value.trim().is_empty()
    }

    /// The trimmed identifier to analyse, if submission is allowed
    pub fn submission(&self, loading: bool) -> Option<&str> {
        self.submit_enabled(loading).then(|| self.value.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_is_trimmed() {
        let mut input = StockInput::new();
        assert!(input.edit("  nvda \n", false));
        assert_eq!(input.submission(false), Some("nvda"));
        assert_eq!(input.value(), "  nvda \n");
    }

    #[test]
    fn test_blank_input_is_inert() {
        let mut input = StockInput::new();
        assert_eq!(input.submission(false), None);

        input.edit("   ", false);
        assert!(!input.submit_enabled(false));
        assert_eq!(input.submission(false), None);
    }

    #[test]
    fn test_loading_disables_everything() {
        let mut input = StockInput::new();
        input.edit("AAPL", false);

        assert!(!input.input_enabled(true));
        assert!(!input.submit_enabled(true));
        assert_eq!(input.submission(true), None);
        assert!(!input.edit("MSFT", true));
        assert_eq!(input.value(), "AAPL");
    }

    #[test]
    fn test_no_format_validation() {
        let mut input = StockInput::new();
        input.edit("Berkshire Hathaway B", false);
        assert_eq!(input.submission(false), Some("Berkshire Hathaway B"));
    }
}
