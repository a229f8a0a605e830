//! Terminal rendering of the application state
//!
//! Rendering is pure: it reads the state and returns text. Nothing here
//! computes, fetches or validates figures beyond formatting them.

mod charts;
mod report;
mod screens;

pub use charts::{pe_comparison, price_trend, risk_return};
pub use report::render_report;
pub use screens::{LOADING_MESSAGE, footer, render_error, render_intro};

use crate::model::Verdict;
use crate::state::{AnalysisState, View};
use console::Style;

const DEFAULT_WIDTH: usize = 80;
const MIN_WIDTH: usize = 40;

/// Styles for every element of the output
#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub heading: Style,
    pub muted: Style,
    pub figure: Style,
    pub error: Style,
    pub buy: Style,
    pub hold: Style,
    pub sell: Style,
}

impl Theme {
    /// Bold headings, dim secondary text, verdict badges by weight
    pub fn styled() -> Self {
        Self {
            title: Style::new().bold(),
            heading: Style::new().bold().underlined(),
            muted: Style::new().dim(),
            figure: Style::new().cyan(),
            error: Style::new().red(),
            buy: Style::new().bold().reverse(),
            hold: Style::new().bold(),
            sell: Style::new().dim(),
        }
    }

    /// No escape codes at all
    pub fn plain() -> Self {
        Self {
            title: Style::new(),
            heading: Style::new(),
            muted: Style::new(),
            figure: Style::new(),
            error: Style::new(),
            buy: Style::new(),
            hold: Style::new(),
            sell: Style::new(),
        }
    }

    pub fn verdict(&self, verdict: Verdict) -> &Style {
        match verdict {
            Verdict::Buy => &self.buy,
            Verdict::Hold => &self.hold,
            Verdict::Sell => &self.sell,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::styled()
    }
}

/// Renders whichever view the state selects
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    theme: Theme,
    width: usize,
}

impl ReportRenderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            width: DEFAULT_WIDTH,
        }
    }

    /// Set the output width in columns
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(MIN_WIDTH);
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Exactly one of intro, loading, error or report
    pub fn render_state(&self, state: &AnalysisState) -> String {
        match state.view() {
            View::Intro => render_intro(&self.theme, self.width),
            View::Loading => LOADING_MESSAGE.to_string(),
            View::Error(message) => render_error(&self.theme, message),
            View::Report(analysis) => render_report(analysis, &self.theme, self.width),
        }
    }
}

impl Default for ReportRenderer {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

/// Greedy word wrap; line breaks in the input start new lines
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_len = 0;
        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            if line_len > 0 && line_len + 1 + word_len > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.push_str(word);
            line_len += word_len;
        }
        lines.push(line);
    }

    lines
}
