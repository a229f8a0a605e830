//! Non-report screens: intro, loading, error and footer

use super::{Theme, wrap};

/// Shown next to the spinner while a request is in flight
pub const LOADING_MESSAGE: &str = "Consulting the market...";

const HEADLINE: &str = "Market clarity, distilled.";
const INTRO: &str = "Enter a ticker symbol to generate a comprehensive, institutional-grade \
investment memo. We analyze price action, valuation multiples, and risk metrics to provide a \
clear thesis.";

pub fn render_intro(theme: &Theme, width: usize) -> String {
    let mut out = format!("{}\n\n", theme.title.apply_to(HEADLINE));
    for line in wrap(INTRO, width) {
        out.push_str(&format!("{}\n", theme.muted.apply_to(line)));
    }
    out
}

pub fn render_error(theme: &Theme, message: &str) -> String {
    theme.error.apply_to(message).to_string()
}

/// Footer line with the copyright year
pub fn footer(theme: &Theme, year: i32) -> String {
    theme
        .muted
        .apply_to(format!(
            "© {year} Invezt Pro. Not financial advice. Data provided by AI research."
        ))
        .to_string()
}
