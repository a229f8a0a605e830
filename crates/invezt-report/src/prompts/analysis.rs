//! Equity research brief sent for every analysis

use crate::error::Result;
use minijinja::{Environment, context};

/// The brief, with `{{ ticker }}` as its only variable
///
/// The JSON skeleton mirrors [`crate::InvestmentAnalysis`] field for field.
pub const ANALYSIS_TEMPLATE: &str = r#"
Act as a senior Wall Street equity research analyst.
Conduct a deep dive investment analysis for the company with ticker or name: "{{ ticker }}".

You MUST use Google Search to find the most recent and accurate data from sources like Yahoo Finance, Bloomberg, or Reuters.

Perform the following specific checks:
1. **Price History (2 Years)**: Analyze if there are patterns in stock price movements, specifically checking if gains are concentrated around earnings releases.
2. **Valuation**: Compare the current P/E ratio to the S&P 500 benchmark and its specific sector average.
3. **Risk/Return**: Find the Alpha and Beta. Assess if the stock is high beta (volatile) or low beta (defensive).
4. **Earnings**: Analyze recent financial reports. Are there hidden risks or opportunities?

**Output Format Rule:**
You MUST return the result strictly as a valid JSON object. Do not wrap it in markdown code blocks. Just the raw JSON string.
The JSON must match this structure:
{
  "ticker": "Symbol",
  "companyName": "Full Name",
  "currentPrice": "Price with currency",
  "executiveSummary": "A concise, professional summary of the investment thesis (approx 100 words).",
  "priceTrendAnalysis": "Detailed text analyzing price patterns, volatility, and post-earnings behavior.",
  "valuationAnalysis": "Text comparing valuation metrics to peers and historical averages.",
  "riskAnalysis": "Text explaining the Alpha/Beta profile and what it means for an investor.",
  "earningsAnalysis": "Insights derived from the latest balance sheet/income statement.",
  "verdict": "BUY" or "HOLD" or "SELL",
  "chartData": {
    "priceHistory": [
      {"x": "2023-01", "y": 100},
      ... generate about 24 representative data points (one per month) for the last 2 years based on the real trend you found ...
    ]
  },
  "metrics": {
    "valuation": {
      "peRatio": number,
      "sectorPe": number,
      "pbRatio": number (optional),
      "pegRatio": number (optional)
    },
    "risk": {
      "alpha": number,
      "beta": number,
      "sharpeRatio": number (optional)
    }
  }
}
"#;

/// Render the brief for one ticker or company name
///
/// The input is interpolated verbatim; no case folding or trimming.
pub fn render_analysis_prompt(ticker: &str) -> Result<String> {
    let env = Environment::new();
    Ok(env.render_str(ANALYSIS_TEMPLATE, context! { ticker => ticker })?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_is_interpolated_verbatim() {
        let prompt = render_analysis_prompt("Berkshire Hathaway B").unwrap();
        assert!(prompt.contains("ticker or name: \"Berkshire Hathaway B\"."));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn test_template_syntax_in_input_is_not_evaluated() {
        let prompt = render_analysis_prompt("{{ 7 * 7 }}").unwrap();
        assert!(prompt.contains("\"{{ 7 * 7 }}\""));
        assert!(!prompt.contains("49"));
    }

    #[test]
    fn test_brief_covers_every_check_and_the_schema() {
        let prompt = render_analysis_prompt("NVDA").unwrap();
        for needle in [
            "Google Search",
            "Price History (2 Years)",
            "S&P 500",
            "Alpha and Beta",
            "Earnings",
            "Do not wrap it in markdown code blocks",
            "\"companyName\"",
            "\"priceHistory\"",
            "\"sharpeRatio\"",
        ] {
            assert!(prompt.contains(needle), "prompt is missing {needle:?}");
        }
    }
}
