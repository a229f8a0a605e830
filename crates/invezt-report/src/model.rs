//! Investment analysis record returned by the model
//!
//! The record is decoded wholesale from the model's JSON answer and never
//! mutated afterwards. Wire names are camelCase and must match exactly.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed recommendation set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Buy,
    Hold,
    Sell,
}

impl Verdict {
    /// Wire and display label
    pub fn label(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Hold => "HOLD",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One point of the approximated price history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Period label, e.g. "2023-01"
    pub x: String,
    /// Price at that period
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub price_history: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationMetrics {
    pub pe_ratio: f64,
    pub sector_pe: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pb_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peg_ratio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetrics {
    pub alpha: f64,
    pub beta: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharpe_ratio: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub valuation: ValuationMetrics,
    pub risk: RiskMetrics,
}

/// Complete analysis of one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentAnalysis {
    pub ticker: String,
    pub company_name: String,
    /// Pre-formatted with currency; display only
    pub current_price: String,
    pub executive_summary: String,
    pub price_trend_analysis: String,
    pub valuation_analysis: String,
    pub risk_analysis: String,
    pub earnings_analysis: String,
    pub verdict: Verdict,
    pub chart_data: ChartData,
    pub metrics: Metrics,
}

impl InvestmentAnalysis {
    /// Decode and validate a record from JSON text
    ///
    /// All-or-nothing: any syntax error, missing or mistyped field, unknown
    /// verdict, or unusable value rejects the whole record.
    pub fn from_json(text: &str) -> Result<Self> {
        let analysis: Self = serde_json::from_str(text)?;
        analysis.validate()?;
        Ok(analysis)
    }

    /// Check the values serde cannot
    pub fn validate(&self) -> Result<()> {
        require_text("ticker", &self.ticker)?;
        require_text("companyName", &self.company_name)?;
        require_text("currentPrice", &self.current_price)?;

        let valuation = &self.metrics.valuation;
        let risk = &self.metrics.risk;
        require_finite("metrics.valuation.peRatio", Some(valuation.pe_ratio))?;
        require_finite("metrics.valuation.sectorPe", Some(valuation.sector_pe))?;
        require_finite("metrics.valuation.pbRatio", valuation.pb_ratio)?;
        require_finite("metrics.valuation.pegRatio", valuation.peg_ratio)?;
        require_finite("metrics.risk.alpha", Some(risk.alpha))?;
        require_finite("metrics.risk.beta", Some(risk.beta))?;
        require_finite("metrics.risk.sharpeRatio", risk.sharpe_ratio)?;

        for (i, point) in self.chart_data.price_history.iter().enumerate() {
            require_finite(&format!("chartData.priceHistory[{i}].y"), Some(point.y))?;
        }

        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AnalysisError::InvalidField {
            field: field.to_string(),
            reason: "is blank".to_string(),
        });
    }
    Ok(())
}

fn require_finite(field: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() => Err(AnalysisError::InvalidField {
            field: field.to_string(),
            reason: format!("is not a finite number ({v})"),
        }),
        _ => Ok(()),
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{ACME_JSON, acme};
    use super::*;
    use serde_json::{Value, json};

    fn acme_value() -> Value {
        serde_json::from_str(ACME_JSON).unwrap()
    }

    #[test]
    fn test_decode_reference_record() {
        let analysis = InvestmentAnalysis::from_json(ACME_JSON).unwrap();
        assert_eq!(analysis, acme());
        assert!(analysis.metrics.valuation.pb_ratio.is_none());
        assert!(analysis.metrics.risk.sharpe_ratio.is_none());
    }

    #[test]
    fn test_optional_metrics_present_or_null() {
        let mut value = acme_value();
        value["metrics"]["valuation"]["pbRatio"] = json!(3.1);
        value["metrics"]["valuation"]["pegRatio"] = Value::Null;
        value["metrics"]["risk"]["sharpeRatio"] = json!(0.8);

        let analysis = InvestmentAnalysis::from_json(&value.to_string()).unwrap();
        assert_eq!(analysis.metrics.valuation.pb_ratio, Some(3.1));
        assert_eq!(analysis.metrics.valuation.peg_ratio, None);
        assert_eq!(analysis.metrics.risk.sharpe_ratio, Some(0.8));
    }

    #[test]
    fn test_missing_required_field_is_schema_error() {
        let mut value = acme_value();
        value["metrics"]["risk"]
            .as_object_mut()
            .unwrap()
            .remove("beta");

        match InvestmentAnalysis::from_json(&value.to_string()).unwrap_err() {
            AnalysisError::Schema { detail } => assert!(detail.contains("beta")),
            other => panic!("Expected Schema, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_verdict_is_rejected() {
        let mut value = acme_value();
        value["verdict"] = json!("STRONG BUY");
        let err = InvestmentAnalysis::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, AnalysisError::Schema { .. }));

        value["verdict"] = json!("buy");
        let err = InvestmentAnalysis::from_json(&value.to_string()).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_non_numeric_chart_point_is_rejected() {
        let mut value = acme_value();
        value["chartData"]["priceHistory"][1]["y"] = json!("105");
        let err = InvestmentAnalysis::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, AnalysisError::Schema { .. }));
    }

    #[test]
    fn test_blank_ticker_is_invalid_field() {
        let mut value = acme_value();
        value["ticker"] = json!("   ");
        match InvestmentAnalysis::from_json(&value.to_string()).unwrap_err() {
            AnalysisError::InvalidField { field, .. } => assert_eq!(field, "ticker"),
            other => panic!("Expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_value_is_invalid_field() {
        let mut analysis = acme();
        analysis.metrics.risk.sharpe_ratio = Some(f64::NAN);
        match analysis.validate().unwrap_err() {
            AnalysisError::InvalidField { field, .. } => {
                assert_eq!(field, "metrics.risk.sharpeRatio");
            }
            other => panic!("Expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let err = InvestmentAnalysis::from_json("Here is the analysis you asked for").unwrap_err();
        assert!(matches!(err, AnalysisError::Parse { .. }));
    }

    #[test]
    fn test_serializes_with_wire_names() {
        let value = serde_json::to_value(acme()).unwrap();
        assert_eq!(value["companyName"], "Acme Corp");
        assert_eq!(value["verdict"], "BUY");
        assert_eq!(value["metrics"]["valuation"]["peRatio"], 18.2);
        assert!(value["metrics"]["valuation"].get("pbRatio").is_none());
    }
}
