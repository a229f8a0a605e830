//! Full investment memo layout

use super::charts::{pe_comparison, price_trend, risk_return};
use super::{Theme, wrap};
use crate::model::InvestmentAnalysis;
use comfy_table::presets::UTF8_HORIZONTAL_ONLY;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

const ANALYST_NOTE: &str = "This report utilizes AI-generated analysis grounded in publicly \
available data derived from search results. Financial markets are volatile; past performance, \
including the simulated curves shown here, does not guarantee future results. The Beta and \
Alpha calculations are approximations based on recent historical windows.";

const CHART_HEIGHT: usize = 9;
const CHART_MAX_WIDTH: usize = 72;

/// Render one analysis as a terminal memo
pub fn render_report(analysis: &InvestmentAnalysis, theme: &Theme, width: usize) -> String {
    let chart_width = width.min(CHART_MAX_WIDTH);
    let valuation = &analysis.metrics.valuation;
    let risk = &analysis.metrics.risk;
    let mut out = String::new();

    out.push_str(&format!(
        "{}  {}\n",
        theme.title.apply_to(&analysis.ticker),
        theme.muted.apply_to(&analysis.company_name)
    ));
    out.push_str(&format!("{}\n", theme.figure.apply_to(&analysis.current_price)));
    out.push_str(&format!(
        "{}  {}\n",
        theme.muted.apply_to("Recommendation"),
        theme
            .verdict(analysis.verdict)
            .apply_to(format!(" {} ", analysis.verdict))
    ));
    out.push_str(&"─".repeat(width));
    out.push('\n');

    section(&mut out, theme, "Executive Summary");
    paragraph(&mut out, &analysis.executive_summary, width);

    out.push_str(&format!("{}\n", metrics_table(analysis, width)));

    section(&mut out, theme, "Price Trend & Volatility");
    paragraph(&mut out, &analysis.price_trend_analysis, width);

    section(&mut out, theme, "Valuation Context");
    paragraph(&mut out, &analysis.valuation_analysis, width);

    section(&mut out, theme, "Risk Profile & Earnings");
    paragraph(
        &mut out,
        &format!("{}\n\n{}", analysis.risk_analysis, analysis.earnings_analysis),
        width,
    );

    section(&mut out, theme, "2-Year Price Trend (Simulated)");
    lines(
        &mut out,
        price_trend(&analysis.chart_data.price_history, chart_width, CHART_HEIGHT),
    );

    section(&mut out, theme, "P/E Ratio Comparison");
    lines(
        &mut out,
        pe_comparison(
            &analysis.ticker,
            valuation.pe_ratio,
            valuation.sector_pe,
            chart_width,
        ),
    );

    section(&mut out, theme, "Risk (Beta) vs Return (Alpha)");
    lines(
        &mut out,
        risk_return(
            &analysis.ticker,
            risk.beta,
            risk.alpha,
            chart_width,
            CHART_HEIGHT,
        ),
    );

    section(&mut out, theme, "Analyst Note");
    for line in wrap(ANALYST_NOTE, width) {
        out.push_str(&format!("{}\n", theme.muted.apply_to(line)));
    }

    out
}

/// Headline figures; optional ratios only appear when the model supplied them
fn metrics_table(analysis: &InvestmentAnalysis, width: usize) -> Table {
    let valuation = &analysis.metrics.valuation;
    let risk = &analysis.metrics.risk;

    let mut rows = vec![
        ("P/E Ratio", valuation.pe_ratio),
        ("Sector P/E", valuation.sector_pe),
        ("Beta", risk.beta),
        ("Alpha", risk.alpha),
    ];
    rows.extend(valuation.pb_ratio.map(|v| ("P/B Ratio", v)));
    rows.extend(valuation.peg_ratio.map(|v| ("PEG Ratio", v)));
    rows.extend(risk.sharpe_ratio.map(|v| ("Sharpe Ratio", v)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_HORIZONTAL_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(u16::try_from(width).unwrap_or(u16::MAX))
        .set_header(vec!["Metric", "Value"]);

    for (label, value) in rows {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format!("{value:.2}")).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

fn section(out: &mut String, theme: &Theme, title: &str) {
    out.push_str(&format!("\n{}\n", theme.heading.apply_to(title)));
}

fn paragraph(out: &mut String, text: &str, width: usize) {
    lines(out, wrap(text, width));
}

fn lines(out: &mut String, lines: Vec<String>) {
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
}
