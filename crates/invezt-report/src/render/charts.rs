//! Text charts for the report

use crate::model::ChartPoint;

const POINT: char = '●';
const MARKET: char = '◆';
const BAR: char = '█';

/// "2-Year Price Trend (Simulated)": one marker per history point
pub fn price_trend(points: &[ChartPoint], width: usize, height: usize) -> Vec<String> {
    if points.is_empty() {
        return vec!["(no price history)".to_string()];
    }

    let height = height.max(2);
    let (min, max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.y), hi.max(p.y))
        });
    let top = format!("{max:.2}");
    let bottom = format!("{min:.2}");
    let label_width = top.len().max(bottom.len());

    let plot_width = width.saturating_sub(label_width + 2).max(points.len());
    let step = (plot_width / points.len()).max(1);
    let columns = step * (points.len() - 1) + 1;

    let mut grid = vec![vec![' '; columns]; height];
    for (i, point) in points.iter().enumerate() {
        let level = if max > min {
            ((point.y - min) / (max - min) * (height - 1) as f64).round() as usize
        } else {
            (height - 1) / 2
        };
        grid[height - 1 - level][i * step] = POINT;
    }

    let mut lines: Vec<String> = grid
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            let label = match row {
                0 => top.as_str(),
                r if r == height - 1 => bottom.as_str(),
                _ => "",
            };
            let cells: String = cells.iter().collect();
            format!("{label:>label_width$} │{}", cells.trim_end())
        })
        .collect();

    lines.push(format!("{:>label_width$} └{}", "", "─".repeat(columns)));
    lines.push(axis_labels(
        &points[0].x,
        &points[points.len() - 1].x,
        label_width + 2,
        columns,
    ));
    lines
}

/// "P/E Ratio Comparison": the company against its sector average
pub fn pe_comparison(ticker: &str, pe_ratio: f64, sector_pe: f64, width: usize) -> Vec<String> {
    let bars = [(ticker, pe_ratio), ("Sector Avg", sector_pe)];
    let label_width = bars
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let bar_width = width.saturating_sub(label_width + 12).max(10);
    let scale = pe_ratio.max(sector_pe).max(0.0);

    bars.iter()
        .map(|(label, value)| {
            let len = if scale > 0.0 {
                (value.max(0.0) / scale * bar_width as f64).round() as usize
            } else {
                0
            };
            let bar: String = std::iter::repeat_n(BAR, len).collect();
            format!("{label:<label_width$} │{bar} {value:.1}")
        })
        .collect()
}

/// "Risk (Beta) vs Return (Alpha)": the company against the market at (1, 0)
///
/// Beta runs from 0 to `max(2, beta + 0.5)`; alpha is centred on a zero line.
pub fn risk_return(ticker: &str, beta: f64, alpha: f64, width: usize, height: usize) -> Vec<String> {
    let x_max = (beta + 0.5).max(2.0);
    let y_span = alpha.abs().max(1.0);
    // Odd so the zero line sits on a row
    let height = (height.max(5) / 2) * 2 + 1;

    let top = format!("{y_span:.2}");
    let bottom = format!("{:.2}", -y_span);
    let label_width = top.len().max(bottom.len());
    let columns = width.saturating_sub(label_width + 2).max(10);

    let column = |x: f64| ((x.clamp(0.0, x_max) / x_max) * (columns - 1) as f64).round() as usize;
    let row = |y: f64| {
        let y = y.clamp(-y_span, y_span);
        ((y_span - y) / (2.0 * y_span) * (height - 1) as f64).round() as usize
    };

    let zero = (height - 1) / 2;
    let mut grid = vec![vec![' '; columns]; height];
    grid[zero].fill('─');
    grid[row(0.0)][column(1.0)] = MARKET;
    grid[row(alpha)][column(beta)] = POINT;

    let mut lines = vec![format!("{:>label_width$}  Alpha", "")];
    lines.extend(grid.iter().enumerate().map(|(r, cells)| {
        let label = match r {
            0 => top.as_str(),
            r if r == zero => "0.00",
            r if r == height - 1 => bottom.as_str(),
            _ => "",
        };
        let cells: String = cells.iter().collect();
        format!("{label:>label_width$} │{}", cells.trim_end())
    }));
    lines.push(format!("{:>label_width$} └{}", "", "─".repeat(columns)));
    lines.push(axis_labels(
        "0.00",
        &format!("{x_max:.2} Beta"),
        label_width + 2,
        columns,
    ));
    lines.push(format!("{POINT} {ticker}  beta {beta:.2}  alpha {alpha:.2}"));
    lines.push(format!("{MARKET} Market (S&P 500)  beta 1.00  alpha 0.00"));
    lines
}

fn axis_labels(first: &str, last: &str, indent: usize, columns: usize) -> String {
    let gap = columns
        .saturating_sub(first.chars().count() + last.chars().count())
        .max(1);
    format!("{:indent$}{first}{:gap$}{last}", "", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(ys: &[f64]) -> Vec<ChartPoint> {
        ys.iter()
            .enumerate()
            .map(|(i, y)| ChartPoint {
                x: format!("2023-{:02}", i + 1),
                y: *y,
            })
            .collect()
    }

    fn count(lines: &[String], c: char) -> usize {
        lines.iter().map(|l| l.matches(c).count()).sum()
    }

    #[test]
    fn test_price_trend_marks_every_point() {
        let lines = price_trend(&points(&[100.0, 105.0, 98.5]), 60, 8);

        assert_eq!(count(&lines, POINT), 3);
        assert!(lines[0].starts_with("105.00 │"));
        assert!(lines[7].starts_with(" 98.50 │"));
        let last = lines.last().unwrap();
        assert!(last.trim_start().starts_with("2023-01"));
        assert!(last.ends_with("2023-03"));
    }

    #[test]
    fn test_price_trend_flat_and_empty() {
        let flat = price_trend(&points(&[50.0, 50.0]), 40, 5);
        assert_eq!(count(&flat, POINT), 2);

        assert_eq!(price_trend(&[], 40, 5), vec!["(no price history)"]);
    }

    #[test]
    fn test_pe_comparison_labels_one_decimal() {
        let lines = pe_comparison("ACME", 18.2, 20.1, 60);

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ACME       │"));
        assert!(lines[0].ends_with(" 18.2"));
        assert!(lines[1].starts_with("Sector Avg │"));
        assert!(lines[1].ends_with(" 20.1"));
        assert!(lines[0].matches(BAR).count() < lines[1].matches(BAR).count());
    }

    #[test]
    fn test_pe_comparison_negative_earnings() {
        let lines = pe_comparison("LOSS", -4.0, 15.0, 60);
        assert_eq!(lines[0].matches(BAR).count(), 0);
        assert!(lines[0].ends_with(" -4.0"));
    }

    #[test]
    fn test_risk_return_places_both_markers() {
        let lines = risk_return("ACME", 0.9, 1.3, 50, 9);

        assert_eq!(count(&lines, POINT), 2);
        assert_eq!(count(&lines, MARKET), 2);
        assert!(lines.iter().any(|l| l.contains("2.00 Beta")));
        assert!(lines.iter().any(|l| l.trim_start().starts_with("0.00 │─")));
        assert!(lines.iter().any(|l| l == "● ACME  beta 0.90  alpha 1.30"));
        assert!(lines.iter().any(|l| l == "◆ Market (S&P 500)  beta 1.00  alpha 0.00"));
    }

    #[test]
    fn test_risk_return_range_grows_with_beta() {
        let lines = risk_return("VOL", 2.4, -0.2, 50, 9);
        assert!(lines.iter().any(|l| l.contains("2.90 Beta")));
    }
}
