//! Renders an accepted scoring response as a terminal report.
//!
//! The report is assembled as one string so the shell can print it in a
//! single write and tests can assert on the exact layout.

use crate::cli::output::current_preferences;
use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::table_renderer::{Column, Table};
use crate::scoring::{Recommendation, SubmissionResult};

const BAR_WIDTH: usize = 24;

/// Full report: header, risk badge, summary, allocation table with share
/// bars, and one table per non-empty recommendation list.
pub fn render_report(result: &SubmissionResult, currency: &str) -> String {
    let formatter = Formatter::new();
    let mut sections: Vec<String> = Vec::new();

    sections.push(formatter.header_text("Investment Portfolio Analysis"));

    let mut summary: Vec<String> = Vec::new();
    if let Some(risk) = &result.risk_profile {
        summary.push(format!("Risk profile: {risk}"));
    }
    summary.push(format!(
        "Received: {}",
        result.received_at.format("%Y-%m-%d %H:%M UTC")
    ));
    summary.push(format!(
        "Total allocated: {}",
        format_amount(result.allocation.total_amount(), currency)
    ));
    summary.push(format!(
        "Recommendations: {}",
        result.recommendation_count()
    ));
    sections.push(summary.join("\n"));

    sections.push(allocation_table(result, currency));

    for (title, list) in result.recommendation_sets() {
        if list.is_empty() {
            continue;
        }
        sections.push(format!(
            "{}\n{}",
            formatter.header_text(title),
            recommendation_table(list, currency)
        ));
    }

    sections.join("\n\n")
}

/// Shown when the landing menu opens the report view before any submission
/// has been accepted.
pub fn render_placeholder() -> String {
    "No results yet. Complete the questionnaire to generate a report.".to_string()
}

fn allocation_table(result: &SubmissionResult, currency: &str) -> String {
    let mut table = Table::new(vec![
        Column::left("Asset Class").with_min_width(12),
        Column::right("Share"),
        Column::right("Amount").with_min_width(12),
        Column::left("Distribution").with_min_width(BAR_WIDTH),
    ]);
    for (class, slice) in result.allocation.entries() {
        table.push_row(vec![
            class.label().to_string(),
            format!("{:.1}%", slice.percentage),
            format_amount(slice.amount, currency),
            share_bar(slice.percentage),
        ]);
    }
    table.render()
}

fn recommendation_table(list: &[Recommendation], currency: &str) -> String {
    let mut table = Table::new(vec![
        Column::left("Symbol").with_min_width(8),
        Column::left("Name").with_min_width(16),
        Column::right("Weight"),
        Column::right("Amount").with_min_width(12),
    ]);
    for recommendation in list {
        table.push_row(vec![
            recommendation.symbol.clone(),
            recommendation.display_name().to_string(),
            format!("{:.1}%", recommendation.weight * 100.0),
            format_amount(recommendation.amount, currency),
        ]);
    }
    table.render()
}

fn share_bar(percentage: f64) -> String {
    let clamped = percentage.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
    let glyph = if current_preferences().plain_mode {
        '#'
    } else {
        '█'
    };
    std::iter::repeat(glyph).take(filled).collect()
}

fn format_amount(amount: f64, currency: &str) -> String {
    format!("{currency}{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> SubmissionResult {
        let body = r#"{
            "allocation": {
                "equity": {"percentage": 50.0, "amount": 50000.0},
                "debt": {"percentage": 25.0, "amount": 25000.0},
                "gold": {"percentage": 10.0, "amount": 10000.0},
                "real_estate": {"percentage": 10.0, "amount": 10000.0},
                "crypto": {"percentage": 0.0, "amount": 0.0},
                "cash": {"percentage": 5.0, "amount": 5000.0}
            },
            "risk_profile": "Moderate",
            "equity_recommendations": [
                {"symbol": "VTI", "name": "Vanguard Total Market", "weight": 0.6, "amount": 30000.0},
                {"symbol": "VXUS", "weight": 0.4, "amount": 20000.0}
            ],
            "bond_recommendations": [
                {"symbol": "BND", "name": "Vanguard Total Bond", "weight": 1.0, "amount": 25000.0}
            ]
        }"#;
        SubmissionResult::parse(body).unwrap()
    }

    #[test]
    fn report_lists_every_asset_class() {
        let report = render_report(&sample_result(), "$");
        for label in [
            "Equity",
            "Debt",
            "Gold",
            "Real Estate",
            "Crypto",
            "Cash",
        ] {
            assert!(report.contains(label), "missing {label}");
        }
    }

    #[test]
    fn report_includes_summary_and_risk_badge() {
        let report = render_report(&sample_result(), "$");
        assert!(report.contains("Risk profile: Moderate"));
        assert!(report.contains("Total allocated: $100000.00"));
        assert!(report.contains("Recommendations: 3"));
    }

    #[test]
    fn report_skips_empty_recommendation_sections() {
        let report = render_report(&sample_result(), "$");
        assert!(report.contains("Equity Recommendations"));
        assert!(report.contains("Bond Recommendations"));
        assert!(!report.contains("Crypto Recommendations"));
        assert!(!report.contains("Currency Recommendations"));
    }

    #[test]
    fn recommendation_rows_prefer_names_over_symbols() {
        let report = render_report(&sample_result(), "$");
        assert!(report.contains("Vanguard Total Market"));
        assert!(report.contains("Vanguard Total Bond"));
        assert!(report.contains("VXUS"));
    }

    #[test]
    fn share_bar_scales_with_percentage() {
        assert_eq!(share_bar(100.0).chars().count(), BAR_WIDTH);
        assert_eq!(share_bar(50.0).chars().count(), BAR_WIDTH / 2);
        assert_eq!(share_bar(0.0).chars().count(), 0);
        assert_eq!(share_bar(150.0).chars().count(), BAR_WIDTH);
    }

    #[test]
    fn placeholder_mentions_the_questionnaire() {
        assert!(render_placeholder().contains("questionnaire"));
    }
}
