//! Parse-then-render path: a raw service body all the way to the printed
//! report.

use advisor_core::cli::results::{render_placeholder, render_report};
use advisor_core::scoring::SubmissionResult;

fn service_body() -> String {
    let slice = r#"{"percentage": 20.0, "amount": 24000.0}"#;
    format!(
        r#"{{"allocation": {{"equity": {s}, "debt": {s}, "gold": {s}, "real_estate": {s}, "crypto": {{"percentage": 0.0, "amount": 0.0}}, "cash": {s}}}, "risk_profile": "Balanced", "currency_recommendations": [{{"symbol": "USDINR", "weight": 1.0, "amount": 24000.0}}], "profile": 3, "result_url": "/results/3/"}}"#,
        s = slice
    )
}

#[test]
fn raw_body_renders_as_a_complete_report() {
    let result = SubmissionResult::parse(&service_body()).expect("body parses");
    let report = render_report(&result, "₹");

    assert!(report.contains("Investment Portfolio Analysis"));
    assert!(report.contains("Risk profile: Balanced"));
    assert!(report.contains("Total allocated: ₹120000.00"));
    assert!(report.contains("Currency Recommendations"));
    assert!(report.contains("USDINR"));
    assert!(!report.contains("Equity Recommendations"));
    assert!(report.contains(&result.received_at.format("%Y-%m-%d").to_string()));
}

#[test]
fn zero_percentage_classes_render_without_a_bar() {
    let result = SubmissionResult::parse(&service_body()).expect("body parses");
    let report = render_report(&result, "₹");
    let crypto_line = report
        .lines()
        .find(|line| line.contains("Crypto"))
        .expect("crypto row present");
    assert!(!crypto_line.contains('█'));
    assert!(crypto_line.contains("0.0%"));
}

#[test]
fn placeholder_is_shown_before_any_submission() {
    assert!(render_placeholder().contains("No results yet"));
}
