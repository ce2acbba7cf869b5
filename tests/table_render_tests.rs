//! Table layout checks: width calculation, alignment, and ANSI-aware
//! measurement used by the report renderer.

use advisor_core::cli::ui::table_renderer::{
    horizontal_rule, pad_cell, visible_width, Alignment, Column, Table,
};

fn sample_table() -> Table {
    let mut table = Table::new(vec![
        Column::left("Asset Class").with_min_width(12),
        Column::right("Share"),
        Column::right("Amount").with_min_width(12),
    ]);
    table.push_row(vec![
        "Equity".to_string(),
        "50.0%".to_string(),
        "$50000.00".to_string(),
    ]);
    table.push_row(vec![
        "Real Estate".to_string(),
        "10.0%".to_string(),
        "$10000.00".to_string(),
    ]);
    table
}

#[test]
fn render_includes_titles_rule_and_rows() {
    let rendered = sample_table().render();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].contains("Asset Class"));
    assert!(lines[0].contains("Amount"));
    assert!(lines[1].chars().all(|c| c == '─' || c == '-'));
    assert!(lines[2].contains("Equity"));
    assert!(lines[3].contains("Real Estate"));
}

#[test]
fn columns_never_shrink_below_their_minimum() {
    let table = sample_table();
    let widths = table.column_widths();
    assert_eq!(widths[0], 12);
    assert_eq!(widths[1], "50.0%".len());
    assert_eq!(widths[2], 12);
}

#[test]
fn right_aligned_cells_pad_on_the_left() {
    let padded = pad_cell("42", 6, Alignment::Right, 1);
    assert!(padded.ends_with("42 "));
    assert_eq!(visible_width(&padded), 8);

    let padded = pad_cell("42", 6, Alignment::Left, 1);
    assert!(padded.starts_with(" 42"));
}

#[test]
fn visible_width_ignores_color_codes() {
    let colored = "\u{1b}[32mEquity\u{1b}[0m";
    assert_eq!(visible_width(colored), 6);
    assert_eq!(visible_width("Equity"), 6);
    assert_eq!(visible_width(""), 0);
}

#[test]
fn rule_spans_the_full_table_width() {
    let table = sample_table();
    let widths = table.column_widths();
    let rule = horizontal_rule(&widths, 1);
    let expected: usize = widths.iter().map(|w| w + 2).sum::<usize>() + (widths.len() - 1);
    assert_eq!(rule.chars().count(), expected);
}

#[test]
fn rows_with_missing_cells_still_render() {
    let mut table = Table::new(vec![Column::left("Key"), Column::right("Value")]);
    table.push_row(vec!["only-key".to_string()]);
    let rendered = table.render();
    assert!(rendered.contains("only-key"));
}
