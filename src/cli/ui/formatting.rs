use std::fmt;

use colored::Colorize;

use crate::cli::output::{current_preferences, OutputPreferences};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Header,
    Detail,
}

pub struct Formatter {
    prefs: OutputPreferences,
}

impl Formatter {
    pub fn new() -> Self {
        Self {
            prefs: current_preferences(),
        }
    }

    pub fn print_header(&self, title: impl fmt::Display) {
        println!("\n{}", self.header_text(title));
    }

    pub fn header_text(&self, title: impl fmt::Display) -> String {
        let text = format!("=== {} ===", title);
        self.colorize(text, Style::Header)
    }

    pub fn print_detail(&self, message: impl fmt::Display) {
        println!("{}", self.detail_text(message));
    }

    pub fn detail_text(&self, message: impl fmt::Display) -> String {
        self.colorize(message.to_string(), Style::Detail)
    }

    fn colorize(&self, text: String, style: Style) -> String {
        if self.prefs.plain_mode {
            return text;
        }

        match style {
            Style::Header => text.bold().to_string(),
            Style::Detail => text,
        }
    }

    pub fn navigation_hint(&self) -> String {
        "(Use arrow keys to navigate, Enter to select, ESC to go back)".to_string()
    }

    pub fn format_two_column_row(&self, label: &str, description: &str, width: usize) -> String {
        format!("  {:<width$}  {}", label, description, width = width + 2)
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}
