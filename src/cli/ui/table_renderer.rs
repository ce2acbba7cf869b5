use crate::cli::output::current_preferences;

/// Describes how a column aligns its contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// Configuration for a single column in a rendered table.
#[derive(Clone, Debug)]
pub struct Column {
    pub title: String,
    pub alignment: Alignment,
    pub min_width: usize,
}

impl Column {
    pub fn left(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            alignment: Alignment::Left,
            min_width: 0,
        }
    }

    pub fn right(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            alignment: Alignment::Right,
            min_width: 0,
        }
    }

    pub fn with_min_width(mut self, width: usize) -> Self {
        self.min_width = width;
        self
    }
}

/// A table with column metadata and rows of already-formatted cells.
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub padding: usize,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            padding: 1,
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Content width of each column: the widest of the title, the cells, and
    /// the configured minimum. Styled cells are measured by visible width.
    pub fn column_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let mut width = visible_width(&column.title).max(column.min_width);
                for row in &self.rows {
                    if let Some(cell) = row.get(idx) {
                        width = width.max(visible_width(cell));
                    }
                }
                width
            })
            .collect()
    }

    pub fn render_row(&self, cells: &[String], widths: &[usize]) -> String {
        let rendered: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let text = cells.get(idx).map(|cell| cell.as_str()).unwrap_or("");
                pad_cell(text, widths[idx], column.alignment, self.padding)
            })
            .collect();
        rendered.join(" ").trim_end().to_string()
    }

    /// Renders the header row, a rule, and every data row.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let titles: Vec<String> = self
            .columns
            .iter()
            .map(|column| column.title.clone())
            .collect();

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.render_row(&titles, &widths));
        lines.push(horizontal_rule(&widths, self.padding));
        for row in &self.rows {
            lines.push(self.render_row(row, &widths));
        }
        lines.join("\n")
    }
}

/// Width of `text` as it appears on screen, skipping ANSI escape sequences.
pub fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            if chars.peek() == Some(&'[') {
                chars.next();
                for follow in chars.by_ref() {
                    if ('\u{40}'..='\u{7e}').contains(&follow) {
                        break;
                    }
                }
            }
            continue;
        }
        width += 1;
    }
    width
}

/// Pads a cell to `width` visible columns with the requested alignment.
pub fn pad_cell(text: &str, width: usize, alignment: Alignment, padding: usize) -> String {
    let remaining = width.saturating_sub(visible_width(text));
    let (left, right) = match alignment {
        Alignment::Left => (0, remaining),
        Alignment::Right => (remaining, 0),
    };

    let mut cell = String::new();
    cell.push_str(&" ".repeat(padding));
    cell.push_str(&" ".repeat(left));
    cell.push_str(text);
    cell.push_str(&" ".repeat(right));
    cell.push_str(&" ".repeat(padding));
    cell
}

/// Builds a horizontal rule spanning the full width of the table.
pub fn horizontal_rule(widths: &[usize], padding: usize) -> String {
    if widths.is_empty() {
        return String::new();
    }

    let total: usize =
        widths.iter().map(|w| w + padding * 2).sum::<usize>() + widths.len().saturating_sub(1);
    let ch = if current_preferences().plain_mode {
        '-'
    } else {
        '─'
    };
    ch.to_string().repeat(total)
}
