use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    style::{Attribute, SetAttribute},
    terminal::{self, ClearType},
    ExecutableCommand,
};

use crate::cli::output::{current_preferences, OutputPreferences};
use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::test_mode::{self, MenuTestEvent};

#[derive(Clone, Debug)]
pub struct MenuUI {
    pub title: String,
    pub context: Option<String>,
    pub items: Vec<MenuUIItem>,
    pub initial_index: Option<usize>,
}

impl MenuUI {
    pub fn new(title: impl Into<String>, items: Vec<MenuUIItem>) -> Self {
        Self {
            title: title.into(),
            context: None,
            items,
            initial_index: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_initial_index(mut self, index: usize) -> Self {
        self.initial_index = Some(index);
        self
    }
}

#[derive(Clone, Debug)]
pub struct MenuUIItem {
    pub key: String,
    pub label: String,
    pub description: String,
}

impl MenuUIItem {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug)]
pub enum MenuRenderError {
    Interrupted,
    Io(io::Error),
}

impl From<io::Error> for MenuRenderError {
    fn from(err: io::Error) -> Self {
        MenuRenderError::Io(err)
    }
}

pub struct MenuRenderer {
    prefs: OutputPreferences,
}

impl MenuRenderer {
    pub fn new() -> Self {
        Self {
            prefs: current_preferences(),
        }
    }

    /// Shows the menu and blocks until the user selects an item or backs out.
    /// `Ok(None)` means ESC.
    pub fn show(&self, menu: &MenuUI) -> Result<Option<String>, MenuRenderError> {
        if menu.items.is_empty() {
            return Ok(None);
        }

        if let Some(events) = test_mode::next_menu_events(&menu.title) {
            return self.show_with_script(menu, events);
        }

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        stdout.execute(cursor::Hide)?;

        let mut selected = menu.initial_index.unwrap_or(0).min(menu.items.len() - 1);
        let max_label_len = menu
            .items
            .iter()
            .map(|item| item.label.len())
            .max()
            .unwrap_or(0);

        let result = loop {
            self.render(&mut stdout, menu, selected, max_label_len)?;
            let event = event::read()?;
            let Event::Key(key) = event else { continue };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            {
                break Err(MenuRenderError::Interrupted);
            }
            match key.code {
                KeyCode::Up => {
                    selected = selected.checked_sub(1).unwrap_or(menu.items.len() - 1);
                }
                KeyCode::Down => {
                    selected = (selected + 1) % menu.items.len();
                }
                KeyCode::Home => selected = 0,
                KeyCode::End => selected = menu.items.len() - 1,
                KeyCode::Enter => {
                    break Ok(Some(menu.items[selected].key.clone()));
                }
                KeyCode::Esc => break Ok(None),
                _ => {}
            }
        };

        let clear_status = self.clear_screen(&mut stdout);
        stdout.execute(cursor::Show).ok();
        terminal::disable_raw_mode().ok();
        clear_status?;

        result
    }

    fn show_with_script(
        &self,
        menu: &MenuUI,
        events: Vec<MenuTestEvent>,
    ) -> Result<Option<String>, MenuRenderError> {
        let len = menu.items.len();
        let mut selected = menu.initial_index.unwrap_or(0).min(len - 1);
        for event in events {
            match event {
                MenuTestEvent::Up => {
                    selected = selected.checked_sub(1).unwrap_or(len - 1);
                }
                MenuTestEvent::Down => {
                    selected = (selected + 1) % len;
                }
                MenuTestEvent::Enter => {
                    self.print_snapshot(menu, selected);
                    return Ok(Some(menu.items[selected].key.clone()));
                }
                MenuTestEvent::Esc => {
                    self.print_snapshot(menu, selected);
                    return Ok(None);
                }
            }
        }
        self.print_snapshot(menu, selected);
        panic!(
            "Scripted menu events must end with ENTER or ESC for `{}`",
            menu.title
        );
    }

    fn print_snapshot(&self, menu: &MenuUI, selected: usize) {
        let formatter = Formatter::new();
        if let Some(context) = &menu.context {
            println!("{}", formatter.detail_text(context));
            println!();
        }
        println!("{}", formatter.header_text(&menu.title));
        println!();
        let max_label_len = menu
            .items
            .iter()
            .map(|item| item.label.len())
            .max()
            .unwrap_or(0);
        for (index, item) in menu.items.iter().enumerate() {
            let pointer = self.pointer(index == selected);
            let row =
                formatter.format_two_column_row(&item.label, &item.description, max_label_len);
            println!(" {pointer} {}", row);
        }
        println!();
        println!("{}", formatter.detail_text(formatter.navigation_hint()));
    }

    fn pointer(&self, selected: bool) -> &'static str {
        if !selected {
            " "
        } else if self.prefs.plain_mode {
            ">"
        } else {
            "▸"
        }
    }

    fn render(
        &self,
        stdout: &mut Stdout,
        menu: &MenuUI,
        selected: usize,
        max_label_len: usize,
    ) -> Result<(), io::Error> {
        self.clear_screen(stdout)?;
        let formatter = Formatter::new();
        if let Some(context) = &menu.context {
            writeln!(stdout, "{}", formatter.detail_text(context))?;
            writeln!(stdout)?;
        }
        writeln!(stdout, "{}", formatter.header_text(&menu.title))?;
        writeln!(stdout)?;

        for (index, item) in menu.items.iter().enumerate() {
            let is_selected = index == selected;
            let row =
                formatter.format_two_column_row(&item.label, &item.description, max_label_len);
            if is_selected {
                stdout.execute(SetAttribute(Attribute::Reverse))?;
            } else {
                stdout.execute(SetAttribute(Attribute::Reset))?;
            }
            write!(stdout, " {} {}", self.pointer(is_selected), row)?;
            stdout.execute(SetAttribute(Attribute::Reset))?;
            writeln!(stdout)?;
        }

        writeln!(stdout)?;
        writeln!(stdout, "{}", formatter.detail_text(formatter.navigation_hint()))?;
        stdout.flush()?;
        Ok(())
    }

    fn clear_screen(&self, stdout: &mut Stdout) -> Result<(), io::Error> {
        stdout.execute(terminal::Clear(ClearType::All))?;
        stdout.execute(cursor::MoveTo(0, 0))?;
        Ok(())
    }
}

impl Default for MenuRenderer {
    fn default() -> Self {
        Self::new()
    }
}
