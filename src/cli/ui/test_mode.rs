//! Scripted input queues so interactive flows can run without a TTY.
//!
//! Queues are seeded from environment variables once per process, or
//! installed directly by tests. When a queue is enabled, the corresponding
//! prompt consumes from it instead of reading terminal events.

use once_cell::sync::Lazy;
use std::{collections::VecDeque, env, sync::Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTestEvent {
    Up,
    Down,
    Enter,
    Esc,
}

#[derive(Debug, Clone)]
pub enum TextTestInput {
    Value(String),
    Keep,
    Back,
    Help,
    Cancel,
}

struct MenuQueue {
    enabled: bool,
    events: VecDeque<Vec<MenuTestEvent>>,
}

impl MenuQueue {
    fn from_env() -> Self {
        if let Ok(raw) = env::var("ADVISOR_TEST_MENU_EVENTS") {
            Self {
                enabled: true,
                events: parse_menu_sequences(&raw),
            }
        } else {
            Self {
                enabled: false,
                events: VecDeque::new(),
            }
        }
    }
}

struct TextQueue {
    enabled: bool,
    inputs: VecDeque<TextTestInput>,
}

impl TextQueue {
    fn from_env() -> Self {
        if let Ok(raw) = env::var("ADVISOR_TEST_TEXT_INPUTS") {
            Self {
                enabled: true,
                inputs: parse_text_sequences(&raw),
            }
        } else {
            Self {
                enabled: false,
                inputs: VecDeque::new(),
            }
        }
    }
}

static MENU_EVENTS: Lazy<Mutex<MenuQueue>> = Lazy::new(|| Mutex::new(MenuQueue::from_env()));

static TEXT_INPUTS: Lazy<Mutex<TextQueue>> = Lazy::new(|| Mutex::new(TextQueue::from_env()));

pub fn is_enabled() -> bool {
    MENU_EVENTS
        .lock()
        .expect("menu event queue poisoned")
        .enabled
        || TEXT_INPUTS
            .lock()
            .expect("text input queue poisoned")
            .enabled
}

pub fn next_menu_events(label: &str) -> Option<Vec<MenuTestEvent>> {
    let mut guard = MENU_EVENTS.lock().expect("menu event queue poisoned");
    if !guard.enabled {
        return None;
    }
    Some(
        guard
            .events
            .pop_front()
            .unwrap_or_else(|| panic!("Menu events exhausted before `{label}` menu rendered")),
    )
}

pub fn next_text_input(label: &str) -> Option<TextTestInput> {
    let mut guard = TEXT_INPUTS.lock().expect("text input queue poisoned");
    if !guard.enabled {
        return None;
    }
    Some(
        guard
            .inputs
            .pop_front()
            .unwrap_or_else(|| panic!("Text inputs exhausted before prompt `{label}`")),
    )
}

fn parse_menu_event(token: &str) -> Option<MenuTestEvent> {
    match token.to_ascii_uppercase().as_str() {
        "UP" => Some(MenuTestEvent::Up),
        "DOWN" => Some(MenuTestEvent::Down),
        "ENTER" | "RETURN" => Some(MenuTestEvent::Enter),
        "ESC" | "ESCAPE" => Some(MenuTestEvent::Esc),
        _ => None,
    }
}

fn parse_text_input(token: &str) -> TextTestInput {
    match token.to_ascii_uppercase().as_str() {
        "<CANCEL>" => TextTestInput::Cancel,
        "<BACK>" => TextTestInput::Back,
        "<HELP>" => TextTestInput::Help,
        "<KEEP>" => TextTestInput::Keep,
        "<BLANK>" | "<EMPTY>" => TextTestInput::Value(String::new()),
        _ => TextTestInput::Value(token.to_string()),
    }
}

fn parse_menu_sequences(raw: &str) -> VecDeque<Vec<MenuTestEvent>> {
    raw.split('|')
        .filter_map(|segment| {
            let trimmed = segment.trim();
            if trimmed.is_empty() {
                return None;
            }
            let events = trimmed
                .split(',')
                .filter_map(|token| parse_menu_event(token.trim()))
                .collect::<Vec<_>>();
            if events.is_empty() {
                None
            } else {
                Some(events)
            }
        })
        .collect()
}

fn parse_text_sequences(raw: &str) -> VecDeque<TextTestInput> {
    raw.split('|')
        .filter_map(|segment| {
            let trimmed = segment.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(parse_text_input(trimmed))
            }
        })
        .collect()
}

pub fn install_menu_events(events: Vec<Vec<MenuTestEvent>>) {
    let mut guard = MENU_EVENTS.lock().expect("menu event queue poisoned");
    guard.enabled = true;
    guard.events = events.into();
}

pub fn reset_menu_events() {
    let mut guard = MENU_EVENTS.lock().expect("menu event queue poisoned");
    guard.enabled = false;
    guard.events.clear();
}

pub fn install_text_inputs(inputs: Vec<TextTestInput>) {
    let mut guard = TEXT_INPUTS.lock().expect("text input queue poisoned");
    guard.enabled = true;
    guard.inputs = inputs.into();
}

pub fn reset_text_inputs() {
    let mut guard = TEXT_INPUTS.lock().expect("text input queue poisoned");
    guard.enabled = false;
    guard.inputs.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_menu_sequences() {
        let parsed = parse_menu_sequences("down,down,enter | esc");
        assert_eq!(parsed.len(), 2);
        assert_eq!(
            parsed[0],
            vec![
                MenuTestEvent::Down,
                MenuTestEvent::Down,
                MenuTestEvent::Enter
            ]
        );
        assert_eq!(parsed[1], vec![MenuTestEvent::Esc]);
    }

    #[test]
    fn parses_text_tokens() {
        let parsed = parse_text_sequences("42 | <KEEP> | <BACK> | <BLANK>");
        assert_eq!(parsed.len(), 4);
        assert!(matches!(&parsed[0], TextTestInput::Value(v) if v == "42"));
        assert!(matches!(parsed[1], TextTestInput::Keep));
        assert!(matches!(parsed[2], TextTestInput::Back));
        assert!(matches!(&parsed[3], TextTestInput::Value(v) if v.is_empty()));
    }
}
