//! Prompt behavior without a TTY: scripted queues stand in for terminal
//! events, the same mechanism the ADVISOR_TEST_* environment variables feed.

use std::sync::{Mutex, MutexGuard, OnceLock};

use advisor_core::cli::ui::prompts::{
    choice_menu, confirm_menu, text_input, ChoicePromptResult, ConfirmationPromptResult,
    TextPromptResult,
};
use advisor_core::cli::ui::test_mode::{
    install_menu_events, install_text_inputs, reset_menu_events, reset_text_inputs, MenuTestEvent,
    TextTestInput,
};

// The scripted queues are process-wide, so every test takes this lock.
fn lock() -> MutexGuard<'static, ()> {
    static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
    GUARD
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn sample_options() -> Vec<(String, String)> {
    vec![
        ("conservative".to_string(), "Conservative".to_string()),
        ("balanced".to_string(), "Balanced".to_string()),
        ("aggressive".to_string(), "Aggressive".to_string()),
    ]
}

#[test]
fn scripted_text_values_are_trimmed_and_interpreted() {
    let _guard = lock();

    install_text_inputs(vec![TextTestInput::Value("  7  ".to_string())]);
    assert!(matches!(
        text_input("age", None).unwrap(),
        TextPromptResult::Value(v) if v == "7"
    ));

    install_text_inputs(vec![TextTestInput::Value(":back".to_string())]);
    assert!(matches!(
        text_input("age", None).unwrap(),
        TextPromptResult::Back
    ));

    install_text_inputs(vec![TextTestInput::Value(":cancel".to_string())]);
    assert!(matches!(
        text_input("age", None).unwrap(),
        TextPromptResult::Cancel
    ));

    reset_text_inputs();
}

#[test]
fn empty_submit_keeps_the_default_when_one_exists() {
    let _guard = lock();

    install_text_inputs(vec![
        TextTestInput::Value(String::new()),
        TextTestInput::Value(String::new()),
        TextTestInput::Keep,
    ]);
    assert!(matches!(
        text_input("income", Some("240000")).unwrap(),
        TextPromptResult::Keep
    ));
    assert!(matches!(
        text_input("income", None).unwrap(),
        TextPromptResult::Value(v) if v.is_empty()
    ));
    assert!(matches!(
        text_input("income", Some("240000")).unwrap(),
        TextPromptResult::Keep
    ));

    reset_text_inputs();
}

#[test]
fn menu_navigation_selects_by_key() {
    let _guard = lock();

    install_menu_events(vec![vec![MenuTestEvent::Down, MenuTestEvent::Enter]]);
    let result = choice_menu("Risk posture", &[], &sample_options(), None, false).unwrap();
    assert!(matches!(result, ChoicePromptResult::Value(v) if v == "balanced"));

    reset_menu_events();
}

#[test]
fn menu_back_item_is_appended_when_enabled() {
    let _guard = lock();

    install_menu_events(vec![vec![
        MenuTestEvent::Down,
        MenuTestEvent::Down,
        MenuTestEvent::Down,
        MenuTestEvent::Enter,
    ]]);
    let result = choice_menu("Risk posture", &[], &sample_options(), None, true).unwrap();
    assert!(matches!(result, ChoicePromptResult::Back));

    reset_menu_events();
}

#[test]
fn menu_escape_cancels() {
    let _guard = lock();

    install_menu_events(vec![vec![MenuTestEvent::Esc]]);
    let result = choice_menu("Risk posture", &[], &sample_options(), None, false).unwrap();
    assert!(matches!(result, ChoicePromptResult::Cancel));

    reset_menu_events();
}

#[test]
fn menu_default_sets_the_starting_row() {
    let _guard = lock();

    install_menu_events(vec![vec![MenuTestEvent::Enter]]);
    let result = choice_menu(
        "Risk posture",
        &[],
        &sample_options(),
        Some("aggressive"),
        false,
    )
    .unwrap();
    assert!(matches!(result, ChoicePromptResult::Value(v) if v == "aggressive"));

    reset_menu_events();
}

#[test]
fn confirmation_menu_covers_all_three_outcomes() {
    let _guard = lock();

    install_menu_events(vec![
        vec![MenuTestEvent::Enter],
        vec![MenuTestEvent::Down, MenuTestEvent::Enter],
        vec![MenuTestEvent::Esc],
    ]);
    assert!(matches!(
        confirm_menu(&[]).unwrap(),
        ConfirmationPromptResult::Confirm
    ));
    assert!(matches!(
        confirm_menu(&[]).unwrap(),
        ConfirmationPromptResult::Back
    ));
    assert!(matches!(
        confirm_menu(&[]).unwrap(),
        ConfirmationPromptResult::Cancel
    ));

    reset_menu_events();
}
