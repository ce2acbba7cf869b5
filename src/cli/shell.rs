//! Landing menu and the questionnaire-to-report flow.

use std::io;

use dialoguer::{theme::ColorfulTheme, Confirm};

use crate::cli::fields::{form_for, WizardStep};
use crate::cli::forms::{FormEngine, StepOutcome, WizardInteraction};
use crate::cli::output;
use crate::cli::results;
use crate::cli::state::CliState;
use crate::cli::ui::menu_renderer::{MenuRenderError, MenuRenderer, MenuUI, MenuUIItem};
use crate::cli::ui::prompts::{self, TextPromptResult};
use crate::cli::wizard::{WizardController, WizardPhase};
use crate::errors::AdvisorError;
use crate::scoring::{ScoringClient, ScoringError, ScoringRequest};

const BODY_PREVIEW_LIMIT: usize = 200;

/// Entry point for the interactive shell. Loops on the landing menu until
/// the user exits.
pub fn run_cli() -> Result<(), AdvisorError> {
    let mut state = CliState::load()?;
    output::section("Investor Profile Advisor");

    loop {
        let menu = MenuUI::new(
            "Main menu",
            vec![
                MenuUIItem::new(
                    "questionnaire",
                    "Start investor questionnaire",
                    "Answer both steps and submit for scoring",
                ),
                MenuUIItem::new(
                    "results",
                    "View latest result",
                    "Reopen the most recent allocation report",
                ),
                MenuUIItem::new(
                    "settings",
                    "Scoring service settings",
                    "Endpoint, timeout, and currency symbol",
                ),
                MenuUIItem::new("exit", "Exit", "Leave the advisor"),
            ],
        );

        match MenuRenderer::new().show(&menu) {
            Ok(Some(selection)) => match selection.as_str() {
                "questionnaire" => run_wizard_flow(&mut state)?,
                "results" => show_latest_result(&state),
                "settings" => edit_settings(&mut state)?,
                _ => break,
            },
            Ok(None) | Err(MenuRenderError::Interrupted) => break,
            Err(MenuRenderError::Io(err)) => return Err(err.into()),
        }
    }

    output::info("Goodbye.");
    Ok(())
}

/// Drives the two questionnaire steps, then the submission lifecycle.
fn run_wizard_flow(state: &mut CliState) -> Result<(), AdvisorError> {
    let mut controller = WizardController::new();
    let mut interaction = WizardInteraction::new();

    loop {
        match controller.phase() {
            WizardPhase::Step1 => {
                let descriptor = form_for(WizardStep::BasicInfo);
                let engine = FormEngine::new(
                    &descriptor,
                    controller.values_for(WizardStep::BasicInfo).clone(),
                )
                .with_back_out();
                match engine.run(&mut interaction) {
                    StepOutcome::Completed(values) => {
                        controller.record_step(WizardStep::BasicInfo, values);
                        if let Err(err) = controller.go_to_step(WizardStep::Preferences) {
                            output::warning(err.to_string());
                        }
                    }
                    StepOutcome::Back | StepOutcome::Cancelled => {
                        output::info("Questionnaire abandoned.");
                        return Ok(());
                    }
                }
            }
            WizardPhase::Step2 => {
                let descriptor = form_for(WizardStep::Preferences);
                let engine = FormEngine::new(
                    &descriptor,
                    controller.values_for(WizardStep::Preferences).clone(),
                )
                .with_back_out();
                match engine.run(&mut interaction) {
                    StepOutcome::Completed(values) => {
                        controller.record_step(WizardStep::Preferences, values);
                        submit_answers(state, &mut controller);
                    }
                    StepOutcome::Back => {
                        if let Err(err) = controller.go_to_step(WizardStep::BasicInfo) {
                            output::warning(err.to_string());
                        }
                    }
                    StepOutcome::Cancelled => {
                        output::info("Questionnaire abandoned.");
                        return Ok(());
                    }
                }
            }
            WizardPhase::Submitting => {
                tracing::warn!("submission left in flight; abandoning questionnaire");
                return Ok(());
            }
            WizardPhase::Done => return Ok(()),
            WizardPhase::Failed => {
                if confirm("Submission failed. Try again with the same answers?") {
                    submit_answers(state, &mut controller);
                    continue;
                }
                if confirm("Edit your answers instead?") {
                    if let Err(err) = controller.go_to_step(WizardStep::Preferences) {
                        output::warning(err.to_string());
                    }
                } else {
                    output::info("Questionnaire abandoned; your answers were not sent.");
                    return Ok(());
                }
            }
        }
    }
}

/// One submission attempt. Moves the controller to `Done` or `Failed` and
/// publishes the report on success.
fn submit_answers(state: &mut CliState, controller: &mut WizardController) {
    let (basic, preferences) = match controller.begin_submission() {
        Ok(profiles) => profiles,
        Err(err) => {
            output::warning(err.to_string());
            return;
        }
    };
    let request = ScoringRequest::from_profiles(&basic, &preferences);
    output::info(format!("Submitting to {} ...", state.config.submit_url()));

    let outcome =
        ScoringClient::from_config(&state.config).and_then(|client| client.submit(&request));
    match outcome {
        Ok(result) => {
            if let Err(err) = controller.complete_submission() {
                tracing::warn!(error = %err, "wizard state out of sync");
            }
            output::success("Submission accepted.");
            output::blank_line();
            println!(
                "{}",
                results::render_report(&result, &state.config.currency_symbol)
            );
            state.slot.publish(result);
        }
        Err(err) => {
            if let Err(state_err) = controller.fail_submission() {
                tracing::warn!(error = %state_err, "wizard state out of sync");
            }
            report_scoring_error(&err);
        }
    }
}

fn report_scoring_error(err: &ScoringError) {
    match err {
        ScoringError::Server { status, body } => {
            output::error(format!(
                "Scoring service rejected the submission (HTTP {status})."
            ));
            let preview = body_preview(body);
            if !preview.is_empty() {
                output::info(format!("Service said: {preview}"));
            }
        }
        other => output::error(other.to_string()),
    }
}

fn body_preview(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_PREVIEW_LIMIT {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(BODY_PREVIEW_LIMIT).collect();
    format!("{cut}...")
}

fn show_latest_result(state: &CliState) {
    match state.slot.latest() {
        Some(result) => println!(
            "{}",
            results::render_report(result, &state.config.currency_symbol)
        ),
        None => output::info(results::render_placeholder()),
    }
}

fn edit_settings(state: &mut CliState) -> Result<(), AdvisorError> {
    output::section("Scoring service settings");
    output::info(format!("Config file: {}", state.config_path().display()));

    let Some(base_url) = prompt_setting("Base URL", &state.config.base_url)? else {
        output::info("Settings unchanged.");
        return Ok(());
    };
    let Some(submit_path) = prompt_setting("Submit path", &state.config.submit_path)? else {
        output::info("Settings unchanged.");
        return Ok(());
    };
    let timeout_default = state.config.timeout_secs.to_string();
    let Some(timeout_raw) = prompt_setting("Request timeout (seconds)", &timeout_default)? else {
        output::info("Settings unchanged.");
        return Ok(());
    };
    let Some(currency) = prompt_setting("Currency symbol", &state.config.currency_symbol)? else {
        output::info("Settings unchanged.");
        return Ok(());
    };

    match timeout_raw.parse::<u64>() {
        Ok(secs) if secs > 0 => state.config.timeout_secs = secs,
        _ => output::warning("Timeout must be a positive number of seconds; keeping the previous value."),
    }
    state.config.base_url = base_url;
    state.config.submit_path = submit_path;
    state.config.currency_symbol = currency;

    state.save_config()?;
    output::success(format!("Saved settings to {}", state.config_path().display()));
    Ok(())
}

/// Prompts for one setting. `None` means the user backed out of the whole
/// settings flow; an empty submit keeps the current value.
fn prompt_setting(label: &str, current: &str) -> io::Result<Option<String>> {
    output::info(format!("{label} [{current}]"));
    Ok(match prompts::text_input(label, Some(current))? {
        TextPromptResult::Value(value) if !value.is_empty() => Some(value),
        TextPromptResult::Value(_) | TextPromptResult::Keep | TextPromptResult::Help => {
            Some(current.to_string())
        }
        TextPromptResult::Back | TextPromptResult::Cancel => None,
    })
}

fn confirm(prompt: &str) -> bool {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(true)
        .interact()
        .unwrap_or(false)
}
