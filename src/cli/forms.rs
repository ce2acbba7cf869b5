//! Wizard-style form framework driving the questionnaire steps.
//!
//! Each questionnaire step is described declaratively as a [`FormDescriptor`]
//! and collected by a [`FormEngine`] through a [`FormInteraction`]. Validation
//! is pure and re-runnable; the engine owns prompting, back navigation, and
//! the final confirmation loop.

use std::collections::BTreeMap;
use std::fmt;

use crate::cli::output;
use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::prompts::{
    choice_menu, confirm_menu, text_input, ChoicePromptResult, ConfirmationPromptResult,
    TextPromptResult,
};

/// Describes how prompts can be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// User supplied a concrete value.
    Value(String),
    /// User chose to keep the default/current value.
    Keep,
    /// Abort the entire questionnaire immediately.
    Cancel,
    /// Go back to the previous field.
    Back,
    /// Request additional information for the current field.
    Help,
}

/// Responses accepted when confirming the collected data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResponse {
    Confirm,
    Back,
    Cancel,
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Supported data kinds for form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Decimal,
    Scale,
}

/// Inclusive numeric bounds enforced by the built-in validators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericBounds {
    pub min: f64,
    pub max: Option<f64>,
}

impl NumericBounds {
    pub fn at_least(min: f64) -> Self {
        Self { min, max: None }
    }

    pub fn range(min: f64, max: f64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    fn check(&self, value: f64) -> Result<(), ValidationError> {
        if value < self.min {
            return Err(ValidationError::new(format!(
                "Must be at least {}",
                self.min
            )));
        }
        if let Some(max) = self.max {
            if value > max {
                return Err(ValidationError::new(format!("Cannot exceed {}", max)));
            }
        }
        Ok(())
    }
}

/// Built-in validators. Each returns the canonical string representation of
/// the accepted value.
#[derive(Debug, Clone, PartialEq)]
pub enum Validator {
    Integer(NumericBounds),
    Decimal(NumericBounds),
    Scale { min: u8, max: u8 },
}

impl Validator {
    pub fn validate(&self, input: &str) -> Result<String, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::new("Value is required"));
        }
        match self {
            Validator::Integer(bounds) => {
                let value = trimmed
                    .parse::<i64>()
                    .map_err(|_| ValidationError::new("Enter a whole number (e.g., 42)"))?;
                bounds.check(value as f64)?;
                Ok(value.to_string())
            }
            Validator::Decimal(bounds) => {
                let value = trimmed
                    .parse::<f64>()
                    .map_err(|_| ValidationError::new("Enter a numeric value"))?;
                bounds.check(value)?;
                Ok(value.to_string())
            }
            Validator::Scale { min, max } => trimmed
                .parse::<u8>()
                .ok()
                .filter(|value| (*min..=*max).contains(value))
                .map(|value| value.to_string())
                .ok_or_else(|| {
                    ValidationError::new(format!(
                        "Pick a whole number between {} and {}",
                        min, max
                    ))
                }),
        }
    }

    /// Numeric bounds carried by this validator.
    pub fn bounds(&self) -> NumericBounds {
        match self {
            Validator::Integer(bounds) | Validator::Decimal(bounds) => *bounds,
            Validator::Scale { min, max } => NumericBounds::range(f64::from(*min), f64::from(*max)),
        }
    }
}

/// Declarative description of a single form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub help: Option<&'static str>,
    pub validator: Validator,
}

impl FieldDescriptor {
    pub fn new(
        key: &'static str,
        label: &'static str,
        kind: FieldKind,
        validator: Validator,
    ) -> Self {
        Self {
            key,
            label,
            kind,
            help: None,
            validator,
        }
    }

    pub fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }

    pub fn bounds(&self) -> NumericBounds {
        self.validator.bounds()
    }
}

/// Metadata describing a full questionnaire step, including field order.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDescriptor {
    pub name: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    pub fn new(name: &'static str, fields: Vec<FieldDescriptor>) -> Self {
        Self { name, fields }
    }

    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// A step is valid when every field has a value that passes its
    /// validator. Pure; callers may re-run it at any time.
    pub fn validate_all(&self, values: &BTreeMap<String, String>) -> bool {
        self.fields.iter().all(|field| {
            values
                .get(field.key)
                .map(|raw| field.validator.validate(raw).is_ok())
                .unwrap_or(false)
        })
    }
}

/// Data provided to render the current field.
pub struct PromptContext<'a> {
    pub descriptor: &'a FieldDescriptor,
    pub default: Option<&'a str>,
    pub index: usize,
    pub total: usize,
}

/// Interaction surface used by the form engine.
pub trait FormInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse;

    fn confirm(&mut self, lines: &[String]) -> ConfirmationResponse;
}

/// Outcome of running one questionnaire step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Completed(BTreeMap<String, String>),
    Back,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSessionEvent {
    Moved,
    Repeat,
    LeftStart,
    Cancelled,
}

/// Data describing the field currently awaiting input.
pub struct FormStep<'a> {
    pub descriptor: &'a FieldDescriptor,
    pub default: Option<String>,
    pub index: usize,
    pub total: usize,
}

impl<'a> FormStep<'a> {
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

/// Represents an in-progress questionnaire step. Callers may drive the
/// session manually or use [`FormEngine::run`] to handle the full loop.
pub struct FormSession<'a> {
    descriptor: &'a FormDescriptor,
    values: BTreeMap<String, String>,
    index: usize,
    allow_back_out: bool,
}

impl<'a> FormSession<'a> {
    pub fn new(
        descriptor: &'a FormDescriptor,
        initial: BTreeMap<String, String>,
        allow_back_out: bool,
    ) -> Self {
        Self {
            descriptor,
            values: initial,
            index: 0,
            allow_back_out,
        }
    }

    pub fn current_field(&self) -> Option<FormStep<'_>> {
        self.descriptor
            .fields
            .get(self.index)
            .map(|field| FormStep {
                descriptor: field,
                default: self.values.get(field.key).cloned(),
                index: self.index,
                total: self.descriptor.fields.len(),
            })
    }

    pub fn apply_response(
        &mut self,
        response: PromptResponse,
    ) -> Result<FormSessionEvent, ValidationError> {
        let Some(field) = self.descriptor.fields.get(self.index) else {
            return Ok(FormSessionEvent::Moved);
        };

        match response {
            PromptResponse::Cancel => Ok(FormSessionEvent::Cancelled),
            PromptResponse::Back => {
                if self.index > 0 {
                    self.index -= 1;
                    Ok(FormSessionEvent::Moved)
                } else if self.allow_back_out {
                    Ok(FormSessionEvent::LeftStart)
                } else {
                    output::warning("Already at the first field.");
                    Ok(FormSessionEvent::Repeat)
                }
            }
            PromptResponse::Help => {
                if let Some(help) = field.help {
                    output::info(help);
                } else {
                    output::info("No additional information available for this field.");
                }
                Ok(FormSessionEvent::Repeat)
            }
            PromptResponse::Keep => {
                if self.values.contains_key(field.key) {
                    self.index += 1;
                    Ok(FormSessionEvent::Moved)
                } else {
                    output::warning("This field is required.");
                    Ok(FormSessionEvent::Repeat)
                }
            }
            PromptResponse::Value(raw) => match field.validator.validate(&raw) {
                Ok(value) => {
                    self.values.insert(field.key.to_string(), value);
                    self.index += 1;
                    Ok(FormSessionEvent::Moved)
                }
                Err(err) => {
                    output::warning(&err.message);
                    Err(err)
                }
            },
        }
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.descriptor.fields.len()
    }

    /// Re-opens the last field after a confirmation `Back`.
    pub fn revisit_last(&mut self) {
        self.index = self.descriptor.fields.len().saturating_sub(1);
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

/// Drives a [`FormDescriptor`] through a [`FormInteraction`].
pub struct FormEngine<'a> {
    descriptor: &'a FormDescriptor,
    defaults: BTreeMap<String, String>,
    allow_back_out: bool,
}

impl<'a> FormEngine<'a> {
    pub fn new(descriptor: &'a FormDescriptor, defaults: BTreeMap<String, String>) -> Self {
        Self {
            descriptor,
            defaults,
            allow_back_out: false,
        }
    }

    /// Lets `Back` on the first field leave the step instead of repeating it.
    pub fn with_back_out(mut self) -> Self {
        self.allow_back_out = true;
        self
    }

    pub fn run<I: FormInteraction>(&self, interaction: &mut I) -> StepOutcome {
        let mut session =
            FormSession::new(self.descriptor, self.defaults.clone(), self.allow_back_out);

        loop {
            if session.is_complete() {
                let lines = summary_lines(self.descriptor, session.values());
                match interaction.confirm(&lines) {
                    ConfirmationResponse::Confirm => {
                        return StepOutcome::Completed(session.values().clone());
                    }
                    ConfirmationResponse::Back => {
                        if self.descriptor.fields.is_empty() {
                            return StepOutcome::Cancelled;
                        }
                        session.revisit_last();
                        continue;
                    }
                    ConfirmationResponse::Cancel => return StepOutcome::Cancelled,
                }
            }

            let Some(step) = session.current_field() else {
                continue;
            };

            let response = {
                let context = PromptContext {
                    descriptor: step.descriptor,
                    default: step.default_value(),
                    index: step.index,
                    total: step.total,
                };
                interaction.prompt_field(&context)
            };

            match session.apply_response(response) {
                Ok(FormSessionEvent::Moved | FormSessionEvent::Repeat) => continue,
                Ok(FormSessionEvent::LeftStart) => return StepOutcome::Back,
                Ok(FormSessionEvent::Cancelled) => return StepOutcome::Cancelled,
                // Validation errors are already reported; re-prompt.
                Err(_) => continue,
            }
        }
    }
}

fn summary_lines(descriptor: &FormDescriptor, values: &BTreeMap<String, String>) -> Vec<String> {
    let mut lines = Vec::with_capacity(descriptor.fields.len() + 1);
    lines.push("Review your entries:".into());
    for field in &descriptor.fields {
        let value = values
            .get(field.key)
            .map(|value| value.as_str())
            .unwrap_or("[unfilled]");
        lines.push(format!("  {}: {}", field.label, value));
    }
    lines
}

/// Interactive implementation backed by the shared prompt components.
pub struct WizardInteraction;

impl WizardInteraction {
    pub fn new() -> Self {
        Self
    }

    fn prompt_text(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        self.print_step_header(context);
        match text_input(context.descriptor.label, context.default) {
            Ok(TextPromptResult::Value(value)) => PromptResponse::Value(value),
            Ok(TextPromptResult::Keep) => PromptResponse::Keep,
            Ok(TextPromptResult::Back) => PromptResponse::Back,
            Ok(TextPromptResult::Help) => PromptResponse::Help,
            Ok(TextPromptResult::Cancel) | Err(_) => PromptResponse::Cancel,
        }
    }

    fn prompt_choice(
        &mut self,
        context: &PromptContext<'_>,
        options: &[(String, String)],
    ) -> PromptResponse {
        let mut lines = Vec::new();
        if let Some(default) = context.default {
            lines.push(format!("Current answer: {}", default));
        }
        if let Some(help) = context.descriptor.help {
            lines.push(help.to_string());
        }
        lines.push("Use ↑ ↓ to highlight an option, Enter to select.".into());

        let title = self.step_title(context);
        match choice_menu(&title, &lines, options, context.default, context.index > 0) {
            Ok(ChoicePromptResult::Value(value)) => PromptResponse::Value(value),
            Ok(ChoicePromptResult::Back) => PromptResponse::Back,
            _ => PromptResponse::Cancel,
        }
    }

    fn scale_options(&self, min: u8, max: u8) -> Vec<(String, String)> {
        (min..=max)
            .map(|value| {
                let label = if value == min {
                    format!("{} — Low", value)
                } else if value == max {
                    format!("{} — High", value)
                } else {
                    value.to_string()
                };
                (value.to_string(), label)
            })
            .collect()
    }

    fn step_title(&self, context: &PromptContext<'_>) -> String {
        format!(
            "Step {} / {} — {}",
            context.index + 1,
            context.total,
            context.descriptor.label
        )
    }

    fn print_step_header(&self, context: &PromptContext<'_>) {
        let formatter = Formatter::new();
        formatter.print_header(self.step_title(context));
        if let Some(default) = context.default {
            formatter.print_detail(format!("Current answer: {}", default));
        }
        if let Some(help) = context.descriptor.help {
            formatter.print_detail(help);
        }
        let mut instructions =
            vec!["Type a value and press Enter to continue.".to_string()];
        if context.default.is_some() {
            instructions.push("Press Enter on an empty line to keep the current answer.".into());
        }
        instructions.push("Type :help for details, :back to revisit the previous field.".into());
        formatter.print_detail(instructions.join(" "));
    }
}

impl FormInteraction for WizardInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> PromptResponse {
        match context.descriptor.kind {
            FieldKind::Scale => {
                let options = match context.descriptor.validator {
                    Validator::Scale { min, max } => self.scale_options(min, max),
                    _ => self.scale_options(1, 10),
                };
                self.prompt_choice(context, &options)
            }
            FieldKind::Integer | FieldKind::Decimal => self.prompt_text(context),
        }
    }

    fn confirm(&mut self, lines: &[String]) -> ConfirmationResponse {
        let mut context_lines = Vec::new();
        context_lines.extend_from_slice(lines);
        context_lines.push(String::new());
        context_lines.push(
            "Use the menu below to confirm, edit the previous field, or cancel. ESC cancels."
                .into(),
        );
        match confirm_menu(&context_lines) {
            Ok(ConfirmationPromptResult::Confirm) => ConfirmationResponse::Confirm,
            Ok(ConfirmationPromptResult::Back) => ConfirmationResponse::Back,
            _ => ConfirmationResponse::Cancel,
        }
    }
}

impl Default for WizardInteraction {
    fn default() -> Self {
        Self::new()
    }
}
