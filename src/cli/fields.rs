//! Declarative field schema for the investor questionnaire.
//!
//! The two steps are pure data: ordered descriptors with labels, bounds, and
//! help texts. Everything downstream (validation, wizard flow, payload
//! assembly) is driven from here.

use std::collections::BTreeMap;

use crate::cli::forms::{FieldDescriptor, FieldKind, FormDescriptor, NumericBounds, Validator};
use crate::profile::{
    AGE_MAX, AGE_MIN, DEPENDENTS_MAX, EXPERIENCE_MAX, LIQUIDITY_MAX, LIQUIDITY_MIN, SCALE_MAX,
    SCALE_MIN,
};

/// The two questionnaire steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    BasicInfo,
    Preferences,
}

impl WizardStep {
    pub fn label(&self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Basic Info",
            WizardStep::Preferences => "Preferences",
        }
    }
}

fn integer(min: f64, max: f64) -> Validator {
    Validator::Integer(NumericBounds::range(min, max))
}

fn non_negative_amount() -> Validator {
    Validator::Decimal(NumericBounds::at_least(0.0))
}

fn scale() -> Validator {
    Validator::Scale {
        min: SCALE_MIN,
        max: SCALE_MAX,
    }
}

fn basic_info_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new(
            "age",
            "Age",
            FieldKind::Integer,
            integer(f64::from(AGE_MIN), f64::from(AGE_MAX)),
        )
        .with_help("Your current age in years."),
        FieldDescriptor::new(
            "income",
            "Annual Income",
            FieldKind::Decimal,
            non_negative_amount(),
        )
        .with_help("Your total yearly income."),
        FieldDescriptor::new(
            "capital",
            "Investable Capital",
            FieldKind::Decimal,
            non_negative_amount(),
        )
        .with_help("Funds available for investment."),
        FieldDescriptor::new(
            "expenses",
            "Annual Expenses",
            FieldKind::Decimal,
            non_negative_amount(),
        )
        .with_help("Your yearly necessary expenditures."),
        FieldDescriptor::new(
            "emi",
            "Annual EMI",
            FieldKind::Decimal,
            non_negative_amount(),
        )
        .with_help("Total yearly EMI payment obligations."),
        FieldDescriptor::new(
            "liquidity",
            "Liquidity Need (%)",
            FieldKind::Decimal,
            Validator::Decimal(NumericBounds::range(LIQUIDITY_MIN, LIQUIDITY_MAX)),
        )
        .with_help("Percentage of capital you might need for emergencies."),
        FieldDescriptor::new(
            "dependents",
            "Dependents",
            FieldKind::Integer,
            integer(0.0, f64::from(DEPENDENTS_MAX)),
        )
        .with_help("Number of financial dependents."),
        FieldDescriptor::new(
            "experience",
            "Investment Experience (Years)",
            FieldKind::Integer,
            integer(0.0, f64::from(EXPERIENCE_MAX)),
        )
        .with_help("Years of experience with investing."),
    ]
}

fn preference_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("confidence", "Confidence", FieldKind::Scale, scale())
            .with_help("How confident you are in making investment decisions."),
        FieldDescriptor::new("knowledge", "Knowledge", FieldKind::Scale, scale())
            .with_help("Your knowledge of financial and investment concepts."),
        FieldDescriptor::new(
            "comfort_with_negatives",
            "Comfort with negatives",
            FieldKind::Scale,
            scale(),
        )
        .with_help("How comfortable you are seeing negative returns in the short term."),
        FieldDescriptor::new(
            "market_awareness",
            "Market awareness",
            FieldKind::Scale,
            scale(),
        )
        .with_help("How aware you are of current market events and trends."),
    ]
}

/// Ordered descriptor for one questionnaire step.
pub fn form_for(step: WizardStep) -> FormDescriptor {
    match step {
        WizardStep::BasicInfo => FormDescriptor::new("basic_info", basic_info_fields()),
        WizardStep::Preferences => FormDescriptor::new("preferences", preference_fields()),
    }
}

/// Ordered field descriptors for one questionnaire step.
pub fn fields_for(step: WizardStep) -> Vec<FieldDescriptor> {
    form_for(step).fields
}

/// Numeric bounds for a field key, across both steps.
pub fn bounds_for(key: &str) -> Option<NumericBounds> {
    [WizardStep::BasicInfo, WizardStep::Preferences]
        .into_iter()
        .find_map(|step| {
            form_for(step)
                .field(key)
                .map(|descriptor| descriptor.bounds())
        })
}

/// Keepable pre-filled answers for one questionnaire step.
pub fn default_values(step: WizardStep) -> BTreeMap<String, String> {
    let pairs: &[(&str, &str)] = match step {
        WizardStep::BasicInfo => &[
            ("age", "45"),
            ("income", "240000"),
            ("capital", "100000"),
            ("expenses", "100000"),
            ("emi", "80000"),
            ("liquidity", "0"),
            ("dependents", "4"),
            ("experience", "0"),
        ],
        WizardStep::Preferences => &[
            ("confidence", "1"),
            ("knowledge", "1"),
            ("comfort_with_negatives", "1"),
            ("market_awareness", "1"),
        ],
    };
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}
