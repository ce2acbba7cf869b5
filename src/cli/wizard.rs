//! Two-step questionnaire state machine.
//!
//! The controller owns the raw answers for both steps and the submission
//! lifecycle. Step transitions are gated on full validity of the step being
//! left, and a failed submission keeps every answer so the user can retry
//! without re-entering anything.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::cli::fields::{default_values, form_for, WizardStep};
use crate::profile::{BasicProfile, PreferenceProfile, ProfileError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Step1,
    Step2,
    Submitting,
    Done,
    Failed,
}

impl WizardPhase {
    pub fn label(&self) -> &'static str {
        match self {
            WizardPhase::Step1 => "step 1",
            WizardPhase::Step2 => "step 2",
            WizardPhase::Submitting => "submitting",
            WizardPhase::Done => "done",
            WizardPhase::Failed => "failed",
        }
    }
}

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("cannot move from {from} to {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },
    #[error("{step} has missing or invalid answers")]
    IncompleteStep { step: &'static str },
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// Drives the questionnaire through its phases and holds the raw answers.
pub struct WizardController {
    phase: WizardPhase,
    basic_values: BTreeMap<String, String>,
    preference_values: BTreeMap<String, String>,
}

impl WizardController {
    /// Fresh controller seeded with the keepable defaults for both steps.
    pub fn new() -> Self {
        Self {
            phase: WizardPhase::Step1,
            basic_values: default_values(WizardStep::BasicInfo),
            preference_values: default_values(WizardStep::Preferences),
        }
    }

    /// Controller with no pre-filled answers, used when every field must be
    /// entered explicitly.
    pub fn empty() -> Self {
        Self {
            phase: WizardPhase::Step1,
            basic_values: BTreeMap::new(),
            preference_values: BTreeMap::new(),
        }
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn values_for(&self, step: WizardStep) -> &BTreeMap<String, String> {
        match step {
            WizardStep::BasicInfo => &self.basic_values,
            WizardStep::Preferences => &self.preference_values,
        }
    }

    /// Stores the collected answers for one step. Recording does not advance
    /// the phase; call [`WizardController::go_to_step`] or
    /// [`WizardController::begin_submission`] afterwards.
    pub fn record_step(&mut self, step: WizardStep, values: BTreeMap<String, String>) {
        match step {
            WizardStep::BasicInfo => self.basic_values = values,
            WizardStep::Preferences => self.preference_values = values,
        }
    }

    /// Whether every field of `step` currently holds a valid answer.
    pub fn step_is_valid(&self, step: WizardStep) -> bool {
        form_for(step).validate_all(self.values_for(step))
    }

    /// Moves to another step. Advancing past a step requires that step to be
    /// fully valid; going backwards is always allowed from an editing phase.
    pub fn go_to_step(&mut self, step: WizardStep) -> Result<(), WizardError> {
        let target = match step {
            WizardStep::BasicInfo => WizardPhase::Step1,
            WizardStep::Preferences => WizardPhase::Step2,
        };
        match (self.phase, target) {
            (WizardPhase::Step1, WizardPhase::Step2) => {
                if !self.step_is_valid(WizardStep::BasicInfo) {
                    return Err(WizardError::IncompleteStep {
                        step: WizardStep::BasicInfo.label(),
                    });
                }
                self.phase = WizardPhase::Step2;
                Ok(())
            }
            (WizardPhase::Step2, WizardPhase::Step1) => {
                self.phase = WizardPhase::Step1;
                Ok(())
            }
            (WizardPhase::Failed, WizardPhase::Step1) | (WizardPhase::Failed, WizardPhase::Step2) => {
                self.phase = target;
                Ok(())
            }
            (current, _) if current == target => Ok(()),
            (current, _) => Err(WizardError::InvalidTransition {
                from: current.label(),
                to: target.label(),
            }),
        }
    }

    /// Starts a submission. Allowed from step 2 or after a failure; both steps
    /// must be fully valid. Returns the typed profiles to send. A second call
    /// while a submission is in flight leaves the state untouched.
    pub fn begin_submission(&mut self) -> Result<(BasicProfile, PreferenceProfile), WizardError> {
        match self.phase {
            WizardPhase::Submitting => return Err(WizardError::SubmissionInFlight),
            WizardPhase::Step2 | WizardPhase::Failed => {}
            other => {
                return Err(WizardError::InvalidTransition {
                    from: other.label(),
                    to: WizardPhase::Submitting.label(),
                })
            }
        }
        if !self.step_is_valid(WizardStep::BasicInfo) {
            return Err(WizardError::IncompleteStep {
                step: WizardStep::BasicInfo.label(),
            });
        }
        if !self.step_is_valid(WizardStep::Preferences) {
            return Err(WizardError::IncompleteStep {
                step: WizardStep::Preferences.label(),
            });
        }
        let basic = BasicProfile::from_values(&self.basic_values)?;
        let preferences = PreferenceProfile::from_values(&self.preference_values)?;
        self.phase = WizardPhase::Submitting;
        Ok((basic, preferences))
    }

    /// Marks the in-flight submission as accepted.
    pub fn complete_submission(&mut self) -> Result<(), WizardError> {
        match self.phase {
            WizardPhase::Submitting => {
                self.phase = WizardPhase::Done;
                Ok(())
            }
            other => Err(WizardError::InvalidTransition {
                from: other.label(),
                to: WizardPhase::Done.label(),
            }),
        }
    }

    /// Marks the in-flight submission as failed. All answers are retained so
    /// the user can edit or retry immediately.
    pub fn fail_submission(&mut self) -> Result<(), WizardError> {
        match self.phase {
            WizardPhase::Submitting => {
                self.phase = WizardPhase::Failed;
                Ok(())
            }
            other => Err(WizardError::InvalidTransition {
                from: other.label(),
                to: WizardPhase::Failed.label(),
            }),
        }
    }
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}
