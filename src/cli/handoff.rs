//! In-memory handoff between the questionnaire flow and the report view.
//!
//! The shell runs one submission at a time; the slot keeps the most recent
//! accepted result so the report can be reopened from the landing menu until
//! a newer submission replaces it.

use crate::scoring::SubmissionResult;

#[derive(Debug, Default)]
pub struct ResultSlot {
    current: Option<SubmissionResult>,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces whatever was stored before.
    pub fn publish(&mut self, result: SubmissionResult) {
        self.current = Some(result);
    }

    pub fn latest(&self) -> Option<&SubmissionResult> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}
