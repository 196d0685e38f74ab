//! Submission gate states

use crate::model::FieldRef;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SubmitState {
    #[default]
    Idle,
    Validating,
    /// Busy indicator shown, native submission pending or done
    Submitting,
}

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Checks passed; the native submission fires after the delay
    Scheduled,
    /// Checks failed; these inputs were marked invalid
    Rejected { invalid: Vec<FieldRef> },
    /// A submission is already in flight; the event was ignored
    AlreadySubmitting,
}

impl SubmitOutcome {
    pub fn is_scheduled(&self) -> bool {
        matches!(self, SubmitOutcome::Scheduled)
    }
}
