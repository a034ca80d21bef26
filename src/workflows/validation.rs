//! Validation rules for document transitions
//!
//! Pure functions over the static tables in [`super::state_machine`].

use serde::Serialize;

use super::errors::WorkflowError;
use super::labels::action_label;
use super::state_machine::can_transition;
use super::types::{DocumentStatus, WorkflowAction};

/// Result of a validation check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Whether the transition is allowed
    pub valid: bool,

    /// Reason for failure (if valid is false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip)]
    kind: Option<Rejection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rejection {
    NotAllowed {
        status: DocumentStatus,
        action: WorkflowAction,
    },
    UnknownStatus(String),
    UnknownAction(String),
}

impl ValidationResult {
    pub fn success() -> Self {
        ValidationResult {
            valid: true,
            error: None,
            kind: None,
        }
    }

    fn failure(kind: Rejection) -> Self {
        let message = match &kind {
            Rejection::NotAllowed { status, action } => format!(
                "the action '{}' ({}) is not valid for the current status '{}'",
                action_label(*action),
                action,
                status
            ),
            Rejection::UnknownStatus(raw) => format!("unrecognized status '{raw}'"),
            Rejection::UnknownAction(raw) => format!("unrecognized action '{raw}'"),
        };
        ValidationResult {
            valid: false,
            error: Some(message),
            kind: Some(kind),
        }
    }

    /// Convert a failed validation into the matching [`WorkflowError`]
    pub fn into_result(self) -> Result<(), WorkflowError> {
        let Some(kind) = self.kind else {
            return Ok(());
        };
        Err(match kind {
            Rejection::NotAllowed { status, action } => WorkflowError::InvalidTransition {
                action,
                status,
                message: self.error.unwrap_or_default(),
            },
            Rejection::UnknownStatus(raw) => WorkflowError::UnrecognizedStatus(raw),
            Rejection::UnknownAction(raw) => WorkflowError::UnrecognizedAction(raw),
        })
    }
}

/// Validate applying `action` to a document currently in `status`.
pub fn validate_transition(status: DocumentStatus, action: WorkflowAction) -> ValidationResult {
    if !can_transition(status, action) {
        return ValidationResult::failure(Rejection::NotAllowed { status, action });
    }
    ValidationResult::success()
}

/// Validate a transition given as raw identifiers, e.g. read back from storage.
///
/// The status is checked first, so an unknown status is reported even when
/// the action is unknown as well.
pub fn validate_raw(status: &str, action: &str) -> ValidationResult {
    let Ok(status) = status.parse::<DocumentStatus>() else {
        return ValidationResult::failure(Rejection::UnknownStatus(status.to_string()));
    };
    let Ok(action) = action.parse::<WorkflowAction>() else {
        return ValidationResult::failure(Rejection::UnknownAction(action.to_string()));
    };
    validate_transition(status, action)
}
