use thiserror::Error;

use super::types::{DocumentStatus, WorkflowAction};

/// Errors raised by the workflow engine
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The action is not allowed for the stated status (includes terminal statuses)
    #[error("{message}")]
    InvalidTransition {
        action: WorkflowAction,
        status: DocumentStatus,
        message: String,
    },

    #[error("unrecognized status '{0}'")]
    UnrecognizedStatus(String),

    #[error("unrecognized action '{0}'")]
    UnrecognizedAction(String),

    /// The history write or read failed; no status change may be assumed
    #[error("history store error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl WorkflowError {
    /// Stable error code for programmatic handling
    pub fn code(&self) -> &'static str {
        match self {
            WorkflowError::InvalidTransition { .. } => "INVALID_TRANSITION",
            WorkflowError::UnrecognizedStatus(_) => "UNRECOGNIZED_STATUS",
            WorkflowError::UnrecognizedAction(_) => "UNRECOGNIZED_ACTION",
            WorkflowError::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }

    pub fn is_validation(&self) -> bool {
        !matches!(self, WorkflowError::Persistence(_))
    }
}

/// Errors that can occur while reading or appending transition history
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Corrupted history at line {line}: {reason}")]
    Corrupted { line: usize, reason: String },

    #[cfg(feature = "database")]
    #[error("Invalid history row {id}: {reason}")]
    InvalidRow { id: String, reason: String },

    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[cfg(feature = "database")]
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let invalid = WorkflowError::InvalidTransition {
            action: WorkflowAction::Approve,
            status: DocumentStatus::Draft,
            message: "nope".into(),
        };
        assert_eq!(invalid.code(), "INVALID_TRANSITION");
        assert_eq!(WorkflowError::UnrecognizedStatus("x".into()).code(), "UNRECOGNIZED_STATUS");
        assert_eq!(WorkflowError::UnrecognizedAction("x".into()).code(), "UNRECOGNIZED_ACTION");

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let persistence = WorkflowError::from(PersistenceError::from(io));
        assert_eq!(persistence.code(), "PERSISTENCE_ERROR");
        assert!(!persistence.is_validation());
        assert!(invalid.is_validation());
    }

    #[test]
    fn test_invalid_transition_displays_message() {
        let err = WorkflowError::InvalidTransition {
            action: WorkflowAction::Reject,
            status: DocumentStatus::Archived,
            message: "custom message".into(),
        };
        assert_eq!(err.to_string(), "custom message");
    }
}
