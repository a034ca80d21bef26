// Document lifecycle tables
// Both tables are fixed at compile time; there is no runtime registration.

use super::types::{DocumentStatus, WorkflowAction};

/// Returns the actions that may be applied to a document in `status`.
///
/// Terminal statuses (rejected, expired, archived) return an empty slice.
pub fn available_actions(status: DocumentStatus) -> &'static [WorkflowAction] {
    match status {
        DocumentStatus::Draft => &[WorkflowAction::SubmitForReview],
        DocumentStatus::PendingReview => &[WorkflowAction::StartReview],
        DocumentStatus::InReview => &[
            WorkflowAction::Approve,
            WorkflowAction::Reject,
            WorkflowAction::RequestCorrection,
        ],
        DocumentStatus::NeedsCorrection => &[WorkflowAction::Correct],
        DocumentStatus::Approved => &[WorkflowAction::Archive],
        DocumentStatus::Rejected | DocumentStatus::Expired | DocumentStatus::Archived => &[],
    }
}

/// Resolves the status a document ends up in after `action`.
///
/// The result depends only on the action, never on the prior status.
pub fn next_status(action: WorkflowAction) -> DocumentStatus {
    match action {
        WorkflowAction::SubmitForReview => DocumentStatus::PendingReview,
        WorkflowAction::StartReview => DocumentStatus::InReview,
        WorkflowAction::Approve => DocumentStatus::Approved,
        WorkflowAction::Reject => DocumentStatus::Rejected,
        WorkflowAction::RequestCorrection => DocumentStatus::NeedsCorrection,
        WorkflowAction::Correct => DocumentStatus::PendingReview,
        WorkflowAction::Archive => DocumentStatus::Archived,
    }
}

/// Check whether `action` is allowed while the document is in `status`
pub fn can_transition(status: DocumentStatus, action: WorkflowAction) -> bool {
    available_actions(status).contains(&action)
}

/// Check if a status has no outgoing actions
pub fn is_terminal(status: DocumentStatus) -> bool {
    available_actions(status).is_empty()
}
