use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::WorkflowError;

/// Lifecycle stage of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Draft,
    PendingReview,
    InReview,
    NeedsCorrection,
    Approved,
    Rejected,
    Expired,
    Archived,
}

impl DocumentStatus {
    /// Every status, in lifecycle order
    pub const ALL: &'static [DocumentStatus] = &[
        DocumentStatus::Draft,
        DocumentStatus::PendingReview,
        DocumentStatus::InReview,
        DocumentStatus::NeedsCorrection,
        DocumentStatus::Approved,
        DocumentStatus::Rejected,
        DocumentStatus::Expired,
        DocumentStatus::Archived,
    ];

    /// Wire identifier, as stored alongside documents and history records
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Draft => "draft",
            DocumentStatus::PendingReview => "pending_review",
            DocumentStatus::InReview => "in_review",
            DocumentStatus::NeedsCorrection => "needs_correction",
            DocumentStatus::Approved => "approved",
            DocumentStatus::Rejected => "rejected",
            DocumentStatus::Expired => "expired",
            DocumentStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| WorkflowError::UnrecognizedStatus(s.to_string()))
    }
}

/// Named operation that moves a document from one status to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowAction {
    SubmitForReview,
    StartReview,
    Approve,
    Reject,
    RequestCorrection,
    Correct,
    Archive,
}

impl WorkflowAction {
    pub const ALL: &'static [WorkflowAction] = &[
        WorkflowAction::SubmitForReview,
        WorkflowAction::StartReview,
        WorkflowAction::Approve,
        WorkflowAction::Reject,
        WorkflowAction::RequestCorrection,
        WorkflowAction::Correct,
        WorkflowAction::Archive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowAction::SubmitForReview => "submit_for_review",
            WorkflowAction::StartReview => "start_review",
            WorkflowAction::Approve => "approve",
            WorkflowAction::Reject => "reject",
            WorkflowAction::RequestCorrection => "request_correction",
            WorkflowAction::Correct => "correct",
            WorkflowAction::Archive => "archive",
        }
    }
}

impl fmt::Display for WorkflowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowAction {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkflowAction::ALL
            .iter()
            .copied()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| WorkflowError::UnrecognizedAction(s.to_string()))
    }
}
