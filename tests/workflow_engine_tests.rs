//! Integration tests for the document workflow engine
//!
//! These tests drive the public API end to end: validation, execution,
//! history, and the file-backed store.

use docflow::{
    validate_raw, DocumentStatus, FileHistoryStore, TransitionRecord, TransitionRequest,
    WorkflowAction, WorkflowEngine, WorkflowError,
};
use std::sync::Arc;
use tempfile::TempDir;

/// Stand-in for the caller-owned document store: applies resulting statuses
struct DocumentView {
    id: String,
    status: DocumentStatus,
}

impl DocumentView {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            status: DocumentStatus::Draft,
        }
    }

    async fn apply(
        &mut self,
        engine: &WorkflowEngine,
        action: WorkflowAction,
        user: &str,
    ) -> Result<TransitionRecord, WorkflowError> {
        let record = engine
            .execute_transition(TransitionRequest::new(self.id.clone(), action, self.status, user))
            .await?;
        self.status = record.resulting_status();
        Ok(record)
    }
}

#[test]
fn test_validate_scenarios() {
    let ok = validate_raw("draft", "submit_for_review");
    assert!(ok.valid);

    let bad = validate_raw("draft", "approve");
    assert!(!bad.valid);
    let message = bad.error.unwrap();
    assert!(message.contains("approve"), "message was: {message}");
    assert!(message.contains("draft"), "message was: {message}");
}

#[tokio::test]
async fn test_happy_path_produces_chained_history() {
    let engine = WorkflowEngine::in_memory();
    let mut doc = DocumentView::new("SST-2024-001");

    doc.apply(&engine, WorkflowAction::SubmitForReview, "preparer-1").await.unwrap();
    doc.apply(&engine, WorkflowAction::StartReview, "reviewer-1").await.unwrap();
    doc.apply(&engine, WorkflowAction::Approve, "reviewer-1").await.unwrap();
    assert_eq!(doc.status, DocumentStatus::Approved);

    let mut history = engine.get_document_history(&doc.id).await.unwrap();
    assert_eq!(history.len(), 3);

    // Oldest first for the chain check
    history.reverse();
    assert_eq!(history[0].prior_status(), DocumentStatus::Draft);
    assert_eq!(history[2].resulting_status(), DocumentStatus::Approved);
    for pair in history.windows(2) {
        assert_eq!(pair[0].resulting_status(), pair[1].prior_status());
    }
}

#[tokio::test]
async fn test_correction_loop() {
    let engine = WorkflowEngine::in_memory();
    let mut doc = DocumentView::new("doc-loop");

    for action in [
        WorkflowAction::SubmitForReview,
        WorkflowAction::StartReview,
        WorkflowAction::RequestCorrection,
        WorkflowAction::Correct,
        WorkflowAction::StartReview,
        WorkflowAction::Approve,
        WorkflowAction::Archive,
    ] {
        doc.apply(&engine, action, "u").await.unwrap();
    }
    assert_eq!(doc.status, DocumentStatus::Archived);

    let err = doc.apply(&engine, WorkflowAction::Archive, "u").await.unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidTransition { status: DocumentStatus::Archived, .. }));
    assert_eq!(engine.get_document_history("doc-loop").await.unwrap().len(), 7);
}

#[tokio::test]
async fn test_stale_prior_status_is_validated_as_stated() {
    let engine = WorkflowEngine::in_memory();
    let mut doc = DocumentView::new("doc-stale");
    doc.apply(&engine, WorkflowAction::SubmitForReview, "u").await.unwrap();

    // The document is pending review, but the caller claims it is still a draft
    // and asks for an action that is illegal from draft.
    let err = engine
        .execute_transition(TransitionRequest::new(
            "doc-stale",
            WorkflowAction::StartReview,
            DocumentStatus::Draft,
            "u",
        ))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        WorkflowError::InvalidTransition {
            status: DocumentStatus::Draft,
            action: WorkflowAction::StartReview,
            ..
        }
    ));
    assert_eq!(engine.get_document_history("doc-stale").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_reject_with_comment_in_file_store() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("history.jsonl");
    let engine = WorkflowEngine::new(Arc::new(FileHistoryStore::new(&path)));

    let record = engine
        .execute_transition(
            TransitionRequest::new("doc-r", WorkflowAction::Reject, DocumentStatus::InReview, "reviewer-2")
                .with_comment("missing signature"),
        )
        .await
        .unwrap();
    assert_eq!(record.resulting_status(), DocumentStatus::Rejected);

    // A fresh engine over the same file sees the persisted record
    let reopened = WorkflowEngine::new(Arc::new(FileHistoryStore::new(&path)));
    let history = reopened.get_document_history("doc-r").await.unwrap();
    assert_eq!(history, vec![record]);
    assert_eq!(history[0].prior_status(), DocumentStatus::InReview);
    assert_eq!(history[0].comment(), Some("missing signature"));
}

#[tokio::test]
async fn test_history_is_restartable() {
    let engine = WorkflowEngine::in_memory();
    engine
        .execute_transition(TransitionRequest::new(
            "doc-h",
            WorkflowAction::SubmitForReview,
            DocumentStatus::Draft,
            "u",
        ))
        .await
        .unwrap();

    let first = engine.get_document_history("doc-h").await.unwrap();
    let second = engine.get_document_history("doc-h").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_simple_transition_then_commit() {
    let engine = WorkflowEngine::in_memory();
    let outcome = engine
        .execute_simple_transition(
            "doc-s",
            DocumentStatus::Draft,
            WorkflowAction::SubmitForReview,
            "u",
            Some("first pass".to_string()),
        )
        .unwrap();
    assert_eq!(outcome.resulting_status, DocumentStatus::PendingReview);
    assert!(engine.get_document_history("doc-s").await.unwrap().is_empty());

    engine.commit(outcome.record).await.unwrap();
    let history = engine.get_document_history("doc-s").await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].comment(), Some("first pass"));
}
