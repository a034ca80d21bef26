use std::sync::Arc;
use tracing::{debug, info, warn};

use super::errors::WorkflowError;
use super::history::{HistoryStore, InMemoryHistoryStore, TransitionRecord};
use super::labels::action_label;
use super::state_machine::next_status;
use super::types::{DocumentStatus, WorkflowAction};
use super::validation::validate_transition;

/// A caller's request to move a document through the workflow.
///
/// There is no field for the resulting status: it is always resolved from the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRequest {
    pub document_id: String,
    pub action: WorkflowAction,
    /// Status the caller believes the document is in; validation trusts it as given
    pub prior_status: DocumentStatus,
    pub user_id: String,
    pub comment: Option<String>,
}

impl TransitionRequest {
    pub fn new(
        document_id: impl Into<String>,
        action: WorkflowAction,
        prior_status: DocumentStatus,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            document_id: document_id.into(),
            action,
            prior_status,
            user_id: user_id.into(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Outcome of a transition computed without touching the history store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleTransition {
    pub resulting_status: DocumentStatus,
    /// Record the caller may hand to [`WorkflowEngine::commit`] or discard
    pub record: TransitionRecord,
}

/// Validates transitions and appends them to a history store.
///
/// The engine never touches the document itself: once a transition is
/// returned, the caller applies `resulting_status` to its own document
/// record. A failure between the two writes leaves history ahead of the
/// document; nothing reconciles them.
#[derive(Clone)]
pub struct WorkflowEngine {
    store: Arc<dyn HistoryStore>,
}

impl std::fmt::Debug for WorkflowEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowEngine").finish_non_exhaustive()
    }
}

impl Default for WorkflowEngine {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl WorkflowEngine {
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self { store }
    }

    /// Engine backed by a fresh [`InMemoryHistoryStore`]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryHistoryStore::new()))
    }

    /// Close the underlying history store
    pub async fn close(&self) {
        self.store.close().await;
    }

    /// Validate, resolve and persist a transition.
    ///
    /// Validation errors are returned before anything is written. A store
    /// failure means no record exists and the caller must not apply the
    /// new status.
    pub async fn execute_transition(
        &self,
        request: TransitionRequest,
    ) -> Result<TransitionRecord, WorkflowError> {
        let record = self.build_record(
            request.document_id,
            request.prior_status,
            request.action,
            request.user_id,
            request.comment,
        )?;

        self.store.append(&record).await?;

        info!(
            document_id = %record.document_id(),
            action = %record.action(),
            from_status = %record.prior_status(),
            to_status = %record.resulting_status(),
            user_id = %record.user_id(),
            record_id = %record.id(),
            "Document workflow transition recorded"
        );

        Ok(record)
    }

    /// Validate and resolve a transition without writing history.
    pub fn execute_simple_transition(
        &self,
        document_id: impl Into<String>,
        prior_status: DocumentStatus,
        action: WorkflowAction,
        user_id: impl Into<String>,
        comment: Option<String>,
    ) -> Result<SimpleTransition, WorkflowError> {
        let record = self.build_record(
            document_id.into(),
            prior_status,
            action,
            user_id.into(),
            comment,
        )?;

        Ok(SimpleTransition {
            resulting_status: record.resulting_status(),
            record,
        })
    }

    /// Persist a record produced by [`Self::execute_simple_transition`].
    ///
    /// The record's status pair is checked again against the tables, so a
    /// record edited after the fact is refused.
    pub async fn commit(&self, record: TransitionRecord) -> Result<TransitionRecord, WorkflowError> {
        validate_transition(record.prior_status(), record.action()).into_result()?;

        let expected = next_status(record.action());
        if record.resulting_status() != expected {
            warn!(
                document_id = %record.document_id(),
                action = %record.action(),
                claimed = %record.resulting_status(),
                expected = %expected,
                "Refusing record with inconsistent resulting status"
            );
            return Err(WorkflowError::InvalidTransition {
                action: record.action(),
                status: record.prior_status(),
                message: format!(
                    "the action '{}' ({}) leads to '{}', not '{}'",
                    action_label(record.action()),
                    record.action(),
                    expected,
                    record.resulting_status()
                ),
            });
        }

        self.store.append(&record).await?;
        info!(
            document_id = %record.document_id(),
            action = %record.action(),
            to_status = %record.resulting_status(),
            record_id = %record.id(),
            "Committed precomputed transition"
        );
        Ok(record)
    }

    /// Transition history for a document, most recent first.
    ///
    /// Ordering uses the wall-clock timestamp of each record, with insertion
    /// order as the secondary key: of two records with equal timestamps the
    /// later insert comes first. A record stamped before an earlier insert
    /// (the clock stepped back) is listed after it.
    pub async fn get_document_history(
        &self,
        document_id: &str,
    ) -> Result<Vec<TransitionRecord>, WorkflowError> {
        let mut records = self.store.records_for(document_id).await?;
        // Reversed first so the stable sort leaves ties newest-insert first
        records.reverse();
        records.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));

        debug!(document_id, count = records.len(), "Loaded document history");
        Ok(records)
    }

    fn build_record(
        &self,
        document_id: String,
        prior_status: DocumentStatus,
        action: WorkflowAction,
        user_id: String,
        comment: Option<String>,
    ) -> Result<TransitionRecord, WorkflowError> {
        if let Err(e) = validate_transition(prior_status, action).into_result() {
            warn!(
                document_id = %document_id,
                action = %action,
                status = %prior_status,
                error = %e,
                "Rejected document workflow transition"
            );
            return Err(e);
        }

        Ok(TransitionRecord::new(
            document_id,
            action,
            prior_status,
            next_status(action),
            user_id,
            comment,
        ))
    }
}
