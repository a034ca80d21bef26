use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use super::errors::PersistenceError;
use super::state_machine::{can_transition, next_status};
use super::types::{DocumentStatus, WorkflowAction};

/// Immutable audit entry describing one document transition.
///
/// Records are only built by the engine; fields are exposed read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    id: Uuid,
    document_id: String,
    action: WorkflowAction,
    prior_status: DocumentStatus,
    resulting_status: DocumentStatus,
    user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    pub(crate) fn new(
        document_id: String,
        action: WorkflowAction,
        prior_status: DocumentStatus,
        resulting_status: DocumentStatus,
        user_id: String,
        comment: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            action,
            prior_status,
            resulting_status,
            user_id,
            comment,
            timestamp: Utc::now(),
        }
    }

    #[cfg(feature = "database")]
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: Uuid,
        document_id: String,
        action: WorkflowAction,
        prior_status: DocumentStatus,
        resulting_status: DocumentStatus,
        user_id: String,
        comment: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            document_id,
            action,
            prior_status,
            resulting_status,
            user_id,
            comment,
            timestamp,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn action(&self) -> WorkflowAction {
        self.action
    }

    pub fn prior_status(&self) -> DocumentStatus {
        self.prior_status
    }

    pub fn resulting_status(&self) -> DocumentStatus {
        self.resulting_status
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Check the record against the lifecycle tables.
    ///
    /// Stores call this on every record they read back.
    pub(crate) fn check_consistency(&self) -> Result<(), String> {
        if !can_transition(self.prior_status, self.action) {
            return Err(format!(
                "action '{}' is not allowed from status '{}'",
                self.action, self.prior_status
            ));
        }
        let expected = next_status(self.action);
        if self.resulting_status != expected {
            return Err(format!(
                "action '{}' leads to '{}', record says '{}'",
                self.action, expected, self.resulting_status
            ));
        }
        Ok(())
    }
}

/// Append-only storage for transition records.
///
/// No update or delete operation exists.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append a record to the history
    async fn append(&self, record: &TransitionRecord) -> Result<(), PersistenceError>;

    /// All records for a document, in insertion order
    async fn records_for(&self, document_id: &str) -> Result<Vec<TransitionRecord>, PersistenceError>;

    /// Release any connections held by the store
    async fn close(&self) {}
}

/// Process-local history, lost on exit
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    records: RwLock<Vec<TransitionRecord>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, record: &TransitionRecord) -> Result<(), PersistenceError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn records_for(&self, document_id: &str) -> Result<Vec<TransitionRecord>, PersistenceError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.document_id == document_id)
            .cloned()
            .collect())
    }
}

/// History kept as JSON lines in a single file, one record per line
#[derive(Debug)]
pub struct FileHistoryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<TransitionRecord>, PersistenceError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let corrupted = |reason: String| PersistenceError::Corrupted {
                line: index + 1,
                reason,
            };
            let record: TransitionRecord =
                serde_json::from_str(line).map_err(|e| corrupted(e.to_string()))?;
            record.check_consistency().map_err(corrupted)?;
            records.push(record);
        }
        Ok(records)
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn append(&self, record: &TransitionRecord) -> Result<(), PersistenceError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        debug!(path = ?self.path, record_id = %record.id, "Appended transition record");
        Ok(())
    }

    async fn records_for(&self, document_id: &str) -> Result<Vec<TransitionRecord>, PersistenceError> {
        let records = self.read_all().await?;
        debug!(path = ?self.path, document_id, total = records.len(), "Read transition history");
        Ok(records
            .into_iter()
            .filter(|r| r.document_id == document_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(document_id: &str, action: WorkflowAction, prior: DocumentStatus) -> TransitionRecord {
        TransitionRecord::new(
            document_id.to_string(),
            action,
            prior,
            next_status(action),
            "user-1".to_string(),
            None,
        )
    }

    #[tokio::test]
    async fn test_in_memory_filters_by_document() {
        let store = InMemoryHistoryStore::new();
        store
            .append(&record("doc-1", WorkflowAction::SubmitForReview, DocumentStatus::Draft))
            .await
            .unwrap();
        store
            .append(&record("doc-2", WorkflowAction::SubmitForReview, DocumentStatus::Draft))
            .await
            .unwrap();
        store
            .append(&record("doc-1", WorkflowAction::StartReview, DocumentStatus::PendingReview))
            .await
            .unwrap();

        assert_eq!(store.len().await, 3);
        let doc1 = store.records_for("doc-1").await.unwrap();
        assert_eq!(doc1.len(), 2);
        assert_eq!(doc1[0].action(), WorkflowAction::SubmitForReview);
        assert_eq!(doc1[1].action(), WorkflowAction::StartReview);
        assert!(store.records_for("doc-3").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_store_save_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileHistoryStore::new(temp_dir.path().join("nested/history.jsonl"));

        let first = record("doc-1", WorkflowAction::SubmitForReview, DocumentStatus::Draft);
        let second = record("doc-1", WorkflowAction::StartReview, DocumentStatus::PendingReview);
        store.append(&first).await.unwrap();
        store.append(&second).await.unwrap();

        let loaded = store.records_for("doc-1").await.unwrap();
        assert_eq!(loaded, vec![first, second]);

        // A second handle on the same file sees the same data
        let reopened = FileHistoryStore::new(store.path().to_path_buf());
        assert_eq!(reopened.records_for("doc-1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_file_store_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileHistoryStore::new(temp_dir.path().join("absent.jsonl"));
        assert!(store.records_for("doc-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_file_store_reports_corrupted_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.jsonl");
        let store = FileHistoryStore::new(&path);
        store
            .append(&record("doc-1", WorkflowAction::SubmitForReview, DocumentStatus::Draft))
            .await
            .unwrap();

        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str("{not json}\n");
        std::fs::write(&path, content).unwrap();

        let err = store.records_for("doc-1").await.unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupted { line: 2, .. }));
    }

    #[tokio::test]
    async fn test_file_store_rejects_line_outside_the_tables() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.jsonl");
        let store = FileHistoryStore::new(&path);
        store
            .append(&record("d", WorkflowAction::SubmitForReview, DocumentStatus::Draft))
            .await
            .unwrap();

        // Well-formed JSON, but draft --approve--> archived is not a legal transition
        let mut forged = serde_json::to_value(record("d", WorkflowAction::Approve, DocumentStatus::InReview)).unwrap();
        forged["prior_status"] = serde_json::json!("draft");
        forged["resulting_status"] = serde_json::json!("archived");
        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str(&format!("{forged}\n"));
        std::fs::write(&path, content).unwrap();

        let err = store.records_for("d").await.unwrap_err();
        match err {
            PersistenceError::Corrupted { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("approve"), "reason was: {reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_consistency_check_on_resulting_status() {
        let mut json = serde_json::to_value(record("d", WorkflowAction::Reject, DocumentStatus::InReview)).unwrap();
        assert!(serde_json::from_value::<TransitionRecord>(json.clone())
            .unwrap()
            .check_consistency()
            .is_ok());

        json["resulting_status"] = serde_json::json!("approved");
        let tampered: TransitionRecord = serde_json::from_value(json).unwrap();
        assert!(tampered.check_consistency().unwrap_err().contains("rejected"));
    }

    #[test]
    fn test_record_serializes_without_empty_comment() {
        let rec = record("doc-1", WorkflowAction::Archive, DocumentStatus::Approved);
        let json = serde_json::to_value(&rec).unwrap();
        assert!(json.get("comment").is_none());
        assert_eq!(json["prior_status"], "approved");
        assert_eq!(json["resulting_status"], "archived");
    }
}
