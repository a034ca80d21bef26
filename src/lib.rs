// docflow library - document lifecycle workflow engine
// Exposes the engine, its history stores and the CLI commands for testing and integration

pub mod cli;
pub mod config;
pub mod database;
pub mod telemetry;
pub mod workflows;

// Re-export key types for easy access
pub use config::{config, init_config, DocflowConfig, HistoryBackend};
#[cfg(feature = "database")]
pub use database::SqliteHistoryStore;
pub use telemetry::{create_transition_span, generate_correlation_id, init_telemetry};
pub use workflows::{
    action_label, available_actions, can_transition, is_terminal, next_status, status_label,
    validate_raw, validate_transition, DocumentStatus, FileHistoryStore, HistoryStore,
    InMemoryHistoryStore, PersistenceError, SimpleTransition, TransitionRecord,
    TransitionRequest, ValidationResult, WorkflowAction, WorkflowEngine, WorkflowError,
};
