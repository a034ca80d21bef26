// Document workflow engine
// Static lifecycle tables, validation, and an append-only transition history

pub mod engine;
pub mod errors;
pub mod history;
pub mod labels;
pub mod state_machine;
pub mod types;
pub mod validation;


pub use engine::{SimpleTransition, TransitionRequest, WorkflowEngine};
pub use errors::{PersistenceError, WorkflowError};
pub use history::{FileHistoryStore, HistoryStore, InMemoryHistoryStore, TransitionRecord};
pub use labels::{action_label, status_label};
pub use state_machine::{available_actions, can_transition, is_terminal, next_status};
pub use types::{DocumentStatus, WorkflowAction};
pub use validation::{validate_raw, validate_transition, ValidationResult};
