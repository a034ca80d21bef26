// Display labels (es-CO) shown to users of the document manager

use super::types::{DocumentStatus, WorkflowAction};

/// Localized name of an action, as rendered on action buttons
pub fn action_label(action: WorkflowAction) -> &'static str {
    match action {
        WorkflowAction::SubmitForReview => "Enviar a revisión",
        WorkflowAction::StartReview => "Iniciar revisión",
        WorkflowAction::Approve => "Aprobar",
        WorkflowAction::Reject => "Rechazar",
        WorkflowAction::RequestCorrection => "Solicitar corrección",
        WorkflowAction::Correct => "Corregir",
        WorkflowAction::Archive => "Archivar",
    }
}

/// Localized name of a status
pub fn status_label(status: DocumentStatus) -> &'static str {
    match status {
        DocumentStatus::Draft => "Borrador",
        DocumentStatus::PendingReview => "Pendiente de revisión",
        DocumentStatus::InReview => "En revisión",
        DocumentStatus::NeedsCorrection => "Requiere corrección",
        DocumentStatus::Approved => "Aprobado",
        DocumentStatus::Rejected => "Rechazado",
        DocumentStatus::Expired => "Vencido",
        DocumentStatus::Archived => "Archivado",
    }
}
