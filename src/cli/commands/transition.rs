use anyhow::Result;
use tracing::Instrument;

use super::format_record;
use crate::telemetry::{create_transition_span, generate_correlation_id};
use crate::workflows::{
    status_label, DocumentStatus, TransitionRecord, TransitionRequest, WorkflowAction,
    WorkflowEngine,
};

pub struct TransitionCommand {
    pub document: String,
    pub from_status: String,
    pub action: String,
    pub user: String,
    pub comment: Option<String>,
    pub dry_run: bool,
}

impl TransitionCommand {
    pub async fn execute(&self, engine: &WorkflowEngine) -> Result<TransitionRecord> {
        let prior_status: DocumentStatus = self.from_status.parse()?;
        let action: WorkflowAction = self.action.parse()?;

        let correlation_id = generate_correlation_id();
        let span = create_transition_span(
            if self.dry_run { "simulate" } else { "execute" },
            &self.document,
            Some(&self.user),
            &correlation_id,
        );

        let record = if self.dry_run {
            let _entered = span.enter();
            engine
                .execute_simple_transition(
                    self.document.clone(),
                    prior_status,
                    action,
                    self.user.clone(),
                    self.comment.clone(),
                )?
                .record
        } else {
            let mut request =
                TransitionRequest::new(self.document.clone(), action, prior_status, self.user.clone());
            request.comment = self.comment.clone();
            engine.execute_transition(request).instrument(span).await?
        };

        if self.dry_run {
            println!("🔍 Dry run: nothing was recorded");
        } else {
            println!("✅ Transition recorded ({})", record.id());
        }
        println!("   {}", format_record(&record));
        println!(
            "   📌 Apply status '{}' ({}) to document {}",
            record.resulting_status(),
            status_label(record.resulting_status()),
            record.document_id()
        );
        Ok(record)
    }
}
