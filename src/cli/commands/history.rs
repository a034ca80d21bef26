use anyhow::Result;

use super::format_record;
use crate::workflows::WorkflowEngine;

pub struct HistoryCommand {
    pub document: String,
    pub json: bool,
}

impl HistoryCommand {
    pub fn new(document: String, json: bool) -> Self {
        Self { document, json }
    }

    pub async fn execute(&self, engine: &WorkflowEngine) -> Result<()> {
        let records = engine.get_document_history(&self.document).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&records)?);
            return Ok(());
        }

        println!("🕑 History for document {}", self.document);
        if records.is_empty() {
            println!("   No transitions recorded");
            return Ok(());
        }
        for record in &records {
            println!("   {}", format_record(record));
        }
        Ok(())
    }
}
