use anyhow::Result;

use crate::workflows::{action_label, available_actions, status_label, DocumentStatus};

pub struct ActionsCommand {
    pub status: String,
}

impl ActionsCommand {
    pub fn new(status: String) -> Self {
        Self { status }
    }

    pub fn execute(&self) -> Result<()> {
        let status: DocumentStatus = self.status.parse()?;
        let actions = available_actions(status);

        println!("📄 {} ({})", status_label(status), status);
        if actions.is_empty() {
            println!("   ⛔ Terminal status: no actions available");
            return Ok(());
        }
        for action in actions {
            println!("   ▶ {} ({})", action_label(*action), action);
        }
        Ok(())
    }
}
