use anyhow::Result;

use crate::workflows::{
    action_label, available_actions, next_status, status_label, DocumentStatus,
};

pub struct TableCommand;

impl TableCommand {
    pub fn execute(&self) -> Result<()> {
        println!("🔀 DOCUMENT WORKFLOW");
        println!("====================");
        for status in DocumentStatus::ALL {
            let actions = available_actions(*status);
            println!();
            println!("{} ({})", status_label(*status), status);
            if actions.is_empty() {
                println!("   ⛔ terminal");
            }
            for action in actions {
                println!(
                    "   ▶ {} ({}) → {}",
                    action_label(*action),
                    action,
                    next_status(*action)
                );
            }
        }
        Ok(())
    }
}
