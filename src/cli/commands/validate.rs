use anyhow::Result;

use crate::workflows::{validate_raw, ValidationResult};

pub struct ValidateCommand {
    pub status: String,
    pub action: String,
    pub json: bool,
}

impl ValidateCommand {
    pub fn new(status: String, action: String, json: bool) -> Self {
        Self {
            status,
            action,
            json,
        }
    }

    /// Prints the outcome and returns it so the caller can pick an exit code
    pub fn execute(&self) -> Result<ValidationResult> {
        let result = validate_raw(&self.status, &self.action);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if result.valid {
            println!("✅ {} → {}: valid", self.status, self.action);
        } else {
            println!(
                "❌ {}",
                result.error.as_deref().unwrap_or("transition is not valid")
            );
        }
        Ok(result)
    }
}
