use crate::workflows::{action_label, status_label, TransitionRecord};

pub mod actions;
pub mod history;
pub mod table;
pub mod transition;
pub mod validate;

/// One-line, human-readable rendering of a history record
pub(crate) fn format_record(record: &TransitionRecord) -> String {
    let mut line = format!(
        "{} │ {} │ {} → {} │ {}",
        record.timestamp().format("%Y-%m-%d %H:%M:%S"),
        action_label(record.action()),
        status_label(record.prior_status()),
        status_label(record.resulting_status()),
        record.user_id()
    );
    if let Some(comment) = record.comment() {
        line.push_str(&format!(" │ \"{comment}\""));
    }
    line
}

pub fn show_how_to_get_started() {
    println!("📄 docflow - Document workflow engine");
    println!();
    println!("Commands:");
    println!("  📋 docflow table                         # Full transition table");
    println!("  🔎 docflow actions <status>              # Actions allowed for a status");
    println!("  ✅ docflow validate <status> <action>    # Check a transition");
    println!("  🔀 docflow transition --document ...     # Apply and record a transition");
    println!("  🕑 docflow history <document>            # Transition history");
}
