use clap::{Parser, Subcommand};

pub mod commands;

#[derive(Parser)]
#[command(name = "docflow")]
#[command(about = "Document lifecycle workflow for the ARL document manager")]
#[command(long_about = "docflow validates and records document workflow transitions \
                       (draft, review, correction, approval, archiving) and keeps an \
                       append-only history of every transition.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the actions allowed for a document status
    Actions {
        /// Current status, e.g. draft or in_review
        status: String,
    },
    /// Check whether an action is valid for a status (exit code 1 when it is not)
    Validate {
        /// Current status
        status: String,
        /// Requested action, e.g. submit_for_review
        action: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Apply an action to a document and record it in the history
    Transition {
        /// Document identifier
        #[arg(long)]
        document: String,
        /// Status the document is currently in
        #[arg(long = "from")]
        from_status: String,
        /// Action to apply
        #[arg(long)]
        action: String,
        /// Acting user identifier
        #[arg(long)]
        user: String,
        /// Optional free-text comment stored with the record
        #[arg(long)]
        comment: Option<String>,
        /// Compute the outcome without writing history
        #[arg(long, help = "Show the resulting record without storing it")]
        dry_run: bool,
    },
    /// Show the transition history of a document, newest first
    History {
        /// Document identifier
        document: String,
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the full transition table
    Table,
}
