use anyhow::Result;
use clap::Parser;

use docflow::cli::commands::{
    actions::ActionsCommand, history::HistoryCommand, show_how_to_get_started,
    table::TableCommand, transition::TransitionCommand, validate::ValidateCommand,
};
use docflow::cli::{Cli, Commands};
use docflow::{config, init_config, init_telemetry};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<i32> {
    init_telemetry(&config()?.observability)?;
    let config = init_config()?;

    match cli.command {
        None => {
            show_how_to_get_started();
            Ok(0)
        }
        Some(Commands::Actions { status }) => {
            ActionsCommand::new(status).execute()?;
            Ok(0)
        }
        Some(Commands::Validate {
            status,
            action,
            json,
        }) => {
            let result = ValidateCommand::new(status, action, json).execute()?;
            Ok(if result.valid { 0 } else { 1 })
        }
        Some(Commands::Transition {
            document,
            from_status,
            action,
            user,
            comment,
            dry_run,
        }) => {
            let engine = config.build_engine().await?;
            let outcome = TransitionCommand {
                document,
                from_status,
                action,
                user,
                comment,
                dry_run,
            }
            .execute(&engine)
            .await;
            engine.close().await;
            outcome?;
            Ok(0)
        }
        Some(Commands::History { document, json }) => {
            let engine = config.build_engine().await?;
            let outcome = HistoryCommand::new(document, json).execute(&engine).await;
            engine.close().await;
            outcome?;
            Ok(0)
        }
        Some(Commands::Table) => {
            TableCommand.execute()?;
            Ok(0)
        }
    }
}
