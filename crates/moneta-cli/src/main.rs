//! Moneta CLI - Personal finance companion
//!
//! Usage:
//!   moneta login                   Sign in and persist the session
//!   moneta dashboard               Current-month summary and activity
//!   moneta transactions list       Sorted/filtered transaction history
//!   moneta analytics --period week Spend projection and insight

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let ctx = commands::build_context(cli.api_url.clone())?;

    match cli.command {
        Commands::Login { username } => commands::cmd_login(&ctx, username).await,
        Commands::Register { username, email } => {
            commands::cmd_register(&ctx, username, email).await
        }
        Commands::Logout => commands::cmd_logout(&ctx),
        Commands::Dashboard => commands::cmd_dashboard(&ctx).await,
        Commands::Transactions { action } => match action {
            None => commands::cmd_transactions_list(&ctx, "expense", "date").await,
            Some(TransactionsAction::List { kind, sort }) => {
                commands::cmd_transactions_list(&ctx, &kind, &sort).await
            }
            Some(TransactionsAction::Add {
                kind,
                amount,
                category,
                name,
                date,
            }) => commands::cmd_transactions_add(&ctx, &kind, &amount, &category, name, date).await,
            Some(TransactionsAction::Update {
                id,
                kind,
                amount,
                category,
                name,
                date,
            }) => {
                commands::cmd_transactions_update(&ctx, id, &kind, &amount, &category, name, date)
                    .await
            }
            Some(TransactionsAction::Delete { id }) => {
                commands::cmd_transactions_delete(&ctx, id).await
            }
            Some(TransactionsAction::Export { output }) => {
                commands::cmd_transactions_export(&ctx, output.as_deref()).await
            }
        },
        Commands::Goals { action } => match action {
            None | Some(GoalsAction::List) => commands::cmd_goals_list(&ctx).await,
            Some(GoalsAction::Add {
                name,
                target,
                current,
                date,
            }) => commands::cmd_goals_add(&ctx, &name, &target, &current, date).await,
            Some(GoalsAction::Update {
                id,
                name,
                target,
                current,
                date,
            }) => commands::cmd_goals_update(&ctx, id, &name, &target, &current, date).await,
            Some(GoalsAction::Delete { id }) => commands::cmd_goals_delete(&ctx, id).await,
        },
        Commands::Analytics { period, svg, dark } => {
            commands::cmd_analytics(&ctx, &period, svg.as_deref(), dark).await
        }
        Commands::Suggest => commands::cmd_suggest(&ctx).await,
    }
}
