//! Database migration management commands.

use clap::{Args, Subcommand};

use foodbridge_core::config::AppConfig;
use foodbridge_core::error::AppError;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    let pool = super::connect(config).await?;

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            let version = foodbridge_database::migration::run_migrations(pool.pool()).await?;
            output::print_success(&format!(
                "Schema at version {} ({} migrations).",
                version.latest, version.count
            ));
        }
    }

    pool.close().await;
    Ok(())
}
