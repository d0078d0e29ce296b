//! User directory seeding commands.
//!
//! Accounts are owned by the external identity system; these commands only
//! mirror them into the local directory for development.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use foodbridge_core::config::AppConfig;
use foodbridge_core::error::AppError;
use foodbridge_core::types::id::UserId;
use foodbridge_database::UserDirectory;
use foodbridge_entity::user::{User, UserRole};

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Add or replace a directory entry
    Add {
        /// Email address
        #[arg(long)]
        email: String,
        /// Full name
        #[arg(long)]
        name: String,
        /// Role
        #[arg(long)]
        role: UserRole,
        /// Reuse an existing ID instead of generating one
        #[arg(long)]
        id: Option<UserId>,
        /// Store the user as inactive
        #[arg(long)]
        inactive: bool,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: String,
    email: String,
    name: String,
    role: String,
    active: bool,
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let stores = super::connect_stores(config).await?;

    match &args.command {
        UserCommand::Add {
            email,
            name,
            role,
            id,
            inactive,
        } => {
            let user = stores
                .users
                .upsert(&User {
                    id: id.unwrap_or_default(),
                    email: email.clone(),
                    full_name: name.clone(),
                    role: *role,
                    is_active: !inactive,
                    created_at: chrono::Utc::now(),
                })
                .await?;

            output::print_item(
                &UserRow {
                    id: user.id.to_string(),
                    email: user.email.clone(),
                    name: user.full_name.clone(),
                    role: user.role.to_string(),
                    active: user.is_active,
                },
                format,
            );
            output::print_success(&format!("User {} saved", user.id));
        }
    }

    Ok(())
}
