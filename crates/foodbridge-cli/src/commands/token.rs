//! Development token minting.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use foodbridge_auth::JwtEncoder;
use foodbridge_core::config::AppConfig;
use foodbridge_core::error::AppError;
use foodbridge_core::types::id::UserId;
use foodbridge_entity::user::UserRole;

use crate::output::{self, OutputFormat};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue a bearer token signed with the configured secret
    Issue {
        /// User the token is issued for
        #[arg(long)]
        user_id: UserId,
        /// Role carried in the token
        #[arg(long)]
        role: UserRole,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct TokenRow {
    user_id: String,
    role: String,
    expires_at: String,
    token: String,
}

/// Execute token commands
pub fn execute(args: &TokenArgs, config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Issue { user_id, role } => {
            let encoder = JwtEncoder::new(&config.auth);
            let (token, expires_at) = encoder.generate_access_token(*user_id, *role)?;

            match format {
                OutputFormat::Json => output::print_item(
                    &TokenRow {
                        user_id: user_id.to_string(),
                        role: role.to_string(),
                        expires_at: expires_at.to_rfc3339(),
                        token,
                    },
                    format,
                ),
                // The token is too wide for a table.
                OutputFormat::Table => {
                    output::print_kv("user", &user_id.to_string());
                    output::print_kv("role", role.as_str());
                    output::print_kv("expires", &expires_at.to_rfc3339());
                    println!("\n{token}");
                }
            }
        }
    }
    Ok(())
}
