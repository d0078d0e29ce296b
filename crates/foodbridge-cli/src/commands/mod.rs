//! CLI command definitions and dispatch.

pub mod donation;
pub mod migrate;
pub mod token;
pub mod user;

use clap::{Parser, Subcommand};

use foodbridge_core::config::{AppConfig, StoreBackend};
use foodbridge_core::error::AppError;
use foodbridge_database::{DatabasePool, Stores};

use crate::output::OutputFormat;

/// FoodBridge: donation pickup and delivery coordination
#[derive(Debug, Parser)]
#[command(name = "foodbridge", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (without extension)
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Development bearer tokens
    Token(token::TokenArgs),
    /// Donation inspection
    Donations(donation::DonationArgs),
    /// User directory seeding
    Users(user::UserArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_file(&self.config)?;
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Token(args) => token::execute(args, &config, self.format),
            Commands::Donations(args) => donation::execute(args, &config, self.format).await,
            Commands::Users(args) => user::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: connect to PostgreSQL. Database commands have nothing to act on
/// with the in-memory backend.
pub async fn connect(config: &AppConfig) -> Result<DatabasePool, AppError> {
    if config.database.backend == StoreBackend::Memory {
        return Err(AppError::configuration(
            "database.backend is \"memory\"; this command needs PostgreSQL",
        ));
    }
    DatabasePool::connect(&config.database).await
}

/// Helper: PostgreSQL-backed stores.
pub async fn connect_stores(config: &AppConfig) -> Result<Stores, AppError> {
    let pool = connect(config).await?;
    Ok(Stores::postgres(pool.pool().clone()))
}
