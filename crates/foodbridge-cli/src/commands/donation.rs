//! Donation inspection commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use foodbridge_core::config::AppConfig;
use foodbridge_core::error::AppError;
use foodbridge_core::types::pagination::PageRequest;
use foodbridge_database::DonationStore;
use foodbridge_entity::donation::{Donation, DonationFilter, DonationStatus};

use crate::output::{self, OutputFormat};

/// Arguments for donation commands
#[derive(Debug, Args)]
pub struct DonationArgs {
    /// Donation subcommand
    #[command(subcommand)]
    pub command: DonationCommand,
}

/// Donation subcommands
#[derive(Debug, Subcommand)]
pub enum DonationCommand {
    /// List donations, newest first
    List {
        /// Only donations in this status
        #[arg(short, long)]
        status: Option<DonationStatus>,
        /// Page number
        #[arg(long, default_value_t = 1)]
        page: u64,
        /// Items per page
        #[arg(long, default_value_t = 25)]
        per_page: u64,
    },
}

/// Donation display row for table output
#[derive(Debug, Serialize, Tabled)]
struct DonationRow {
    id: String,
    title: String,
    status: String,
    quantity: String,
    ngo: String,
    expires: String,
}

impl From<&Donation> for DonationRow {
    fn from(d: &Donation) -> Self {
        Self {
            id: d.id.to_string(),
            title: d.title.clone(),
            status: d.status.to_string(),
            quantity: format!("{} {}", d.quantity_total, d.quantity_unit),
            ngo: d.ngo_id.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string()),
            expires: d.expiry_time.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute donation commands
pub async fn execute(
    args: &DonationArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let stores = super::connect_stores(config).await?;

    match &args.command {
        DonationCommand::List {
            status,
            page,
            per_page,
        } => {
            let filter = DonationFilter {
                status: *status,
                ..Default::default()
            };
            let result = stores
                .donations
                .list(&filter, &PageRequest::new(*page, *per_page))
                .await?;

            let rows: Vec<DonationRow> = result.items.iter().map(DonationRow::from).collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                println!(
                    "page {}/{} ({} total)",
                    result.page, result.total_pages, result.total_items
                );
            }
        }
    }

    Ok(())
}
