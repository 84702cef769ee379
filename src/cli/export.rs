//! CLI commands for data export

use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::config::settings::Settings;
use crate::error::{FinbudError, FinbudResult};
use crate::export::{export_transactions_csv, export_user_json, UserExport};
use crate::models::shop::CSV_EXPORT_ITEM;
use crate::models::ShopItem;
use crate::services::ShopService;
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export transactions to CSV (requires the CSV export shop item)
    Transactions {
        /// Output file path
        output: PathBuf,
    },

    /// Export all of your data to JSON
    All {
        /// Output file path
        output: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show what an export would contain without writing files
    Info,
}

fn create_file(output: &Path) -> FinbudResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        FinbudError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> FinbudResult<()> {
    let user = settings.active_user;

    match cmd {
        ExportCommands::Transactions { output } => {
            if !ShopService::new(storage, user).owns(CSV_EXPORT_ITEM)? {
                let price = ShopItem::find(CSV_EXPORT_ITEM).map_or(0, |i| i.price);
                return Err(FinbudError::Export(format!(
                    "CSV export is locked. Buy it with 'finbud shop buy {}' ({} points).",
                    CSV_EXPORT_ITEM, price
                )));
            }

            let rows = export_transactions_csv(storage, user, create_file(&output)?)?;
            println!("Exported {} transactions to: {}", rows, output.display());
        }

        ExportCommands::All { output, pretty } => {
            let mut writer = create_file(&output)?;
            export_user_json(storage, user, &mut writer, pretty)?;
            println!("Full data export written to: {}", output.display());
        }

        ExportCommands::Info => {
            let export = UserExport::collect(storage, user)?;
            let meta = &export.metadata;

            println!("Export Information");
            println!("==================");
            println!("Schema version: {}", export.schema_version);
            println!("Categories:     {}", meta.category_count);
            println!("Transactions:   {}", meta.transaction_count);
            println!("Goals:          {}", meta.goal_count);
            println!("Lessons done:   {}", meta.completed_lessons);
            println!("Badges:         {}", meta.badge_count);
            if let (Some(first), Some(last)) =
                (&meta.earliest_transaction, &meta.latest_transaction)
            {
                println!("Date range:     {} to {}", first, last);
            }
        }
    }

    Ok(())
}
