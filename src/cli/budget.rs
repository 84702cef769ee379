//! Budget CLI commands
//!
//! Period summaries over the user's categories and transactions.

use clap::Subcommand;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use super::parse_date;
use crate::config::settings::Settings;
use crate::display::format_budget_summary;
use crate::error::{FinbudError, FinbudResult};
use crate::models::ReportingPeriod;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show the budget summary for a period
    Summary {
        /// Reporting period: week, month or semester
        #[arg(short, long)]
        period: Option<String>,
        /// Evaluate as if today were this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the per-category breakdown to a CSV file
    Export {
        /// Output file path
        output: PathBuf,
        #[arg(short, long)]
        period: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },
}

fn resolve_period(settings: &Settings, input: Option<&str>) -> FinbudResult<ReportingPeriod> {
    match input {
        Some(s) => ReportingPeriod::parse(s).map_err(|e| FinbudError::Validation(e.to_string())),
        None => Ok(settings.default_period),
    }
}

pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FinbudResult<()> {
    let service = BudgetService::new(storage, settings.active_user);

    match cmd {
        BudgetCommands::Summary { period, date, json } => {
            let period = resolve_period(settings, period.as_deref())?;
            let today = parse_date(date.as_deref())?;
            let summary = service.summary(period, today)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", format_budget_summary(&summary, &settings.currency_symbol));
            }
        }

        BudgetCommands::Export {
            output,
            period,
            date,
        } => {
            let period = resolve_period(settings, period.as_deref())?;
            let today = parse_date(date.as_deref())?;
            let summary = service.summary(period, today)?;

            let file = File::create(&output).map_err(|e| {
                FinbudError::Export(format!("Failed to create file {}: {}", output.display(), e))
            })?;
            summary.export_csv(BufWriter::new(file))?;
            println!(
                "Budget breakdown ({} categories) exported to: {}",
                summary.categories.len(),
                output.display()
            );
        }
    }

    Ok(())
}
