//! Transaction CLI commands

use clap::Subcommand;

use super::{announce_badges, parse_date};
use crate::config::settings::Settings;
use crate::display::format_transaction_table;
use crate::error::FinbudResult;
use crate::models::{Money, NewTransaction};
use crate::services::BudgetService;
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an expense, or income with --income
    Add {
        /// Amount (e.g., "12.50"), always positive
        amount: String,
        /// Record as income instead of an expense
        #[arg(long)]
        income: bool,
        /// Category name or ID (expenses only)
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        merchant: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List transactions, most recent first
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinbudResult<()> {
    let service = BudgetService::new(storage, settings.active_user);

    match cmd {
        TransactionCommands::Add {
            amount,
            income,
            category,
            merchant,
            description,
            date,
        } => {
            let amount = Money::parse(&amount)?;
            let date = parse_date(date.as_deref())?;

            let mut new = if income {
                NewTransaction::income(amount, date)
            } else {
                let category_id = match category {
                    Some(c) => Some(service.get_category(&c)?.id),
                    None => None,
                };
                NewTransaction::expense(amount, category_id, date)
            };
            if let Some(merchant) = merchant {
                new = new.with_merchant(merchant);
            }
            if let Some(description) = description {
                new = new.with_description(description);
            }

            let txn = service.add_transaction(new)?;
            println!(
                "Recorded {} of {} on {}",
                txn.kind,
                txn.amount.format_with_symbol(&settings.currency_symbol),
                txn.transaction_date.format(&settings.date_format)
            );
            announce_badges(storage, settings)?;
        }

        TransactionCommands::List { limit } => {
            let transactions = service.list_transactions(Some(limit))?;
            let categories = service.list_categories()?;
            print!(
                "{}",
                format_transaction_table(
                    &transactions,
                    &categories,
                    &settings.currency_symbol,
                    &settings.date_format
                )
            );
        }
    }

    Ok(())
}
