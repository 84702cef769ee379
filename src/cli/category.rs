//! Category CLI commands

use clap::Subcommand;

use super::announce_badges;
use crate::config::settings::Settings;
use crate::display::{format_category_details, format_category_table};
use crate::error::FinbudResult;
use crate::models::{CategoryUpdate, Money, NewCategory};
use crate::services::BudgetService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Monthly budget (e.g., "300" or "300.00")
        budget: String,
        /// Icon tag
        #[arg(long)]
        icon: Option<String>,
        /// Color tag
        #[arg(long)]
        color: Option<String>,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New monthly budget
        #[arg(short, long)]
        budget: Option<String>,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
}

pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> FinbudResult<()> {
    let service = BudgetService::new(storage, settings.active_user);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_table(&service.list_categories()?, currency));
        }

        CategoryCommands::Add {
            name,
            budget,
            icon,
            color,
        } => {
            let budget = Money::parse(&budget)?;
            let category = service.add_category(
                NewCategory::new(name, budget)
                    .with_style(icon.unwrap_or_default(), color.unwrap_or_default()),
            )?;

            println!("Created category: {}", category.name);
            println!("  Budget: {} per month", category.budget_amount.format_with_symbol(currency));
            println!("  ID: {}", category.id.short());
            announce_badges(storage, settings)?;
        }

        CategoryCommands::Show { category } => {
            let category = service.get_category(&category)?;
            print!("{}", format_category_details(&category, currency));
        }

        CategoryCommands::Edit {
            category,
            name,
            budget,
            icon,
            color,
        } => {
            let category = service.get_category(&category)?;

            if name.is_none() && budget.is_none() && icon.is_none() && color.is_none() {
                println!("No changes specified. Use --name, --budget, --icon or --color.");
                return Ok(());
            }

            let budget_amount = budget.as_deref().map(Money::parse).transpose()?;
            let updated = service.update_category(
                category.id,
                &CategoryUpdate {
                    name,
                    budget_amount,
                    icon,
                    color,
                },
            )?;
            println!("Updated category: {}", updated.name);
        }
    }

    Ok(())
}
