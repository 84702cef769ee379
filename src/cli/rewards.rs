//! Badge and token shop CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_badges, format_shop};
use crate::error::{FinbudError, FinbudResult};
use crate::models::ShopCategory;
use crate::services::{BadgeService, ShopService};
use crate::storage::Storage;

/// Badge subcommands
#[derive(Subcommand)]
pub enum BadgeCommands {
    /// List every badge and whether it has been earned
    List,

    /// Re-check milestones and award anything reached
    Check,
}

/// Shop subcommands
#[derive(Subcommand)]
pub enum ShopCommands {
    /// List items and your balance
    List {
        /// Only one shelf: modules, features, categories or themes
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Buy an item with points
    Buy {
        /// Item id, e.g. feature_export
        item: String,
    },
}

pub fn handle_badge_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BadgeCommands,
) -> FinbudResult<()> {
    let service = BadgeService::new(storage, settings.active_user);

    match cmd {
        BadgeCommands::List => {
            print!("{}", format_badges(&service.with_status()?));
        }

        BadgeCommands::Check => {
            let earned = service.check_milestones()?;
            if earned.is_empty() {
                println!("No new badges.");
            }
            for earned in earned {
                let name = storage
                    .badges
                    .get_badge(&earned.badge_id)?
                    .map(|b| b.name)
                    .unwrap_or(earned.badge_id);
                println!("🏅 Badge earned: {}", name);
            }
        }
    }

    Ok(())
}

pub fn handle_shop_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ShopCommands,
) -> FinbudResult<()> {
    let service = ShopService::new(storage, settings.active_user);

    match cmd {
        ShopCommands::List { category } => {
            let category = category
                .as_deref()
                .map(|c| {
                    ShopCategory::parse(c).ok_or_else(|| {
                        FinbudError::Validation(format!("Unknown shop category '{}'", c))
                    })
                })
                .transpose()?;
            let listings = service.list(category)?;
            print!("{}", format_shop(&listings, service.balance()?));
        }

        ShopCommands::Buy { item } => {
            let purchase = service.purchase(&item)?;
            println!(
                "Purchased {} for {} points. Balance: {}",
                purchase.item.name, purchase.item.price, purchase.profile.total_points
            );
        }
    }

    Ok(())
}
