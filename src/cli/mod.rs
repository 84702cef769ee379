//! CLI command handlers
//!
//! This module bridges the clap argument parsing with the service layer.
//! Every handler acts on behalf of the active user from [`Settings`].

pub mod audit;
pub mod budget;
pub mod category;
pub mod export;
pub mod goal;
pub mod learn;
pub mod profile;
pub mod rewards;
pub mod transaction;

pub use audit::handle_audit_command;
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, ExportCommands};
pub use goal::{handle_goal_command, GoalCommands};
pub use learn::{handle_learn_command, LearnCommands};
pub use profile::{handle_onboard_command, handle_profile_command, OnboardArgs, ProfileCommands};
pub use rewards::{handle_badge_command, handle_shop_command, BadgeCommands, ShopCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::{Local, NaiveDate};

use crate::config::settings::Settings;
use crate::error::{FinbudError, FinbudResult};
use crate::services::BadgeService;
use crate::storage::Storage;

/// Parse a `YYYY-MM-DD` argument, defaulting to today
pub(crate) fn parse_date(input: Option<&str>) -> FinbudResult<NaiveDate> {
    match input {
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            FinbudError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))
        }),
        None => Ok(Local::now().date_naive()),
    }
}

/// Evaluate badge milestones and print any newly earned
pub(crate) fn announce_badges(storage: &Storage, settings: &Settings) -> FinbudResult<()> {
    let service = BadgeService::new(storage, settings.active_user);
    let earned = service.check_milestones()?;
    if earned.is_empty() {
        return Ok(());
    }

    let catalog = storage.badges.catalog()?;
    for badge in earned {
        let name = catalog
            .iter()
            .find(|b| b.id == badge.badge_id)
            .map(|b| b.name.as_str())
            .unwrap_or(badge.badge_id.as_str());
        println!("🏅 Badge earned: {}", name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(Some("2024-02-29")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date(Some("29/02/2024")).unwrap_err().is_validation());
        assert!(parse_date(None).is_ok());
    }
}
