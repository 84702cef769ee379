//! Savings goal CLI commands

use clap::Subcommand;

use super::{announce_badges, parse_date};
use crate::config::settings::Settings;
use crate::display::{format_goal_details, format_goal_table};
use crate::error::FinbudResult;
use crate::models::{Money, NewGoal};
use crate::services::{GoalService, GoalView};
use crate::storage::Storage;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// List goals, newest first
    List,

    /// Create a savings goal
    Add {
        /// Goal name
        name: String,
        /// Target amount
        target: String,
        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },

    /// Show goal details
    Show {
        /// Goal name or ID
        goal: String,
    },

    /// Put money toward a goal
    Contribute {
        /// Goal name or ID
        goal: String,
        /// Amount to add
        amount: String,
    },

    /// Delete a goal
    Delete {
        /// Goal name or ID
        goal: String,
    },
}

pub fn handle_goal_command(
    storage: &Storage,
    settings: &Settings,
    cmd: GoalCommands,
) -> FinbudResult<()> {
    let service = GoalService::new(storage, settings.active_user);
    let currency = settings.currency_symbol.as_str();
    let today = parse_date(None)?;

    match cmd {
        GoalCommands::List => {
            print!("{}", format_goal_table(&service.views(today)?, currency));
        }

        GoalCommands::Add {
            name,
            target,
            deadline,
            icon,
        } => {
            let mut new = NewGoal::new(name, Money::parse(&target)?);
            if let Some(deadline) = deadline {
                new = new.with_deadline(parse_date(Some(deadline.as_str()))?);
            }
            if let Some(icon) = icon {
                new.icon = icon;
            }

            let goal = service.create(new)?;
            println!(
                "Created goal: {} (target {})",
                goal.name,
                goal.target_amount.format_with_symbol(currency)
            );
            println!("  ID: {}", goal.id.short());
            announce_badges(storage, settings)?;
        }

        GoalCommands::Show { goal } => {
            let goal = service.get(&goal)?;
            print!("{}", format_goal_details(&GoalView::new(goal, today), currency));
        }

        GoalCommands::Contribute { goal, amount } => {
            let goal = service.get(&goal)?;
            let outcome = service.contribute_input(goal.id, &amount)?;
            let view = GoalView::new(outcome.goal, today);

            println!(
                "Saved {} of {} for {} ({:.0}%)",
                view.goal.current_amount.format_with_symbol(currency),
                view.goal.target_amount.format_with_symbol(currency),
                view.goal.name,
                view.progress_percent
            );
            if outcome.completed_now {
                println!("🎉 Goal reached: {}!", view.goal.name);
                announce_badges(storage, settings)?;
            }
        }

        GoalCommands::Delete { goal } => {
            let goal = service.get(&goal)?;
            service.delete(goal.id)?;
            println!("Deleted goal: {}", goal.name);
        }
    }

    Ok(())
}
