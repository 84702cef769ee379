//! Profile and onboarding CLI commands

use clap::{Args, Subcommand};

use super::announce_badges;
use crate::config::settings::Settings;
use crate::display::format_profile;
use crate::error::{FinbudError, FinbudResult};
use crate::models::{Avatar, Money, ProfileUpdate};
use crate::services::{OnboardingInput, OnboardingPlan, OnboardingService, ProfileService};
use crate::storage::Storage;

/// Profile subcommands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show profile, level and points
    Show,

    /// Edit profile fields
    Edit {
        #[arg(short, long)]
        name: Option<String>,
        /// Avatar (fox, owl, bear, ...)
        #[arg(short, long)]
        avatar: Option<String>,
        /// Monthly income
        #[arg(short, long)]
        income: Option<String>,
    },
}

/// Arguments for `finbud onboard`
#[derive(Args)]
pub struct OnboardArgs {
    /// Monthly income used to propose the starter budget
    pub income: String,

    #[arg(short, long)]
    pub name: Option<String>,

    #[arg(short, long, default_value = "fox")]
    pub avatar: String,

    /// Override a proposed amount, e.g. --set "Transport=150"
    #[arg(long = "set", value_name = "CATEGORY=AMOUNT")]
    pub overrides: Vec<String>,

    /// Print the proposed plan without saving anything
    #[arg(long)]
    pub dry_run: bool,
}

fn parse_avatar(input: &str) -> FinbudResult<Avatar> {
    Avatar::parse(input).ok_or_else(|| {
        let names: Vec<_> = Avatar::all().iter().map(|a| a.name()).collect();
        FinbudError::Validation(format!(
            "Unknown avatar '{}'. Choose one of: {}",
            input,
            names.join(", ")
        ))
    })
}

pub fn handle_profile_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ProfileCommands,
) -> FinbudResult<()> {
    let service = ProfileService::new(storage, settings.active_user);

    match cmd {
        ProfileCommands::Show => {
            let profile = service.get()?;
            print!(
                "{}",
                format_profile(&profile, &profile.level_progress(), &settings.currency_symbol)
            );
        }

        ProfileCommands::Edit {
            name,
            avatar,
            income,
        } => {
            let update = ProfileUpdate {
                display_name: name,
                avatar: avatar.as_deref().map(parse_avatar).transpose()?,
                monthly_income: income.as_deref().map(Money::parse).transpose()?,
                ..ProfileUpdate::default()
            };
            if update == ProfileUpdate::default() {
                println!("No changes specified. Use --name, --avatar or --income.");
                return Ok(());
            }

            let profile = service.update(&update)?;
            println!("Updated profile: {} {}", profile.avatar.emoji(), profile.display_name);
        }
    }

    Ok(())
}

pub fn handle_onboard_command(
    storage: &Storage,
    settings: &Settings,
    args: OnboardArgs,
) -> FinbudResult<()> {
    let currency = settings.currency_symbol.as_str();
    let income = Money::parse(&args.income)?;
    if !income.is_positive() {
        return Err(FinbudError::Validation(
            "Monthly income must be greater than zero".into(),
        ));
    }
    let avatar = parse_avatar(&args.avatar)?;

    let mut plan = OnboardingPlan::from_income(income);
    for entry in &args.overrides {
        let (name, amount) = entry.split_once('=').ok_or_else(|| {
            FinbudError::Validation(format!("Expected CATEGORY=AMOUNT, got '{}'", entry))
        })?;
        plan.set_amount(name, Money::parse(amount)?)?;
    }

    println!("Proposed budget for {} per month:", income.format_with_symbol(currency));
    for planned in &plan.categories {
        println!(
            "  {:<16} {:>12}",
            planned.name,
            planned.amount.format_with_symbol(currency)
        );
    }
    println!("  {:<16} {:>12}", "Total", plan.total().format_with_symbol(currency));
    if plan.exceeds_income() {
        println!("  ⚠ The plan allocates more than your income.");
    }

    if args.dry_run {
        return Ok(());
    }

    let result = OnboardingService::new(storage, settings.active_user).complete(OnboardingInput {
        display_name: args.name,
        avatar,
        plan,
    })?;

    println!();
    println!(
        "Welcome, {} {}! Created {} categories, updated {}.",
        result.profile.avatar.emoji(),
        result.profile.display_name,
        result.created.len(),
        result.updated.len()
    );
    announce_badges(storage, settings)?;

    Ok(())
}
