use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use finbud::cli::{
    handle_audit_command, handle_badge_command, handle_budget_command, handle_category_command,
    handle_export_command, handle_goal_command, handle_learn_command, handle_onboard_command,
    handle_profile_command, handle_shop_command, handle_transaction_command,
};
use finbud::config::{paths::FinbudPaths, settings::Settings};
use finbud::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "finbud",
    author = "FinBud Team",
    version,
    about = "Budgets, savings goals and money lessons that pay you back",
    long_about = "FinBud tracks a monthly budget across weekly, monthly and semester views, \
                  follows savings goals, and rewards finishing financial-literacy lessons \
                  with points you can spend in the token shop."
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, lesson catalog, badges and your profile
    Init {
        /// Display name for your profile
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Show current configuration and paths
    Config,

    /// Budget summaries
    #[command(subcommand)]
    Budget(finbud::cli::BudgetCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(finbud::cli::CategoryCommands),

    /// Record and list transactions
    #[command(subcommand, alias = "txn")]
    Transaction(finbud::cli::TransactionCommands),

    /// Financial-literacy lessons
    #[command(subcommand)]
    Learn(finbud::cli::LearnCommands),

    /// Savings goals
    #[command(subcommand)]
    Goal(finbud::cli::GoalCommands),

    /// Your profile, level and points
    #[command(subcommand)]
    Profile(finbud::cli::ProfileCommands),

    /// Set up your profile and a starter budget from your income
    Onboard(finbud::cli::OnboardArgs),

    /// Badges
    #[command(subcommand)]
    Badge(finbud::cli::BadgeCommands),

    /// Spend points on unlocks
    #[command(subcommand)]
    Shop(finbud::cli::ShopCommands),

    /// Export your data
    #[command(subcommand)]
    Export(finbud::cli::ExportCommands),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
        /// Only one entity type (category, transaction, goal, profile, ...)
        #[arg(short, long)]
        entity: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose; default keeps stderr quiet
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let paths = FinbudPaths::new()?;

    let Some(command) = cli.command else {
        println!("FinBud - budgets, goals and lessons from the command line");
        println!();
        println!("Run 'finbud --help' for usage information.");
        println!("Run 'finbud init' to get started.");
        return Ok(());
    };

    match command {
        Commands::Init { name } => {
            println!("Initializing FinBud at: {}", paths.base_dir().display());
            let settings = Settings::load_or_create(&paths)?;
            let storage = Storage::open(paths.clone())?;
            let report =
                initialize_storage(&storage, settings.active_user, name.as_deref().unwrap_or(""))?;

            if report.is_noop() {
                println!("Already initialized. Nothing to do.");
            } else {
                println!("Initialization complete!");
                println!("  Lessons added: {}", report.lessons_seeded);
                println!("  Badges added:  {}", report.badges_seeded);
                if report.profile_created {
                    println!("  Profile created");
                }
                println!();
                println!("Run 'finbud onboard <monthly income>' to set up your budget.");
            }
        }

        Commands::Config => {
            println!("FinBud Configuration");
            println!("====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());

            if paths.is_initialized() {
                let settings = Settings::load_or_create(&paths)?;
                println!();
                println!("Settings:");
                println!("  Active user:    {}", settings.active_user);
                println!("  Default period: {}", settings.default_period);
                println!("  Currency:       {}", settings.currency_symbol);
                println!("  Date format:    {}", settings.date_format);
                println!(
                    "  Lesson points:  {} + {} per lesson position",
                    settings.lesson_points.base, settings.lesson_points.increment
                );
            } else {
                println!();
                println!("Not initialized. Run 'finbud init'.");
            }
        }

        Commands::Budget(cmd) => {
            let (storage, settings) = open_initialized(paths)?;
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Commands::Category(cmd) => {
            let (storage, settings) = open_initialized(paths)?;
            handle_category_command(&storage, &settings, cmd)?;
        }
        Commands::Transaction(cmd) => {
            let (storage, settings) = open_initialized(paths)?;
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Commands::Learn(cmd) => {
            let (storage, settings) = open_initialized(paths)?;
            handle_learn_command(&storage, &settings, cmd)?;
        }
        Commands::Goal(cmd) => {
            let (storage, settings) = open_initialized(paths)?;
            handle_goal_command(&storage, &settings, cmd)?;
        }
        Commands::Profile(cmd) => {
            let (storage, settings) = open_initialized(paths)?;
            handle_profile_command(&storage, &settings, cmd)?;
        }
        Commands::Onboard(args) => {
            let (storage, settings) = open_initialized(paths)?;
            handle_onboard_command(&storage, &settings, args)?;
        }
        Commands::Badge(cmd) => {
            let (storage, settings) = open_initialized(paths)?;
            handle_badge_command(&storage, &settings, cmd)?;
        }
        Commands::Shop(cmd) => {
            let (storage, settings) = open_initialized(paths)?;
            handle_shop_command(&storage, &settings, cmd)?;
        }
        Commands::Export(cmd) => {
            let (storage, settings) = open_initialized(paths)?;
            handle_export_command(&storage, &settings, cmd)?;
        }
        Commands::Audit { count, entity } => {
            let (storage, _settings) = open_initialized(paths)?;
            handle_audit_command(&storage, count, entity)?;
        }
    }

    Ok(())
}

/// Load settings and every table, refusing to create them implicitly
fn open_initialized(paths: FinbudPaths) -> Result<(Storage, Settings)> {
    if !paths.is_initialized() {
        bail!("FinBud is not initialized. Run 'finbud init' first.");
    }
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::open(paths)?;
    Ok((storage, settings))
}
