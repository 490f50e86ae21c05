use clap::{Parser, Subcommand};
use sqlx::SqlitePool;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod db;
mod models;
mod nutrition;
mod seed;
mod transfer;

use commands::{
    ConfigCommand, ExportCommand, FoodCommand, ImportCommand, LogCommand, SetCommand,
    SetupCommand, StatusCommand,
};
use config::Config;
use db::{
    init_db, FoodRepository, MealLogRepository, MySetRepository, SettingsRepository, StoreError,
};

#[derive(Parser)]
#[command(name = "pfctrack")]
#[command(version)]
#[command(about = "A local-first protein/fat/carb tracking application", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or update the user profile and derive daily targets
    Setup(SetupCommand),

    /// Show targets and a day's consumed totals
    Status(StatusCommand),

    /// Log and review meals
    Log(LogCommand),

    /// Search or reseed the food catalog
    Food(FoodCommand),

    /// Manage reusable meal sets
    Set(SetCommand),

    /// Export all user data to a snapshot file
    Export(ExportCommand),

    /// Restore user data from a snapshot file
    Import(ImportCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pfctrack=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Setup(cmd)) => {
            let pool = open_store(&config).await?;
            let repo = SettingsRepository::new(pool);
            cmd.run(&repo).await?;
        }
        Some(Commands::Status(cmd)) => {
            let pool = open_store(&config).await?;
            let settings_repo = SettingsRepository::new(pool.clone());
            let meallog_repo = MealLogRepository::new(pool);
            cmd.run(&settings_repo, &meallog_repo).await?;
        }
        Some(Commands::Log(cmd)) => {
            let pool = open_store(&config).await?;
            let meallog_repo = MealLogRepository::new(pool.clone());
            let food_repo = FoodRepository::new(pool);
            cmd.run(&meallog_repo, &food_repo).await?;
        }
        Some(Commands::Food(cmd)) => {
            let pool = open_store(&config).await?;
            let repo = FoodRepository::new(pool.clone());
            cmd.run(&repo, &pool, &config).await?;
        }
        Some(Commands::Set(cmd)) => {
            let pool = open_store(&config).await?;
            let myset_repo = MySetRepository::new(pool.clone());
            let meallog_repo = MealLogRepository::new(pool.clone());
            let food_repo = FoodRepository::new(pool);
            cmd.run(&myset_repo, &meallog_repo, &food_repo).await?;
        }
        Some(Commands::Export(cmd)) => {
            let pool = open_store(&config).await?;
            cmd.run(&pool).await?;
        }
        Some(Commands::Import(cmd)) => {
            let pool = open_store(&config).await?;
            cmd.run(&pool).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

/// Opens the store and kicks off the background catalog seed. The seed task
/// handle is deliberately dropped: startup never waits for it and its
/// failures surface only in the log.
async fn open_store(config: &Config) -> Result<SqlitePool, StoreError> {
    let pool = init_db(Some(config.database_path.clone())).await?;
    seed::spawn_seed(pool.clone(), config.foods_url.clone());
    Ok(pool)
}
