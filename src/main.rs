use analytics::TrialStatistics;
use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use configuration::{Settings, StoreBackend};
use std::net::SocketAddr;
use std::path::PathBuf;

/// The main entry point for the trial tracker.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = configuration::load_settings(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(backend) = cli.backend {
        settings.database.backend = backend;
    }
    settings.validate()?;
    let _log_guard = configuration::init_tracing(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args, settings).await,
        Commands::Migrate => handle_migrate(&settings).await,
        Commands::Stats => handle_stats(&settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Tracks trials from creation to acquisition or withdrawal.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides `database.backend` from the configuration.
    #[arg(long, global = true, value_enum)]
    backend: Option<StoreBackend>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Apply the database migrations and exit.
    Migrate,
    /// Print this month's acquisition statistics.
    Stats,
}

#[derive(Parser)]
struct ServeArgs {
    /// Listen address, overriding `server.host` and `server.port` (e.g. 127.0.0.1:9000).
    #[arg(long)]
    addr: Option<SocketAddr>,
}

// ==============================================================================
// Command Handlers
// ==============================================================================

async fn handle_serve(args: ServeArgs, mut settings: Settings) -> anyhow::Result<()> {
    if let Some(addr) = args.addr {
        settings.server.host = addr.ip().to_string();
        settings.server.port = addr.port();
    }
    web_server::run_server(settings).await
}

async fn handle_migrate(settings: &Settings) -> anyhow::Result<()> {
    if settings.database.backend == StoreBackend::Memory {
        anyhow::bail!("the memory backend has no schema to migrate");
    }
    let pool = database::connect(&settings.database).await?;
    database::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied.");
    Ok(())
}

async fn handle_stats(settings: &Settings) -> anyhow::Result<()> {
    let state = web_server::build_state(settings).await?;
    let stats = state.service.statistics().await?;
    println!("{}", render_statistics(&stats));
    Ok(())
}

fn render_statistics(stats: &TrialStatistics) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Trials this month".to_string(), stats.total.to_string()]);
    table.add_row(vec!["Acquired".to_string(), stats.acquired_count.to_string()]);
    table.add_row(vec!["Withdrawn".to_string(), stats.withdrawn_count.to_string()]);
    table.add_row(vec![
        "Acquired %".to_string(),
        format!("{:.2}", stats.percent_acquired),
    ]);
    table.add_row(vec![
        "Withdrawn %".to_string(),
        format!("{:.2}", stats.percent_withdrawn),
    ]);
    table.add_row(vec![
        "Acquisition rate".to_string(),
        format!("{:.2}", stats.acquisition_rate),
    ]);
    table
}
