use clap::Parser;
use lockbox::api::{start_api_server, AppState};
use lockbox::cli::{Cli, Commands};
use lockbox::config::{AppConfig, LoggingConfig};
use lockbox::domain::Sport;
use lockbox::error::{LockboxError, Result};
use std::str::FromStr;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Picks { sport }) => {
            init_logging_simple();
            let sport = Sport::from_str(sport)?;
            let state = load_state(&cli.config_dir)?;
            let picks = state.picks.picks(sport).await?;
            println!("{}", serde_json::to_string_pretty(&picks)?);
        }
        Some(Commands::Featured) => {
            init_logging_simple();
            let state = load_state(&cli.config_dir)?;
            let featured = state
                .picks
                .featured(state.config.odds.default_sport)
                .await?;
            println!("{}", serde_json::to_string_pretty(&featured)?);
        }
        Some(Commands::Record) => {
            init_logging_simple();
            let state = load_state(&cli.config_dir)?;
            let record = state.results.record().await?;
            println!(
                "{}-{} ({:.1}%)",
                record.wins,
                record.losses,
                record.win_rate() * 100.0
            );
        }
        Some(Commands::RefreshResults) => {
            init_logging_simple();
            let state = load_state(&cli.config_dir)?;
            let summary = state
                .results
                .refresh_results(state.config.odds.default_sport)
                .await?;
            println!(
                "resolved {} picks, record now {}-{}",
                summary.resolved, summary.record.wins, summary.record.losses
            );
        }
        Some(Commands::Serve { port }) => {
            run_server(&cli.config_dir, *port).await?;
        }
        None => {
            run_server(&cli.config_dir, None).await?;
        }
    }

    Ok(())
}

async fn run_server(config_dir: &str, port_override: Option<u16>) -> Result<()> {
    let mut config = AppConfig::load_from(config_dir)?;
    if let Some(port) = port_override {
        config.server.port = port;
    }
    init_logging(&config.logging);

    if let Err(problems) = config.validate() {
        for problem in &problems {
            error!("configuration: {}", problem);
        }
        return Err(LockboxError::Validation(problems.join("; ")));
    }

    info!(
        "starting lockbox: sport={} variant={:?} filter={:?}",
        config.odds.default_sport, config.scoring.variant, config.odds.filter
    );

    let port = config.server.port;
    let state = AppState::from_config(config)?;
    start_api_server(state, port).await
}

fn load_state(config_dir: &str) -> Result<AppState> {
    let config = AppConfig::load_from(config_dir)?;
    AppState::from_config(config)
}

// RUST_LOG wins outright; the configured level only shapes the fallback.
fn init_logging(settings: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.filter_directives()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    if settings.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn init_logging_simple() {
    // Minimal logging for CLI commands
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .try_init();
}
