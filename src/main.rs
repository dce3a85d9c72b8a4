//! Main entry point for the gridiron-elo rating engine
//!
//! Ingests a season of game results into the graph store, settles Elo
//! ratings with a full replay, prints the standings and optionally answers
//! a favorite query for an upcoming fixture.

use anyhow::Result;
use clap::Parser;
use gridiron_elo::config::AppConfig;
use gridiron_elo::graph::{GraphStore, InMemoryGraphStore};
use gridiron_elo::ingest;
use gridiron_elo::rating::{EloModel, ExtendedEloConfig, PredictionService, RatingProcessor};
use gridiron_elo::utils::rating_difference;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Gridiron Elo - team rating engine over head-to-head results
#[derive(Parser)]
#[command(
    name = "gridiron-elo",
    version,
    about = "Elo rating engine over a graph of teams and game results",
    long_about = "Gridiron Elo ingests head-to-head game results (from a CSV results \
                 table or a generated round-robin schedule), replays them through an \
                 Elo rating model backed by a graph store, and reports settled \
                 standings and win-probability predictions."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Results CSV override
    #[arg(short, long, value_name = "FILE", help = "Override results CSV path")]
    results: Option<PathBuf>,

    /// Synthetic schedule size override
    #[arg(
        long,
        value_name = "N",
        help = "Override synthetic schedule team count"
    )]
    synthetic_teams: Option<usize>,

    /// K-factor override
    #[arg(short, long, value_name = "K", help = "Override Elo k-factor")]
    k_factor: Option<f64>,

    /// Baseline rating override
    #[arg(long, value_name = "RATING", help = "Override baseline rating")]
    baseline: Option<f64>,

    /// Favorite query to answer after the replay
    #[arg(
        long,
        num_args = 2,
        value_names = ["HOME", "AWAY"],
        help = "Predict the favorite for a home/away pair after the replay"
    )]
    predict: Option<Vec<String>>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without running")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(results) = &args.results {
        config.ingest.results_path = Some(results.clone());
    }

    if let Some(teams) = args.synthetic_teams {
        config.ingest.synthetic_teams = teams;
    }

    if let Some(k) = args.k_factor {
        config.rating.k_factor = k;
    }

    if let Some(baseline) = args.baseline {
        config.rating.baseline_rating = baseline;
    }

    gridiron_elo::config::validate_config(&config)?;
    Ok(config)
}

/// Display startup information
fn display_startup_banner(config: &AppConfig) {
    info!("Gridiron Elo rating engine");
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!("   K-factor: {}", config.rating.k_factor);
    info!("   Baseline rating: {}", config.rating.baseline_rating);
    match &config.ingest.results_path {
        Some(path) => info!("   Results: {}", path.display()),
        None => info!(
            "   Results: synthetic round robin of {} teams",
            config.ingest.synthetic_teams
        ),
    }
}

/// Print the settled standings, best rating first
fn print_standings(store: &dyn GraphStore) -> Result<()> {
    let mut teams = store.all_teams()?;
    teams.sort_by(|a, b| {
        b.rating
            .rating
            .partial_cmp(&a.rating.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let leader = teams
        .first()
        .map(|entry| entry.rating.rating)
        .unwrap_or_default();

    println!("Standings (rating, behind leader):");
    for (position, entry) in teams.iter().enumerate() {
        println!(
            "{:>4}. {:<24} {:>8.1} {:>8.1}",
            position + 1,
            entry.name,
            entry.rating.rating,
            rating_difference(leader, entry.rating.rating)
        );
    }

    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);
    debug!(
        config = %serde_json::to_string(&config).unwrap_or_default(),
        "resolved configuration"
    );

    if args.dry_run {
        info!("Configuration validation successful");
        info!("Dry run completed - exiting without running");
        return Ok(());
    }

    // Load the season's results
    let rows = match &config.ingest.results_path {
        Some(path) => ingest::read_results_csv(path)?,
        None => {
            let teams = ingest::placeholder_teams(config.ingest.synthetic_teams);
            ingest::synthetic_schedule(&teams, &mut rand::rng())
        }
    };

    // Mirror them into the graph store and settle ratings
    let store: Arc<dyn GraphStore> =
        Arc::new(InMemoryGraphStore::new(config.rating.baseline_rating));
    ingest::register_and_store(store.as_ref(), &rows)?;

    let model = EloModel::new(ExtendedEloConfig::from(&config.rating))?;
    let processor = RatingProcessor::new(store.clone(), model.clone());
    let summary = processor.run()?;

    info!(
        games = summary.games_processed,
        teams = store.team_count()?,
        "ratings settled"
    );

    print_standings(store.as_ref())?;

    if let Some(pair) = &args.predict {
        let service = PredictionService::new(store.clone(), model);
        let prediction = service.predict_favorite(&pair[0], &pair[1])?;
        println!("{}", prediction);
        println!("Win probability: {:.1}%", prediction.probability * 100.0);
    }

    Ok(())
}
