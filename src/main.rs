//! Command line entry point for the Elo history tracker
//!
//! Loads a game file, folds it into per-team rating histories and prints
//! standings, the rating distribution and optionally one team's timeline.

use anyhow::{anyhow, Result};
use clap::Parser;
use elo_history::config::{validate_config, AppConfig};
use elo_history::loader::{load_games, sort_chronologically};
use elo_history::metrics::MetricsCollector;
use elo_history::report::DEFAULT_HISTOGRAM_BINS;
use elo_history::utils::teams_from_games;
use elo_history::EloTracker;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Elo History - season-aware Elo ratings for team game results
#[derive(Parser)]
#[command(
    name = "elo-history",
    version,
    about = "Build season-aware Elo rating histories from game results",
    long_about = "Reads chronologically ordered game results (JSON array or JSON lines), \
                 applies the Elo update per game with one-third regression toward the \
                 baseline at each season boundary, and reports standings and ratings."
)]
struct Args {
    /// Game results file
    #[arg(
        short,
        long,
        value_name = "FILE",
        required_unless_present = "dry_run",
        help = "Path to game results (.json array, or .jsonl / .ndjson lines)"
    )]
    games: Option<PathBuf>,

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

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// K factor override
    #[arg(short, long, value_name = "K", help = "Override the K factor")]
    k_factor: Option<f64>,

    /// Initial rating override
    #[arg(long, value_name = "RATING", help = "Override the initial rating")]
    initial_rating: Option<f64>,

    /// Truncate rating deltas to whole points
    #[arg(long, help = "Use integer-truncated rating deltas")]
    truncate: bool,

    /// Skip season-opener entries
    #[arg(long, help = "Do not materialize season-opener history entries")]
    no_season_openers: bool,

    /// Sort games before ingesting
    #[arg(long, help = "Sort games by timestamp before ingesting")]
    sort: bool,

    /// Team whose rating timeline should be printed
    #[arg(short, long, value_name = "TEAM")]
    team: Option<String>,

    /// Number of standings rows
    #[arg(long, value_name = "N", default_value_t = 10)]
    top: usize,

    /// Print metrics in the Prometheus text format
    #[arg(long, help = "Print ingestion metrics after the report")]
    metrics: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without reading games")]
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
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file, environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(k) = args.k_factor {
        config.rating.k_factor = k;
    }

    if let Some(initial) = args.initial_rating {
        config.rating.initial_rating = initial;
    }

    if args.truncate {
        config.rating.arithmetic = elo_history::config::ArithmeticMode::Truncated;
    }

    if args.no_season_openers {
        config.rating.emit_season_openers = false;
    }

    validate_config(&config)?;
    Ok(config)
}

/// Display configuration summary
fn display_config(config: &AppConfig) {
    info!("{} {}", config.service.name, elo_history::VERSION);
    info!("   Initial rating: {}", config.rating.initial_rating);
    info!("   K factor: {}", config.rating.k_factor);
    info!("   Arithmetic: {}", config.rating.arithmetic);
    info!("   Season openers: {}", config.rating.emit_season_openers);
    info!("   Strict ordering: {}", config.rating.strict_ordering);
}

fn print_standings(tracker: &EloTracker, top: usize) {
    let mut latest: Vec<_> = tracker
        .teams()
        .filter_map(|team| tracker.latest(team).map(|entry| (team, entry)))
        .collect();
    latest.sort_by(|a, b| b.1.rating_after.total_cmp(&a.1.rating_after));

    println!("{:>4}  {:<12} {:>9} {:>9} {:>7}", "#", "Team", "Rating", "W-L", "Season");
    for (rank, (team, entry)) in latest.iter().take(top).enumerate() {
        println!(
            "{:>4}  {:<12} {:>9.1} {:>9} {:>7}",
            rank + 1,
            team,
            entry.rating_after,
            format!("{}-{}", entry.wins, entry.losses),
            entry.season
        );
    }

    if let Some(dist) = tracker.rating_distribution() {
        println!();
        println!(
            "Teams: {}  Mean: {:.2}  Std: {:.2}  Min: {:.1}  Max: {:.1}",
            dist.count, dist.mean, dist.std_dev, dist.min, dist.max
        );
        for bin in dist.histogram(DEFAULT_HISTOGRAM_BINS) {
            println!(
                "  [{:>7.1}, {:>7.1})  {}",
                bin.lower,
                bin.upper,
                "#".repeat(bin.count)
            );
        }
    }
}

fn print_timeline(tracker: &EloTracker, team: &str) -> Result<()> {
    let points = tracker
        .timeline(team)
        .ok_or_else(|| anyhow!("Unknown team: {}", team))?;

    println!();
    println!("Rating timeline for {}", team);
    for point in points {
        println!("  {}  {:.2}", point.timestamp.format("%Y-%m-%d %H:%M"), point.rating);
    }
    Ok(())
}

fn run(args: &Args, config: AppConfig) -> Result<()> {
    let games_path = args
        .games
        .as_ref()
        .ok_or_else(|| anyhow!("--games is required"))?;

    let mut games = load_games(games_path)?;
    if args.sort {
        sort_chronologically(&mut games);
    }

    let teams = teams_from_games(&games);
    let metrics = Arc::new(MetricsCollector::new()?);
    let mut tracker = EloTracker::new(teams, config.rating)?.with_metrics(metrics.clone());

    let summary = tracker.add_history(&games)?;
    info!(
        "Applied {} games ({} entries, {} season rollovers)",
        summary.games, summary.entries, summary.season_rollovers
    );

    print_standings(&tracker, args.top);

    if let Some(team) = &args.team {
        print_timeline(&tracker, team)?;
    }

    if args.metrics {
        println!();
        print!("{}", metrics.export()?);
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_config(&config);

    if args.dry_run {
        info!("Configuration validation successful");
        return Ok(());
    }

    if let Err(e) = run(&args, config) {
        error!("{}", e);
        std::process::exit(1);
    }

    Ok(())
}
