use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use doko_stats::calculate;
use doko_stats::config::AppConfig;
use doko_stats::entry::{self, GameEntry};
use doko_stats::report;
use doko_stats::storage::{GameStore, StorageConfig};
use doko_stats::TiePolicy;

#[derive(Parser)]
#[command(name = "doko-stats")]
#[command(about = "Record Doppelkopf games and evaluate statistics")]
#[command(version)]
struct Cli {
    /// Path to configuration file (optional)
    #[arg(long, default_value = "./doko-stats.toml")]
    config: PathBuf,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a game from command-line values
    Add {
        /// Player names (comma-separated, at least 4)
        #[arg(long)]
        players: String,

        /// Number of rounds played
        #[arg(long)]
        rounds: String,

        /// Scores in player order (comma-separated, must sum to zero)
        #[arg(long, allow_hyphen_values = true)]
        scores: String,

        /// Where the game took place
        #[arg(long)]
        place: String,
    },

    /// Record a game interactively
    Enter,

    /// Evaluate statistics over all recorded games
    Stats {
        /// Tie policy for "Games won" (overrides config)
        #[arg(long)]
        tie_policy: Option<TiePolicy>,

        /// Output format
        #[arg(long, value_enum, default_value = "grid")]
        format: OutputFormat,

        /// Don't persist the report file
        #[arg(long)]
        no_write: bool,
    },

    /// List recorded games
    List,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Grid,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }

    tracing::debug!("Starting doko-stats v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());
    let store = GameStore::open(&storage);

    match cli.command {
        Commands::Add {
            players,
            rounds,
            scores,
            place,
        } => {
            let players = entry::parse_players(&players)?;
            let rounds = entry::parse_rounds(&rounds)?;
            let scores = entry::parse_scores(&scores, players.len())?;
            let game = GameEntry::new(players, rounds, scores, place)?;

            let record = store.append(game).context("Failed to store game")?;
            println!("Game {} added successfully.", record.id);
        }
        Commands::Enter => {
            println!("Entering a new game...");
            let stdin = io::stdin();
            let game = entry::prompt_game_entry(&mut stdin.lock(), &mut io::stdout())
                .context("Game entry aborted")?;

            let record = store.append(game).context("Failed to store game")?;
            println!("Game {} added successfully.", record.id);
        }
        Commands::Stats {
            tie_policy,
            format,
            no_write,
        } => {
            let tie_policy = tie_policy.unwrap_or(config.stats.tie_policy);
            let games = store
                .load()
                .with_context(|| format!("Failed to read games from {:?}", store.path()))?;

            let stats = calculate::evaluate(&games, tie_policy)
                .context("Recorded games are inconsistent")?;
            let grid = report::render_report(&stats);

            match format {
                OutputFormat::Grid => {
                    println!("Statistics:");
                    println!("{}", grid);
                }
                OutputFormat::Json => println!("{}", report::render_json(&stats)?),
            }

            if config.report.write_file && !no_write {
                let path = storage.report_path(&config.report.stats_file);
                report::write_report(&path, &grid)
                    .with_context(|| format!("Failed to write report to {:?}", path))?;
            }
        }
        Commands::List => {
            let games = store
                .load()
                .with_context(|| format!("Failed to read games from {:?}", store.path()))?;
            if games.is_empty() {
                println!("No games recorded.");
            }
            for game in &games {
                let scores: Vec<String> = game
                    .scores
                    .iter()
                    .map(|(player, score)| format!("{} {}", player, score))
                    .collect();
                println!(
                    "#{:<4} {:<16} {:>3} rounds  {}",
                    game.id,
                    game.place,
                    game.rounds,
                    scores.join(", ")
                );
            }
        }
    }

    Ok(())
}
