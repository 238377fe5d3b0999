use clap::{Parser, Subcommand};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use hordefarm::catalog::{Difficulty, Rarity};
use hordefarm::cli::commands;
use hordefarm::config::GameConfig;

#[derive(Parser)]
#[command(name = "hordefarm")]
#[command(about = "A farming and horde-defense simulation played from the terminal")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "farm.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a session and play it from stdin
    Run {
        /// easy, normal or hard (overrides the config file)
        #[arg(short, long)]
        difficulty: Option<String>,

        /// RNG seed for a reproducible session (0 picks one at random)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Print the seed, hoe and pet catalog
    Catalog {
        /// Only list seeds of this rarity
        #[arg(short, long)]
        rarity: Option<String>,

        /// Catalog seed, as passed to `run --seed`
        #[arg(short, long, default_value_t = 1)]
        seed: u64,

        /// Show prices for this difficulty
        #[arg(short, long, default_value = "normal")]
        difficulty: String,
    },
}

fn load_config(path: &str) -> GameConfig {
    match GameConfig::from_file_or_default(Path::new(path)) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    }
}

fn parse_difficulty(s: &str) -> Difficulty {
    match Difficulty::parse(s) {
        Some(d) => d,
        None => {
            eprintln!("Unknown difficulty '{}'. Use easy, normal or hard", s);
            std::process::exit(1);
        }
    }
}

fn init_logging(config: &GameConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let mut config = load_config(&cli.config);
    init_logging(&config);

    match cli.command {
        Commands::Run { difficulty, seed } => {
            let difficulty = match difficulty {
                Some(d) => parse_difficulty(&d),
                None => config.difficulty(),
            };
            if let Some(seed) = seed {
                config.rng_seed = seed;
            }

            if let Err(e) = commands::run_session(&config, difficulty).await {
                eprintln!("Session error: {}", e);
                std::process::exit(1);
            }
        }

        Commands::Catalog {
            rarity,
            seed,
            difficulty,
        } => {
            let rarity = match rarity.as_deref().map(|r| (r, Rarity::parse(r))) {
                None => None,
                Some((_, Some(r))) => Some(r),
                Some((r, None)) => {
                    eprintln!(
                        "Unknown rarity '{}'. Use common, rare, epic, mystic or ultimate",
                        r
                    );
                    std::process::exit(1);
                }
            };
            commands::print_catalog(seed, parse_difficulty(&difficulty), rarity);
        }
    }
}
