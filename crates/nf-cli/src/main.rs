//! CLI frontend for Narrative Front.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "nf",
    about = "Narrative Front: counter a disinformation campaign one round at a time",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a campaign interactively
    Play {
        /// RNG seed for a reproducible game
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Content directory (default: built-in pack)
        #[arg(short, long)]
        content: Option<PathBuf>,

        /// Content language
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Number of rounds (default: 6)
        #[arg(short, long)]
        rounds: Option<u32>,

        /// Save file used by the `save` command and autosave
        #[arg(long)]
        save: Option<PathBuf>,

        /// Continue the game stored in the save file
        #[arg(long, requires = "save")]
        resume: bool,
    },

    /// Play many games with a fixed policy and report balance statistics
    Simulate {
        /// Number of games per policy
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// RNG seed for the first game
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Response policy: passive, fact-check, random (default: all)
        #[arg(short, long)]
        policy: Option<String>,

        /// Content directory (default: built-in pack)
        #[arg(short, long)]
        content: Option<PathBuf>,

        /// Content language
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Number of rounds per game (default: 6)
        #[arg(short, long)]
        rounds: Option<u32>,
    },

    /// Validate scenarios and narrative tables
    Check {
        /// Content directory (default: built-in pack)
        #[arg(short, long)]
        content: Option<PathBuf>,

        /// Content language
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Second language to compare against for parity
        #[arg(short, long)]
        against: Option<String>,

        /// Number of rounds to check (default: 6)
        #[arg(short, long)]
        rounds: Option<u32>,
    },

    /// Show the round history of a saved game
    History {
        /// Save file
        file: PathBuf,

        /// Output format: markdown, text, json
        #[arg(short, long, default_value = "markdown")]
        format: String,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            seed,
            content,
            language,
            rounds,
            save,
            resume,
        } => commands::play::run(&commands::play::PlayOptions {
            seed,
            content,
            language,
            rounds,
            save,
            resume,
        }),
        Commands::Simulate {
            games,
            seed,
            policy,
            content,
            language,
            rounds,
        } => commands::simulate::run(&commands::simulate::SimulateOptions {
            content,
            games,
            seed,
            policy,
            language,
            rounds,
        }),
        Commands::Check {
            content,
            language,
            against,
            rounds,
        } => commands::check::run(content.as_deref(), &language, against.as_deref(), rounds),
        Commands::History { file, format } => commands::history::run(&file, &format),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings and errors).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
