//! vocabquiz CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use vocabquiz_core::error::StoreError;

mod commands;

#[derive(Parser)]
#[command(name = "vocabquiz", version, about = "Multiple-choice vocabulary quizzes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive quiz
    Quiz {
        /// Deck file to quiz on (defaults to `deck` from the config)
        #[arg(long)]
        deck: Option<PathBuf>,

        /// Only ask items at this mastery level
        #[arg(long)]
        level: Option<u8>,

        /// Start on a specific item: "source_lang|target_lang|source_text|target_text"
        #[arg(long)]
        item: Option<String>,

        /// What launched the quiz (quick-action, shortcut, search, ...)
        #[arg(long)]
        launch: Option<String>,

        /// RNG seed for a reproducible question order
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show how many items sit at each mastery level
    Levels {
        /// Deck file (defaults to `deck` from the config)
        #[arg(long)]
        deck: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List a deck's items, highest level first
    List {
        /// Deck file (defaults to `deck` from the config)
        #[arg(long)]
        deck: Option<PathBuf>,

        /// Only show items whose source text contains this (case-insensitive)
        #[arg(long)]
        search: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate deck TOML files
    Validate {
        /// Path to deck file or directory
        #[arg(long)]
        deck: PathBuf,
    },

    /// Add the items of one deck to another, skipping ones already present
    Import {
        /// Deck to read new items from
        #[arg(long)]
        from: PathBuf,

        /// Deck to add them to
        #[arg(long)]
        into: PathBuf,
    },

    /// Create starter config and deck
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Quiz {
            deck,
            level,
            item,
            launch,
            seed,
            config,
        } => commands::quiz::execute(deck, level, item, launch, seed, config),
        Commands::Levels {
            deck,
            format,
            config,
        } => commands::levels::execute(deck, format, config),
        Commands::List {
            deck,
            search,
            config,
        } => commands::list::execute(deck, search, config),
        Commands::Validate { deck } => commands::validate::execute(deck),
        Commands::Import { from, into } => commands::import::execute(from, into),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        let content_error = e
            .chain()
            .filter_map(|cause| cause.downcast_ref::<StoreError>())
            .any(StoreError::is_content_error);
        if content_error {
            eprintln!("The deck file itself needs fixing; retrying will not help.");
        }
        process::exit(1);
    }
}
