//! CLI frontend for the Quest Chronicles role-playing game.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use qc_session::SessionConfig;

#[derive(Parser)]
#[command(
    name = "qc",
    about = "Quest Chronicles, a turn-based text role-playing game",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding quests.txt and items.txt
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Directory holding save files (default: <data-dir>/save_games)
    #[arg(long, global = true)]
    save_dir: Option<PathBuf>,

    /// Do not save automatically after each change
    #[arg(long, global = true)]
    no_autosave: bool,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the default quest and item files
    Init,

    /// Create and save a new character
    New {
        /// Character name
        name: String,

        /// Class: warrior, mage, rogue, or cleric
        class: String,
    },

    /// List saved characters
    List,

    /// Delete a saved character
    Delete {
        /// Character name
        name: String,
    },

    /// Show a character sheet
    Show {
        /// Character name
        name: String,

        /// Print the character as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the quest dataset with prerequisite chains
    Quests,

    /// Validate the data files and report diagnostics
    Check,

    /// Play an interactive session
    Play {
        /// Character name
        name: String,

        /// RNG seed for reproducible battles
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("QC_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = SessionConfig::default()
        .with_data_dir(cli.data_dir)
        .with_autosave(!cli.no_autosave);
    if let Some(dir) = cli.save_dir {
        config = config.with_save_dir(dir);
    }

    let result = match cli.command {
        Commands::Init => commands::init::run(&config),
        Commands::New { name, class } => commands::new::run(&config, &name, &class),
        Commands::List => commands::list::run(&config),
        Commands::Delete { name } => commands::delete::run(&config, &name),
        Commands::Show { name, json } => commands::show::run(&config, &name, json),
        Commands::Quests => commands::quests::run(&config),
        Commands::Check => commands::check::run(&config),
        Commands::Play { name, seed } => {
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            commands::play::run(config, &name)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
