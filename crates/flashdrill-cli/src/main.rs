//! flashdrill CLI: quiz yourself on flashcard decks from the terminal.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use flashdrill_core::console::Console;

mod commands;
mod terminal;

use commands::Context;
use terminal::TerminalConsole;

#[derive(Parser)]
#[command(name = "flashdrill", version, about = "Command-line flashcard trainer")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// One line typed at the `shell` prompt.
#[derive(Parser)]
#[command(
    name = "flashdrill",
    no_binary_name = true,
    disable_version_flag = true
)]
pub(crate) struct ShellLine {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Quiz a deck; without FILE, a random working-directory deck
    Quiz {
        /// Deck file name, from the current or the working directory
        file: Option<String>,
    },

    /// Quiz a random mix of working-directory decks
    Mix {
        /// Number of decks to draw (default: random_count setting)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Write SRC mirrored and as-is to DST, so it drills both ways
    Make {
        src: PathBuf,
        dst: PathBuf,

        /// Replace DST without asking
        #[arg(long)]
        force: bool,
    },

    /// Machine-translate a phrase list into a bilingual deck
    Automake {
        src: PathBuf,
        dst: PathBuf,

        /// Target language key (e.g. R or language=R); overrides the file header
        #[arg(long)]
        language: Option<String>,

        /// Replace DST without asking
        #[arg(long)]
        force: bool,
    },

    /// Report lines of a deck that cannot be quizzed
    Check {
        /// Deck file name or path
        file: String,
    },

    /// List eligible decks
    Ls {
        /// Only list the working directory
        #[arg(long)]
        working: bool,
    },

    /// Show the score log
    Stats,

    /// Show or edit settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Create a starter flashdrill.toml
    Init,

    /// Interactive command loop
    Shell,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Print every setting
    Show,

    /// Change one setting and save it
    Set {
        key: String,
        value: String,
        /// Second value for list keys, or the tag for `languages`
        entry: Option<String>,
    },

    /// Print the file settings are saved to
    Path,
}

/// Run one command against the loaded settings.
pub(crate) fn execute(
    command: Commands,
    ctx: &mut Context,
    console: &mut dyn Console,
) -> Result<()> {
    match command {
        Commands::Quiz { file } => commands::quiz::execute(ctx, file, console),
        Commands::Mix { count } => commands::quiz::execute_mix(ctx, count, console),
        Commands::Make { src, dst, force } => {
            commands::make::execute(ctx, src, dst, force, console)
        }
        Commands::Automake {
            src,
            dst,
            language,
            force,
        } => commands::automake::execute(ctx, src, dst, language, force, console),
        Commands::Check { file } => commands::check::execute(ctx, &file, console),
        Commands::Ls { working } => commands::ls::execute(ctx, working, console),
        Commands::Stats => commands::stats::execute(ctx, console),
        Commands::Config { action } => commands::config::execute(ctx, action, console),
        Commands::Init => commands::init::execute(ctx, console),
        Commands::Shell => commands::shell::execute(ctx, console),
    }
}

fn main() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "flashdrill=warn".parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();
    let mut console = TerminalConsole::new();

    let result = Context::load(cli.config.as_deref())
        .and_then(|mut ctx| execute(cli.command, &mut ctx, &mut console));

    if let Err(e) = result {
        commands::print_error(&e);
        process::exit(1);
    }
}
