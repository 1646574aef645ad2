//! branchtree - branch topology viewer for git repositories
//!
//! Prints the local branches of a repository as a tree of box-drawing
//! glyphs, and keeps that tree up to date by pulling the root branch and
//! rebasing every branch onto its parent.
//!
//! # Usage
//!
//! ```bash
//! branchtree                 # Show the tree of the current repository
//! branchtree -c /path/repo   # Show the tree with commits
//! branchtree pull --wipe     # Pull, rebase, then delete alias branches
//! branchtree wipe            # Delete alias branches
//! ```

mod app;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use branchtree::config::Config;
use branchtree::ui::Display;

use app::{Action, App};

const LOG_ENV: &str = "BRANCHTREE_LOG";

/// Branch topology viewer for git repositories
#[derive(Parser, Debug)]
#[command(name = "branchtree")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the repository (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// List commits under every branch
    #[arg(short, long)]
    commits: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pull the root branch and rebase every branch onto its parent
    Pull {
        /// Delete alias branches afterwards
        #[arg(short, long)]
        wipe: bool,
    },
    /// Delete branches pointing at the same commit as a kept branch
    Wipe,
}

impl Command {
    fn action(command: Option<&Command>) -> Action {
        match command {
            None => Action::Show,
            Some(Command::Pull { wipe }) => Action::Pull { wipe: *wipe },
            Some(Command::Wipe) => Action::Wipe,
        }
    }
}

fn init_logging(verbose: bool, config: &Config) {
    let fallback = if verbose { "debug" } else { config.log_level.as_str() };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(args: &Args, mut config: Config) -> Result<()> {
    // Resolve the repository path
    let repo_path = args.path.canonicalize().unwrap_or_else(|_| args.path.clone());

    if args.commits {
        config.show_commits = true;
    }
    let display = Display::new(config.color && !args.no_color);

    let app = App::new(repo_path, config, display);
    app.run(Command::action(args.command.as_ref()))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            Display::new(!args.no_color).error(format!("Invalid config: {err}"));
            return ExitCode::FAILURE;
        }
    };
    init_logging(args.verbose, &config);

    let color = config.color && !args.no_color;
    match run(&args, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            Display::new(color).error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
