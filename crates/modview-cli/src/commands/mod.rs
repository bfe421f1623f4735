//! CLI commands module
//!
//! This module contains all CLI command implementations.

pub mod check;
pub mod config;
pub mod context;
pub mod render;
pub mod subreddits;
pub mod threads;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use context::AppContext;

/// modview - view simulated forum threads with and without moderation
#[derive(Debug, Parser)]
#[command(name = "modview")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Unmoderated dataset (CSV), overrides the configuration
    #[arg(long, global = true, env = "MODVIEW_UNMODERATED")]
    pub unmoderated: Option<PathBuf>,

    /// Moderated dataset (CSV), overrides the configuration
    #[arg(long, global = true, env = "MODVIEW_MODERATED")]
    pub moderated: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render threads to HTML, Markdown, JSON or text
    Render(render::RenderArgs),

    /// List threads of a subreddit
    Threads(threads::ThreadsArgs),

    /// List subreddits present in the data
    Subreddits(subreddits::SubredditsArgs),

    /// Validate both datasets and compare their structure
    Check(check::CheckArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(config::ConfigCommand),
}

/// Run the CLI application
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose);

    // Handle color output
    if cli.no_color {
        colored::control::set_override(false);
    }

    let Cli {
        command,
        config: config_path,
        unmoderated,
        moderated,
        ..
    } = cli;
    let resolve = || AppContext::resolve(config_path.as_deref(), unmoderated.clone(), moderated.clone());

    // Dispatch to command handler
    match command {
        Commands::Render(args) => render::execute(args, &resolve()?),
        Commands::Threads(args) => threads::execute(args, &resolve()?),
        Commands::Subreddits(args) => subreddits::execute(args, &resolve()?),
        Commands::Check(args) => check::execute(args, &resolve()?),
        Commands::Config(cmd) => config::execute(cmd, config_path.as_deref(), resolve),
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbosity {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
