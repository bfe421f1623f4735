//! Config command
//!
//! Show and create modview configuration.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};

use modview_core::config::Config;

use super::context::{
    locate_config, user_config_path, AppContext, ConfigSource, LOCAL_CONFIG_FILE,
};

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the active configuration
    Show {
        /// Show as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default configuration file
    Init {
        /// Target path (defaults to ./modview.toml)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print where configuration is read from
    Path,
}

/// Execute the config command
///
/// Only `show` parses the configuration, so `init --force` can replace a
/// broken file.
pub fn execute(
    cmd: ConfigCommand,
    explicit: Option<&Path>,
    resolve: impl FnOnce() -> Result<AppContext>,
) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => show_config(&resolve()?, json),
        ConfigCommand::Init { path, force } => init_config(path, force),
        ConfigCommand::Path => show_path(&locate_config(explicit)),
    }
}

fn show_config(ctx: &AppContext, as_json: bool) -> Result<()> {
    use colored::Colorize;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&ctx.config)?);
        return Ok(());
    }

    println!("{}", "Configuration:".bold().underline());
    println!("{}", describe_source(&ctx.source).dimmed());
    println!();
    println!("{}", ctx.config.to_toml()?);
    Ok(())
}

fn init_config(path: Option<PathBuf>, force: bool) -> Result<()> {
    use colored::Colorize;

    let path = path.unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE));
    if path.exists() && !force {
        bail!(
            "{} already exists, use --force to overwrite",
            path.display()
        );
    }

    Config::default()
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{} Wrote default configuration to {}", "✓".green(), path.display());
    Ok(())
}

fn show_path(source: &ConfigSource) -> Result<()> {
    println!("{}", describe_source(source));
    if let Some(user) = user_config_path() {
        println!("user config: {}", user.display());
    }
    Ok(())
}

fn describe_source(source: &ConfigSource) -> String {
    match source {
        ConfigSource::File(path) => format!("active: {}", path.display()),
        ConfigSource::Defaults => "active: built-in defaults".to_string(),
    }
}
