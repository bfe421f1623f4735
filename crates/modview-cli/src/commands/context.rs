//! Shared command context
//!
//! Resolves the configuration once and loads the datasets on demand.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use modview_core::config::Config;
use modview_core::record::{ParityReport, RecordStore};
use modview_storage::CsvDatasetLoader;

/// Name of the project-local configuration file
pub const LOCAL_CONFIG_FILE: &str = "modview.toml";

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicit `--config` path or a discovered file
    File(PathBuf),
    /// Built-in defaults
    Defaults,
}

/// Configuration and dataset access shared by all commands
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub source: ConfigSource,
}

impl AppContext {
    /// Resolve configuration: explicit path, `./modview.toml`, user config dir, defaults.
    /// Dataset paths given on the command line win over the file.
    pub fn resolve(
        explicit: Option<&Path>,
        unmoderated: Option<PathBuf>,
        moderated: Option<PathBuf>,
    ) -> Result<Self> {
        let source = locate_config(explicit);
        let mut config = match &source {
            ConfigSource::File(path) => Config::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            ConfigSource::Defaults => Config::default(),
        };
        debug!("Using configuration from {:?}", source);

        if let Some(path) = unmoderated {
            config.data.unmoderated = path;
        }
        if let Some(path) = moderated {
            config.data.moderated = path;
        }

        Ok(Self { config, source })
    }

    /// Load both datasets; `strict` forces parity checking on
    pub fn load_store(&self, strict: bool) -> Result<(RecordStore, ParityReport)> {
        let data = &self.config.data;
        CsvDatasetLoader::new(&data.unmoderated, &data.moderated)
            .with_strict_parity(strict || data.strict_parity)
            .load()
            .with_context(|| {
                format!(
                    "Failed to load datasets {} and {}",
                    data.unmoderated.display(),
                    data.moderated.display()
                )
            })
    }
}

/// Configuration file in the user's config directory
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "modview", "modview")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .or_else(|| dirs::config_dir().map(|dir| dir.join("modview").join("config.toml")))
}

/// Find the configuration file that would be used, without reading it
pub fn locate_config(explicit: Option<&Path>) -> ConfigSource {
    match explicit {
        Some(path) => ConfigSource::File(path.to_path_buf()),
        None => discover_config_path()
            .map(ConfigSource::File)
            .unwrap_or(ConfigSource::Defaults),
    }
}

fn discover_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }
    user_config_path().filter(|p| p.exists())
}
