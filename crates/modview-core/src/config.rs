//! Configuration management for modview

use crate::error::{ModviewError, Result};
use crate::view::{DEFAULT_MAX_INDENT_DEPTH, MAX_INDENT_DEPTH_LIMIT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input dataset settings
    pub data: DataConfig,
    /// Rendering settings
    pub render: RenderConfig,
    /// Default filter settings
    pub filter: FilterConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ModviewError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ModviewError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.render.indent_px == 0 {
            return Err(ModviewError::Config(
                "render.indent_px must be greater than zero".to_string(),
            ));
        }
        if self.render.max_indent_depth > MAX_INDENT_DEPTH_LIMIT {
            return Err(ModviewError::Config(format!(
                "render.max_indent_depth must be at most {}, got {}",
                MAX_INDENT_DEPTH_LIMIT, self.render.max_indent_depth
            )));
        }
        if !matches!(
            self.render.default_view.as_str(),
            "unmoderated" | "moderated" | "both"
        ) {
            return Err(ModviewError::Config(format!(
                "render.default_view must be unmoderated, moderated or both, got '{}'",
                self.render.default_view
            )));
        }
        Ok(())
    }
}

/// Input dataset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// CSV file with the original conversations
    pub unmoderated: PathBuf,
    /// CSV file with moderation decisions applied
    pub moderated: PathBuf,
    /// Refuse to render when the datasets differ in structure
    pub strict_parity: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            unmoderated: PathBuf::from("reddit_sim_unmoderated.csv"),
            moderated: PathBuf::from("reddit_sim_moderated.csv"),
            strict_parity: false,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Default export format
    pub default_format: String,
    /// Default view: unmoderated, moderated or both
    pub default_view: String,
    /// Deepest visual indentation level
    pub max_indent_depth: usize,
    /// Pixels per indentation level in HTML output
    pub indent_px: usize,
    /// Replacement for flagged comments without a message
    pub moderation_notice: Option<String>,
    /// Page title
    pub page_title: String,
    /// Line shown under the title
    pub page_subtitle: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            default_format: "html".to_string(),
            default_view: "both".to_string(),
            max_indent_depth: DEFAULT_MAX_INDENT_DEPTH,
            indent_px: 18,
            moderation_notice: None,
            page_title: "Simulated Reddit".to_string(),
            page_subtitle: "Reddit-style conversations generated from our simulation, \
                            shown with and without the ToxiMuncher (Lite) moderator."
                .to_string(),
        }
    }
}

/// Filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Subreddit selected when none is given, "All" for every subreddit
    pub default_subreddit: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_subreddit: "All".to_string(),
        }
    }
}
