//! Configuration management for hdt-facts
//!
//! Config file location:
//! - Linux: ~/.config/hdt-facts/config.toml
//! - macOS: ~/Library/Application Support/hdt-facts/config.toml
//! - Windows: %APPDATA%/hdt-facts/config.toml
//!
//! You can override the config location by setting `HDT_FACTS_CONFIG_PATH`.
//! A missing file is not an error; every setting has a default.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::dump::DumpError;
use crate::hardware::ram::{self, RamSize};

pub const CONFIG_PATH_ENV: &str = "HDT_FACTS_CONFIG_PATH";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Memory extraction settings
    #[serde(default)]
    pub ram: RamConfig,

    /// Diagnostics written to stderr
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location, or defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_or_default(&Self::config_path()?)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Write configuration as TOML, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        fs::write(path, toml)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// `HDT_FACTS_CONFIG_PATH` if set and non-blank, else the platform config dir
    pub fn config_path() -> Result<PathBuf> {
        let from_env = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        if let Some(path) = from_env {
            return Ok(PathBuf::from(path));
        }

        ProjectDirs::from("com", "forgemypc", "hdt-facts")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .context("Could not determine project directories")
    }

    /// Write the effective settings to the default location unless a file is already there
    pub fn init() -> Result<Self> {
        Self::init_at(&Self::config_path()?)
    }

    /// Load `path`, writing it out first if it doesn't exist yet
    pub fn init_at(path: &Path) -> Result<Self> {
        let config = Self::load_or_default(path)?;
        if !path.exists() {
            config.save_to(path)?;
            tracing::info!(path = %path.display(), "wrote default config");
        }
        Ok(config)
    }
}

/// What to do when a memory dump has no `memory via e820` block
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissingBlockPolicy {
    /// Print nothing and exit successfully
    #[default]
    Silent,
    /// Fail with a not-found error
    Error,
}

impl MissingBlockPolicy {
    pub fn apply(self, size: Option<RamSize>) -> Result<Option<RamSize>, DumpError> {
        match (size, self) {
            (Some(size), _) => Ok(Some(size)),
            (None, Self::Silent) => Ok(None),
            (None, Self::Error) => Err(DumpError::NotFound {
                what: format!("{:?} block", ram::E820_ITEM),
            }),
        }
    }
}

/// Memory extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RamConfig {
    /// Form factor prefixes that count as a populated slot
    #[serde(default = "default_form_factors")]
    pub form_factors: Vec<String>,

    /// Behavior when the e820 summary block is absent
    #[serde(default)]
    pub on_missing_e820: MissingBlockPolicy,
}

impl Default for RamConfig {
    fn default() -> Self {
        Self {
            form_factors: default_form_factors(),
            on_missing_e820: MissingBlockPolicy::default(),
        }
    }
}

fn default_form_factors() -> Vec<String> {
    ram::DEFAULT_FORM_FACTORS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "warn".to_string()
}

/// Get configuration file path for display purposes
pub fn get_config_path() -> Result<String> {
    let path = Config::config_path()?;
    Ok(path.display().to_string())
}
