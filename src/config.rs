//! Default filter values and scan behaviour from TOML configuration files.
//!
//! Command-line flags always win over values from the file. Every section
//! and key is optional.
//!
//! # Configuration File Format
//!
//! ```toml
//! [defaults]
//! name_contains = ""
//! formats = "jpg, png"
//! recursive = true
//!
//! [scan]
//! skip_hidden = false
//! follow_symlinks = false
//!
//! [confirm]
//! assume_yes = false
//! ```

use crate::enumerator::ScanOptions;
use crate::format_spec::FormatSpec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading configuration.
#[derive(thiserror::Error, Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),
    /// The default format list is malformed.
    #[error("Invalid default formats '{0}': the list contains an empty entry")]
    InvalidFormats(String),
    /// IO error while reading configuration.
    #[error("IO error reading configuration: {0}")]
    IoError(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneConfig {
    #[serde(default)]
    pub defaults: FilterDefaults,

    #[serde(default)]
    pub scan: ScanRules,

    #[serde(default)]
    pub confirm: ConfirmRules,
}

/// Filter values used when the matching flag is not given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDefaults {
    /// Substring a file name must contain to be kept.
    #[serde(default)]
    pub name_contains: String,

    /// Raw comma-separated format list; empty means any format.
    #[serde(default)]
    pub formats: String,

    /// Whether to descend into subfolders. Defaults to true.
    #[serde(default = "default_recursive")]
    pub recursive: bool,
}

fn default_recursive() -> bool {
    true
}

impl Default for FilterDefaults {
    fn default() -> Self {
        Self {
            name_contains: String::new(),
            formats: String::new(),
            recursive: default_recursive(),
        }
    }
}

/// How folders are walked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRules {
    #[serde(default)]
    pub skip_hidden: bool,

    #[serde(default)]
    pub follow_symlinks: bool,
}

impl From<ScanRules> for ScanOptions {
    fn from(rules: ScanRules) -> Self {
        ScanOptions {
            skip_hidden: rules.skip_hidden,
            follow_symlinks: rules.follow_symlinks,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmRules {
    /// Skip the yes/no prompt before moving files.
    #[serde(default)]
    pub assume_yes: bool,
}

impl PruneConfig {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.fileprunerc.toml` in the current directory
    /// 3. Look for `~/.config/fileprune/config.toml` in home directory
    /// 4. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but
    /// cannot be read, or if any file found is invalid.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(".fileprunerc.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("fileprune")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        log::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        let config = Self::from_toml(&content)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigInvalid`] for bad TOML and
    /// [`ConfigError::InvalidFormats`] for a malformed default format list.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))?;

        FormatSpec::parse(&config.defaults.formats)
            .map_err(|_| ConfigError::InvalidFormats(config.defaults.formats.clone()))?;

        Ok(config)
    }
}
