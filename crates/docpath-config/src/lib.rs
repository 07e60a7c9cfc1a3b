//! DocPath Configuration Management
//!
//! Provides configuration loading with support for:
//! - Global config: `~/.docpath/config.toml`
//! - Local config: `.docpath/config.toml` (in the documentation root)
//! - CLI overrides via `ConfigOverrides`
//!
//! Configuration is merged in order: global → local → CLI overrides.

mod error;
mod loader;

pub use error::{ConfigError, FileOp};
pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Log levels accepted by `logging.level`.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Root configuration for DocPath.
///
/// Represents the fully merged configuration from all sources.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DocpathConfig {
    /// Relative link rendering
    pub links: LinksConfig,

    /// Identifier indexing
    pub index: IndexConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Tokens used when rendering relative links between package pages.
///
/// # Example TOML
///
/// ```toml
/// [links]
/// up_directory = "../"
/// separator = "/"
/// extension = ".html"
/// package_index = "index.html"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LinksConfig {
    /// Emitted once per directory level climbed
    pub up_directory: String,

    /// Appended after each descended package segment
    pub separator: String,

    /// Extension of generated pages
    pub extension: String,

    /// File name of a package's index page
    pub package_index: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            up_directory: "../".to_string(),
            separator: "/".to_string(),
            extension: ".md".to_string(),
            package_index: "README.md".to_string(),
        }
    }
}

impl LinksConfig {
    /// Validate that the path tokens can produce usable links.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.up_directory.is_empty() {
            return Err(ConfigError::invalid_value(
                "links.up_directory",
                "must not be empty",
            ));
        }
        if self.separator.is_empty() {
            return Err(ConfigError::invalid_value(
                "links.separator",
                "must not be empty",
            ));
        }
        Ok(())
    }
}

/// Identifier indexing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct IndexConfig {
    /// Worker threads for concurrent producers (0 = auto-detect)
    pub parallelism: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: LogFormat,

    /// Log file path (optional)
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Validate the configured log level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            Ok(())
        } else {
            Err(ConfigError::invalid_value(
                "logging.level",
                format!(
                    "unknown level '{}'. Valid values: {}",
                    self.level,
                    LOG_LEVELS.join(", ")
                ),
            ))
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON structured logging
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnknownLogFormat(s.to_string())),
        }
    }
}

/// CLI overrides for configuration values.
///
/// Used to apply command-line arguments over file-based config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override log level
    pub log_level: Option<String>,

    /// Override log format
    pub log_format: Option<LogFormat>,

    /// Override indexing parallelism
    pub parallelism: Option<usize>,

    /// Override page extension
    pub extension: Option<String>,
}

impl DocpathConfig {
    /// Apply CLI overrides to this configuration.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref level) = overrides.log_level {
            self.logging.level = level.clone();
        }

        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }

        if let Some(parallelism) = overrides.parallelism {
            self.index.parallelism = parallelism;
        }

        if let Some(ref extension) = overrides.extension {
            self.links.extension = extension.clone();
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.links.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Indexing thread count, `None` leaving the choice to rayon.
    pub fn parallelism(&self) -> Option<usize> {
        (self.index.parallelism > 0).then_some(self.index.parallelism)
    }
}
