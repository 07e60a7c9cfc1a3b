//! Configuration loader with inheritance support.
//!
//! Loads configuration from multiple sources and merges them:
//! 1. Global config: `~/.docpath/config.toml`
//! 2. Local config: `.docpath/config.toml` (in the documentation root)
//! 3. CLI overrides
//!
//! Later sources override earlier ones.

use crate::error::ConfigError;
use crate::{ConfigOverrides, DocpathConfig, LinksConfig, LogFormat, LoggingConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Global configuration directory name.
const GLOBAL_CONFIG_DIR: &str = ".docpath";

/// Local configuration directory name.
const LOCAL_CONFIG_DIR: &str = ".docpath";

/// Configuration loader with caching and inheritance support.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Global config directory (e.g., `~/.docpath`)
    global_config_dir: Option<PathBuf>,

    /// Cached global config layer
    global_config: Option<ConfigLayer>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader.
    ///
    /// Automatically detects the global config directory (`~/.docpath`).
    pub fn new() -> Self {
        let global_config_dir = dirs::home_dir().map(|h| h.join(GLOBAL_CONFIG_DIR));

        Self {
            global_config_dir,
            global_config: None,
        }
    }

    /// Create a loader with a custom global config directory.
    ///
    /// Useful for testing.
    pub fn with_global_dir(global_dir: impl Into<PathBuf>) -> Self {
        Self {
            global_config_dir: Some(global_dir.into()),
            global_config: None,
        }
    }

    /// Get the global config file path.
    pub fn global_config_path(&self) -> Option<PathBuf> {
        self.global_config_dir
            .as_ref()
            .map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Get the local config file path for a documentation root.
    pub fn local_config_path(&self, root: &Path) -> PathBuf {
        root.join(LOCAL_CONFIG_DIR).join(CONFIG_FILE_NAME)
    }

    /// Load configuration for a documentation root with optional CLI overrides.
    ///
    /// Merges config in order: global → local → overrides, then validates
    /// the result.
    pub fn load(
        &mut self,
        root: &Path,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<DocpathConfig, ConfigError> {
        let mut config = DocpathConfig::default();

        if let Some(global_layer) = self.global_layer()? {
            global_layer.apply_to(&mut config);
        }

        if let Some(local_layer) = self.local_layer(root)? {
            local_layer.apply_to(&mut config);
        }

        if let Some(ovr) = overrides {
            config.apply_overrides(ovr);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load a single explicit config file over the defaults.
    ///
    /// Used for `--config`; global and local files are not consulted.
    pub fn load_file(
        &self,
        path: &Path,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<DocpathConfig, ConfigError> {
        debug!("Loading config from {:?}", path);
        let mut config = load_config_file(path)?.resolve();

        if let Some(ovr) = overrides {
            config.apply_overrides(ovr);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load only the global configuration.
    pub fn load_global(&mut self) -> Result<Option<DocpathConfig>, ConfigError> {
        Ok(self.global_layer()?.map(|layer| layer.resolve()))
    }

    /// Load only the local configuration for a documentation root.
    pub fn load_local(&self, root: &Path) -> Result<Option<DocpathConfig>, ConfigError> {
        Ok(self.local_layer(root)?.map(|layer| layer.resolve()))
    }

    fn global_layer(&mut self) -> Result<Option<ConfigLayer>, ConfigError> {
        if let Some(ref layer) = self.global_config {
            return Ok(Some(layer.clone()));
        }

        let Some(global_path) = self.global_config_path() else {
            debug!("No home directory found, skipping global config");
            return Ok(None);
        };

        if !global_path.exists() {
            trace!("Global config not found at {:?}", global_path);
            return Ok(None);
        }

        debug!("Loading global config from {:?}", global_path);
        let layer = load_config_file(&global_path)?;

        self.global_config = Some(layer.clone());

        Ok(Some(layer))
    }

    fn local_layer(&self, root: &Path) -> Result<Option<ConfigLayer>, ConfigError> {
        let local_path = self.local_config_path(root);

        if !local_path.exists() {
            trace!("Local config not found at {:?}", local_path);
            return Ok(None);
        }

        debug!("Loading local config from {:?}", local_path);
        load_config_file(&local_path).map(Some)
    }

    /// Save configuration to the global config file.
    pub fn save_global(&self, config: &DocpathConfig) -> Result<(), ConfigError> {
        let Some(ref global_dir) = self.global_config_dir else {
            return Err(ConfigError::NoHomeDir);
        };

        let global_path = global_dir.join(CONFIG_FILE_NAME);
        save_config_file(&global_path, config)
    }

    /// Save configuration to the local config file for a documentation root.
    pub fn save_local(&self, root: &Path, config: &DocpathConfig) -> Result<(), ConfigError> {
        let local_path = self.local_config_path(root);
        save_config_file(&local_path, config)
    }

    /// Initialize global configuration directory.
    ///
    /// Creates `~/.docpath/config.toml` with default configuration. An
    /// existing file is left untouched.
    pub fn init_global(&self) -> Result<PathBuf, ConfigError> {
        let Some(ref global_dir) = self.global_config_dir else {
            return Err(ConfigError::NoHomeDir);
        };
        init_config_dir(global_dir)
    }

    /// Initialize local configuration for a documentation root.
    ///
    /// Creates `.docpath/config.toml` with default configuration. An existing
    /// file is left untouched.
    pub fn init_local(&self, root: &Path) -> Result<PathBuf, ConfigError> {
        init_config_dir(&root.join(LOCAL_CONFIG_DIR))
    }

    /// Clear cached global configuration.
    ///
    /// Forces reload on next `load_global()` call.
    pub fn clear_cache(&mut self) {
        self.global_config = None;
    }
}

/// Create `dir` if needed and write a default config file into it.
fn init_config_dir(dir: &Path) -> Result<PathBuf, ConfigError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::create_dir(dir, e))?;
    }

    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        save_config_file(&config_path, &DocpathConfig::default())?;
    }

    Ok(config_path)
}

/// Load a configuration file from disk.
fn load_config_file(path: &Path) -> Result<ConfigLayer, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    toml::from_str(&content).map_err(|e| ConfigError::parse_toml(path, e))
}

/// Save a configuration file to disk.
fn save_config_file(path: &Path, config: &DocpathConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))
}

/// Settings present in one config file.
///
/// Every key is optional so that a file only overrides what it spells out,
/// including values that happen to equal the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigLayer {
    links: LinksLayer,
    index: IndexLayer,
    logging: LoggingLayer,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LinksLayer {
    up_directory: Option<String>,
    separator: Option<String>,
    extension: Option<String>,
    package_index: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct IndexLayer {
    parallelism: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LoggingLayer {
    level: Option<String>,
    format: Option<LogFormat>,
    file: Option<PathBuf>,
}

impl ConfigLayer {
    /// Write every key this layer sets into `config`.
    fn apply_to(&self, config: &mut DocpathConfig) {
        apply_links(&self.links, &mut config.links);
        if let Some(parallelism) = self.index.parallelism {
            config.index.parallelism = parallelism;
        }
        apply_logging(&self.logging, &mut config.logging);
    }

    /// The layer on top of the built-in defaults.
    fn resolve(&self) -> DocpathConfig {
        let mut config = DocpathConfig::default();
        self.apply_to(&mut config);
        config
    }
}

fn apply_links(layer: &LinksLayer, links: &mut LinksConfig) {
    let fields = [
        (&layer.up_directory, &mut links.up_directory),
        (&layer.separator, &mut links.separator),
        (&layer.extension, &mut links.extension),
        (&layer.package_index, &mut links.package_index),
    ];
    for (value, slot) in fields {
        if let Some(value) = value {
            slot.clone_from(value);
        }
    }
}

fn apply_logging(layer: &LoggingLayer, logging: &mut LoggingConfig) {
    if let Some(ref level) = layer.level {
        logging.level.clone_from(level);
    }
    if let Some(format) = layer.format {
        logging.format = format;
    }
    if let Some(ref file) = layer.file {
        logging.file = Some(file.clone());
    }
}
