//! CLI command implementations
//!
//! This module contains all DocPath CLI command implementations plus the
//! shared plumbing: configuration loading, package list intake and tree
//! construction.

pub mod config;
pub mod link;
pub mod resolve;
pub mod stats;
pub mod tree;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use docpath_config::{ConfigLoader, DocpathConfig, LinksConfig};
use docpath_core::{BuilderConfig, LinkStyle, PackageTree, PackageTreeBuilder};
use tracing::debug;

use crate::GlobalOptions;

/// Comment marker in package list files.
const COMMENT_PREFIX: char = '#';

/// Load configuration, honoring `--config` and CLI overrides.
///
/// Without `--config` the global and local files are merged, the local one
/// being looked up in the current directory.
pub fn load_config(global: &GlobalOptions) -> Result<DocpathConfig> {
    let overrides = global.to_config_overrides();

    if let Some(ref config_path) = global.config {
        return ConfigLoader::new()
            .load_file(config_path, Some(&overrides))
            .with_context(|| format!("Failed to load config file {}", config_path.display()));
    }

    let root = std::env::current_dir().context("Failed to get current directory")?;
    ConfigLoader::new()
        .load(&root, Some(&overrides))
        .context("Failed to load configuration")
}

/// Parse a package list: one identifier per line.
///
/// Surrounding whitespace is trimmed; blank lines and `#` comments are
/// skipped.
pub fn parse_packages(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
        .map(str::to_string)
        .collect()
}

/// Read one package list per `--packages` file, or a single list from stdin.
pub fn read_packages(global: &GlobalOptions) -> Result<Vec<Vec<String>>> {
    if global.packages.is_empty() {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read package identifiers from stdin")?;
        return Ok(vec![parse_packages(&content)]);
    }

    global
        .packages
        .iter()
        .map(|path| read_package_file(path))
        .collect()
}

fn read_package_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read package file {}", path.display()))?;
    let packages = parse_packages(&content);
    debug!("Read {} package(s) from {}", packages.len(), path.display());
    Ok(packages)
}

/// Build the package tree from the configured producers.
pub fn build_tree(global: &GlobalOptions, config: &DocpathConfig) -> Result<PackageTree> {
    let producers = read_packages(global)?;

    let builder = PackageTreeBuilder::with_config(BuilderConfig {
        parallelism: config.parallelism(),
    });
    builder.add_sources(&producers);
    builder.build().context("Failed to build package tree")
}

/// Link style from the `[links]` configuration section.
pub fn link_style(links: &LinksConfig) -> LinkStyle {
    LinkStyle {
        up_directory: links.up_directory.clone(),
        separator: links.separator.clone(),
        extension: links.extension.clone(),
        package_index: links.package_index.clone(),
    }
}

/// Print an info message (respects quiet flag).
pub fn print_info(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{}", message);
    }
}

/// Print a warning message to stderr.
pub fn print_warning(message: &str) {
    eprintln!("warning: {}", message);
}
