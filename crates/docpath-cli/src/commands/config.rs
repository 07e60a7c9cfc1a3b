//! Config command - View and manage configuration
//!
//! - Show the effective configuration and where it was loaded from
//! - Initialize a default config file (local or global)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use docpath_config::{ConfigLoader, DocpathConfig};
use serde::Serialize;

use super::print_info;
use crate::GlobalOptions;

/// Config management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show(ShowArgs),

    /// Create a config file with default values
    Init(InitArgs),
}

/// Arguments for the show command
#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Arguments for the init command
#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Create the global config (~/.docpath/config.toml) instead of local
    #[arg(long)]
    global: bool,
}

/// Configuration file locations
#[derive(Debug, Clone, Serialize)]
struct ConfigSources {
    /// Explicit `--config` file, if any
    explicit: Option<PathBuf>,
    /// Global config file path
    global: Option<PathBuf>,
    /// Local config file path
    local: PathBuf,
    /// Whether global config exists
    global_exists: bool,
    /// Whether local config exists
    local_exists: bool,
}

/// Effective configuration as printed with `--json`
#[derive(Debug, Serialize)]
struct ShowOutput<'a> {
    sources: ConfigSources,
    config: &'a DocpathConfig,
}

/// Execute the config command
pub fn execute(cmd: ConfigCommand, global: &GlobalOptions, config: &DocpathConfig) -> Result<()> {
    match cmd {
        ConfigCommand::Show(args) => execute_show(args, global, config),
        ConfigCommand::Init(args) => execute_init(args, global),
    }
}

fn execute_show(args: ShowArgs, global: &GlobalOptions, config: &DocpathConfig) -> Result<()> {
    let sources = config_sources(global)?;

    if args.json {
        let output = ShowOutput { sources, config };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(ref explicit) = sources.explicit {
        println!("# Config file: {}", explicit.display());
    } else {
        if let Some(ref path) = sources.global {
            println!("# Global: {} ({})", path.display(), status(sources.global_exists));
        }
        println!(
            "# Local:  {} ({})",
            sources.local.display(),
            status(sources.local_exists)
        );
    }
    println!();
    print!(
        "{}",
        toml::to_string_pretty(config).context("Failed to serialize configuration")?
    );

    Ok(())
}

fn execute_init(args: InitArgs, global: &GlobalOptions) -> Result<()> {
    let loader = ConfigLoader::new();
    let existed;
    let path = if args.global {
        existed = loader.global_config_path().is_some_and(|p| p.exists());
        loader
            .init_global()
            .context("Failed to initialize global config")?
    } else {
        let root = std::env::current_dir().context("Failed to get current directory")?;
        existed = loader.local_config_path(&root).exists();
        loader
            .init_local(&root)
            .context("Failed to initialize local config")?
    };

    if existed {
        print_info(
            &format!("Config already exists at {}", path.display()),
            global.quiet,
        );
    } else {
        print_info(&format!("Created {}", path.display()), global.quiet);
    }
    println!("{}", path.display());

    Ok(())
}

fn config_sources(global: &GlobalOptions) -> Result<ConfigSources> {
    let loader = ConfigLoader::new();
    let root = std::env::current_dir().context("Failed to get current directory")?;
    let global_path = loader.global_config_path();
    let local = loader.local_config_path(&root);

    Ok(ConfigSources {
        explicit: global.config.clone(),
        global_exists: global_path.as_ref().is_some_and(|p| p.exists()),
        global: global_path,
        local_exists: local.exists(),
        local,
    })
}

fn status(exists: bool) -> &'static str {
    if exists {
        "found"
    } else {
        "not found"
    }
}
