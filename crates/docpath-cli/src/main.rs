//! DocPath CLI - Relative links between package documentation pages
//!
//! Reads the package identifiers of a documented codebase, builds the package
//! tree and answers navigation queries between package pages.
//!
//! # Usage
//!
//! ```bash
//! # Steps from one package to another
//! docpath --packages packages.txt resolve com.acme.core com.acme.web
//!
//! # Relative link to a page of another package
//! docpath --packages packages.txt link com.acme.core com.acme.web --page Server
//!
//! # Print the package tree (identifiers read from stdin)
//! cat packages.txt | docpath tree --format dot
//! ```

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use docpath_config::{ConfigOverrides, LogFormat, LoggingConfig};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod commands;

/// DocPath - Package hierarchy resolution for documentation links
#[derive(Parser, Debug)]
#[command(name = "docpath")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Args, Debug, Clone)]
struct GlobalOptions {
    /// Path to configuration file
    #[arg(long, short = 'c', global = true, env = "DOCPATH_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// File of package identifiers, one per line (repeatable; stdin if omitted)
    #[arg(long, short = 'p', global = true, value_name = "FILE")]
    packages: Vec<PathBuf>,

    /// Worker threads used to index package files (0 = auto-detect)
    #[arg(long, short = 'j', global = true, env = "DOCPATH_JOBS")]
    jobs: Option<usize>,

    /// Log format (text, json)
    #[arg(long, global = true, value_parser = parse_log_format)]
    log_format: Option<LogFormat>,

    /// Extension of generated pages, overriding `links.extension`
    #[arg(long, global = true, value_name = "EXT")]
    extension: Option<String>,
}

/// Parse log format from string
fn parse_log_format(s: &str) -> Result<LogFormat, String> {
    s.parse().map_err(|e: docpath_config::ConfigError| e.to_string())
}

impl GlobalOptions {
    /// Convert global options to config overrides
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let log_level = if self.quiet {
            Some("error".to_string())
        } else if self.verbose {
            Some("debug".to_string())
        } else {
            None
        };

        ConfigOverrides {
            log_level,
            log_format: self.log_format,
            parallelism: self.jobs,
            extension: self.extension.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve the navigation steps between two packages
    Resolve(commands::resolve::ResolveArgs),

    /// Render the relative link from one package to another
    Link(commands::link::LinkArgs),

    /// Print the rooted package tree
    Tree(commands::tree::TreeArgs),

    /// Show package tree statistics
    Stats(commands::stats::StatsArgs),

    /// View and manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let (writer, ansi) = match logging.file {
        Some(ref path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi);

    match logging.format {
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = commands::load_config(&cli.global)?;
    init_logging(&config.logging)?;

    match cli.command {
        Commands::Resolve(args) => commands::resolve::execute(args, &cli.global, &config),
        Commands::Link(args) => commands::link::execute(args, &cli.global, &config),
        Commands::Tree(args) => commands::tree::execute(args, &cli.global, &config),
        Commands::Stats(args) => commands::stats::execute(args, &cli.global, &config),
        Commands::Config(cmd) => commands::config::execute(cmd, &cli.global, &config),
    }
}
