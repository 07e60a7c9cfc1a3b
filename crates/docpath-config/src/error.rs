//! Errors raised while reading, validating and writing DocPath config files.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Filesystem operation that failed on a config path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    Read,
    Write,
    CreateDir,
}

impl fmt::Display for FileOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
            Self::CreateDir => write!(f, "create directory"),
        }
    }
}

/// Errors produced by `ConfigLoader` and config validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A config file or directory could not be accessed
    #[error("cannot {op} {path}: {source}")]
    Io {
        op: FileOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config file is not valid TOML or has mistyped keys
    #[error("{path} is not a valid docpath config: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The effective config could not be rendered back to TOML
    #[error("cannot render config as TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// `~/.docpath` has no home directory to live in
    #[error("no home directory, the global config ~/.docpath/config.toml is unavailable")]
    NoHomeDir,

    /// A setting holds a value links or logging cannot use
    #[error("bad value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// `--log-format` or `logging.format` named an unsupported format
    #[error("unknown log format '{0}' (expected text or json)")]
    UnknownLogFormat(String),
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::io(FileOp::Read, path, source)
    }

    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::io(FileOp::Write, path, source)
    }

    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::io(FileOp::CreateDir, path, source)
    }

    pub fn parse_toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    /// A setting rejected by validation, `key` in dotted `section.field` form.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }

    fn io(op: FileOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}
