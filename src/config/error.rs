//! Errors raised while assembling `Settings`.

use std::path::PathBuf;

use thiserror::Error;

use crate::logger::LoggerError;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// `default.toml` in layered mode, or the file given by `--config`
    #[error("Required configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("{dir_var} and {file_var} cannot both be set")]
    ConflictingSources {
        dir_var: &'static str,
        file_var: &'static str,
    },

    #[error("Unknown environment '{0}'. Valid values are: development, test, staging, production")]
    UnknownEnvironment(String),

    /// A value that parsed but is out of range; `key` is the dotted TOML path
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    /// Reading a source or deserializing the merged tree failed
    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }

    /// Dotted key of an out-of-range value, if that is what failed.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Self::Invalid { key, .. } => Some(key),
            _ => None,
        }
    }
}

impl From<LoggerError> for ConfigError {
    fn from(err: LoggerError) -> Self {
        Self::invalid("logger", err.to_string())
    }
}
