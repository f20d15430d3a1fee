//! Deployment environment, selecting `config/{environment}.toml`.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;

/// Read from `EVENTS_APP_ENV` or `--env`; also accepts `dev`, `stage`, `prod`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    #[value(alias = "dev")]
    Development,
    Test,
    #[value(alias = "stage")]
    Staging,
    #[value(alias = "prod")]
    Production,
}

impl Environment {
    pub const ENV_VAR: &'static str = "EVENTS_APP_ENV";

    /// `Development` when the variable is unset; an unknown name is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        std::env::var(Self::ENV_VAR).map_or(Ok(Self::default()), |value| value.parse())
    }

    /// File stem of the environment overlay inside the config directory.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s.trim(), true)
            .map_err(|_| ConfigError::UnknownEnvironment(s.to_string()))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_and_case_are_accepted() {
        for (input, expected) in [
            ("dev", Environment::Development),
            ("Stage", Environment::Staging),
            ("PROD", Environment::Production),
            (" test ", Environment::Test),
        ] {
            assert_eq!(input.parse::<Environment>().unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn test_unknown_name_is_reported() {
        match "qa".parse::<Environment>() {
            Err(ConfigError::UnknownEnvironment(name)) => assert_eq!(name, "qa"),
            other => panic!("Expected UnknownEnvironment, got {:?}", other),
        }
    }

    #[test]
    fn test_overlay_file_stem() {
        assert_eq!(Environment::Staging.to_string(), "staging");
        assert_eq!(Environment::default().as_str(), "development");
    }
}
