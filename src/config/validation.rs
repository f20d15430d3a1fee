//! Range checks run after the layers are merged and again after CLI
//! overrides are applied.

use crate::config::error::ConfigError;
use crate::config::settings::{DatabaseConfig, ServerConfig, Settings};

const DATABASE_SCHEMES: [&str; 2] = ["postgres://", "postgresql://"];

fn ensure(ok: bool, key: &'static str, reason: impl Into<String>) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, reason))
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            !self.host.is_empty() && !self.host.contains(char::is_whitespace),
            "server.host",
            format!("'{}' is not a bindable host", self.host),
        )?;
        ensure(self.port != 0, "server.port", "port 0 would bind a random port")?;
        ensure(
            self.request_timeout > 0,
            "server.request_timeout",
            "must be at least 1 second",
        )
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            !self.url.is_empty(),
            "database.url",
            "no connection URL configured; set it in a config file or EVENTS_DATABASE__URL",
        )?;
        ensure(
            DATABASE_SCHEMES.iter().any(|s| self.url.starts_with(s)),
            "database.url",
            "expected postgres://[user:password@]host[:port]/database",
        )?;
        ensure(
            self.min_connections > 0,
            "database.min_connections",
            "must be at least 1",
        )?;
        ensure(
            self.min_connections <= self.max_connections,
            "database.max_connections",
            format!(
                "{} is below min_connections ({})",
                self.max_connections, self.min_connections
            ),
        )?;
        ensure(
            self.connection_timeout > 0,
            "database.connection_timeout",
            "must be at least 1 second",
        )
    }
}

impl Settings {
    /// Returns the first out-of-range value, server first, then database,
    /// then logger.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
