//! Typed configuration sections
//!
//! Every section falls back to its `Default` field by field, so a TOML file
//! only needs the keys it changes.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::environment::Environment;
use crate::logger::LoggerConfig;

/// Complete application settings, loaded by `ConfigLoader`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub application: ApplicationConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logger: LoggerConfig,

    /// Overlay the settings were loaded for; not read from any file
    #[serde(skip)]
    pub environment: Environment,
}

/// Name and version reported in startup logs and `/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub name: String,
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: "event-management".to_string(),
            version: crate::pkg_version().to_string(),
        }
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds before an unfinished request is answered with 408
    pub request_timeout: u64,
}

impl ServerConfig {
    /// `host:port` for `TcpListener::bind`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout: 30,
        }
    }
}

/// PostgreSQL connection pool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `postgres://` connection URL; there is no usable default
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection
    pub connection_timeout: u64,
    /// Apply pending migrations when `serve` starts
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connection_timeout: 30,
            auto_migrate: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::{ConsoleConfig, FileConfig, LogFormat, RotationConfig};
    use proptest::prelude::*;

    fn arb_server_config() -> impl Strategy<Value = ServerConfig> {
        (
            prop_oneof![Just("127.0.0.1"), Just("0.0.0.0"), Just("::1")],
            1u16..=65535u16,
            1u64..=300u64,
        )
            .prop_map(|(host, port, request_timeout)| ServerConfig {
                host: host.to_string(),
                port,
                request_timeout,
            })
    }

    fn arb_database_config() -> impl Strategy<Value = DatabaseConfig> {
        (
            prop_oneof![
                Just("postgres://localhost/events"),
                Just("postgresql://user:pass@db:5432/events"),
            ],
            1u32..=100u32,
            1u32..=10u32,
            1u64..=120u64,
            any::<bool>(),
        )
            .prop_map(
                |(url, max_connections, min_connections, connection_timeout, auto_migrate)| {
                    DatabaseConfig {
                        url: url.to_string(),
                        max_connections,
                        min_connections: min_connections.min(max_connections),
                        connection_timeout,
                        auto_migrate,
                    }
                },
            )
    }

    fn arb_logger_config() -> impl Strategy<Value = LoggerConfig> {
        (
            prop_oneof![Just("trace"), Just("debug"), Just("info"), Just("warn"), Just("error")],
            any::<bool>(),
            any::<bool>(),
            prop_oneof![Just(LogFormat::Full), Just(LogFormat::Compact), Just(LogFormat::Json)],
            1024u64..=100_000_000u64,
            1usize..=20usize,
        )
            .prop_map(
                |(level, colored, file_enabled, format, max_size, max_files)| LoggerConfig {
                    level: level.to_string(),
                    console: ConsoleConfig {
                        enabled: true,
                        colored,
                    },
                    file: FileConfig {
                        enabled: file_enabled,
                        format,
                        rotation: RotationConfig {
                            max_size,
                            max_files,
                        },
                        ..Default::default()
                    },
                },
            )
    }

    fn arb_settings() -> impl Strategy<Value = Settings> {
        (
            "[a-z][a-z0-9-]{0,20}",
            arb_server_config(),
            arb_database_config(),
            arb_logger_config(),
        )
            .prop_map(|(name, server, database, logger)| Settings {
                application: ApplicationConfig {
                    name,
                    version: "1.2.3".to_string(),
                },
                server,
                database,
                logger,
                environment: Environment::default(),
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_settings_round_trip_through_toml(settings in arb_settings()) {
            let toml_str = toml::to_string(&settings).unwrap();
            let deserialized: Settings = toml::from_str(&toml_str).unwrap();
            prop_assert_eq!(settings, deserialized);
        }

        #[test]
        fn prop_generated_settings_validate(settings in arb_settings()) {
            prop_assert!(settings.validate().is_ok());
        }
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.application.name, "event-management");
        assert_eq!(settings.application.version, crate::pkg_version());
        assert_eq!(settings.server.address(), "127.0.0.1:8080");
        assert_eq!(settings.server.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.database.max_connections, 10);
        assert!(settings.database.url.is_empty());
        assert_eq!(settings.logger.level, "info");
        assert_eq!(settings.environment, Environment::Development);
    }

    #[test]
    fn test_partial_sections_keep_field_defaults() {
        let settings: Settings = toml::from_str(
            r#"
            [server]
            port = 9090

            [database]
            url = "postgres://localhost/events"
            auto_migrate = true

            [logger.file]
            enabled = true
            format = "compact"
            "#,
        )
        .unwrap();

        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.request_timeout, 30);
        assert!(settings.database.auto_migrate);
        assert_eq!(settings.database.min_connections, 1);
        assert!(settings.logger.console.enabled);
        assert_eq!(settings.logger.file.format, LogFormat::Compact);
        assert_eq!(settings.logger.file.rotation.max_files, 5);
        assert_eq!(settings.application.name, "event-management");
    }
}
