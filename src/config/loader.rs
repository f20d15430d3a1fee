//! Builds `Settings` from TOML files and `EVENTS_*` variables.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_VAR: &str = "EVENTS_CONFIG_DIR";
const CONFIG_FILE_VAR: &str = "EVENTS_CONFIG_FILE";
const DEFAULT_CONFIG_DIR: &str = "config";

/// `EVENTS_DATABASE__URL` becomes `database.url`
const ENV_PREFIX: &str = "EVENTS";
const ENV_SEPARATOR: &str = "__";

/// Where the TOML layers come from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source {
    /// `default.toml` (required), `{environment}.toml`, then `local.toml`
    Layered(PathBuf),
    /// One file, no overlays
    Single(PathBuf),
}

/// Loads configuration with this precedence, lowest first:
/// 1. `default.toml` (required)
/// 2. `{environment}.toml`
/// 3. `local.toml`
/// 4. `EVENTS_*` environment variables
///
/// `EVENTS_CONFIG_FILE` or `--config` replaces steps 1-3 with a single file.
#[derive(Debug)]
pub struct ConfigLoader {
    source: Source,
    environment: Environment,
}

impl ConfigLoader {
    /// Reads `EVENTS_CONFIG_DIR`, `EVENTS_CONFIG_FILE` and `EVENTS_APP_ENV`.
    ///
    /// # Errors
    /// Returns `ConflictingSources` when both the directory and the file
    /// variables are set, and `UnknownEnvironment` for a bad `EVENTS_APP_ENV`.
    pub fn new() -> Result<Self, ConfigError> {
        let dir = std::env::var_os(CONFIG_DIR_VAR).map(PathBuf::from);
        let file = std::env::var_os(CONFIG_FILE_VAR).map(PathBuf::from);

        let source = match (dir, file) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::ConflictingSources {
                    dir_var: CONFIG_DIR_VAR,
                    file_var: CONFIG_FILE_VAR,
                });
            }
            (_, Some(file)) => Source::Single(file),
            (dir, None) => {
                Source::Layered(dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)))
            }
        };

        Ok(Self {
            source,
            environment: Environment::from_env()?,
        })
    }

    /// Loads only `path`, as if `EVENTS_CONFIG_FILE` were set.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Source::Single(path.into());
        self
    }

    /// Selects `{environment}.toml`, overriding `EVENTS_APP_ENV`.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Merges every source, deserializes and validates.
    ///
    /// # Errors
    /// - `MissingFile` when `default.toml` or the single file is absent
    /// - `Source` when a file cannot be parsed or a value has the wrong type
    /// - `Invalid` when a merged value is out of range
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let mut settings: Settings = self
            .file_layers()?
            .add_source(env_layer())
            .build()?
            .try_deserialize()?;
        settings.environment = self.environment;
        settings.validate()?;
        Ok(settings)
    }

    fn file_layers(&self) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder = Config::builder();
        match &self.source {
            Source::Single(path) => Ok(builder.add_source(toml_file(path, true)?)),
            Source::Layered(dir) => {
                let overlays = [format!("{}.toml", self.environment), "local.toml".to_string()];
                overlays.iter().try_fold(
                    builder.add_source(toml_file(&dir.join("default.toml"), true)?),
                    |builder, name| -> Result<_, ConfigError> {
                        Ok(builder.add_source(toml_file(&dir.join(name), false)?))
                    },
                )
            }
        }
    }
}

fn toml_file(
    path: &Path,
    required: bool,
) -> Result<File<config::FileSourceFile, FileFormat>, ConfigError> {
    if required && !path.is_file() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }
    Ok(File::from(path).format(FileFormat::Toml).required(required))
}

fn env_layer() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator(ENV_SEPARATOR)
        .ignore_empty(true)
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Loader tests mutate process-wide env vars
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    const BASE_CONFIG: &str = r#"
[application]
name = "events-under-test"
version = "1.0.0"

[server]
port = 3000

[database]
url = "postgres://localhost/events_test"
"#;

    fn config_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    /// Clears the loader variables and restores every touched one on drop
    struct EnvGuard {
        saved: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            let mut guard = Self { saved: Vec::new() };
            for key in [CONFIG_DIR_VAR, CONFIG_FILE_VAR, Environment::ENV_VAR] {
                guard.apply(key, None);
            }
            guard
        }

        fn set(&mut self, key: &str, value: &str) {
            self.apply(key, Some(value));
        }

        fn apply(&mut self, key: &str, value: Option<&str>) {
            self.saved.push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in self.saved.iter().rev() {
                unsafe {
                    match value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    fn load_from(dir: &TempDir, env: &mut EnvGuard) -> Result<Settings, ConfigError> {
        env.set(CONFIG_DIR_VAR, dir.path().to_str().unwrap());
        ConfigLoader::new()?.load()
    }

    #[test]
    fn test_defaults_to_layered_config_dir() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::new();

        let loader = ConfigLoader::new().unwrap();
        assert_eq!(loader.source, Source::Layered(PathBuf::from("config")));
        assert_eq!(loader.environment(), Environment::Development);
    }

    #[test]
    fn test_dir_and_file_variables_conflict() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_VAR, "/etc/events");
        env.set(CONFIG_FILE_VAR, "/etc/events/production.toml");

        let err = ConfigLoader::new().unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingSources { .. }));
        assert!(err.to_string().contains("EVENTS_CONFIG_DIR"));
    }

    #[test]
    fn test_unknown_app_env_is_an_error() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.set(Environment::ENV_VAR, "qa");

        assert!(matches!(
            ConfigLoader::new(),
            Err(ConfigError::UnknownEnvironment(name)) if name == "qa"
        ));
    }

    #[test]
    fn test_missing_default_toml() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let dir = config_dir(&[]);

        match load_from(&dir, &mut env) {
            Err(ConfigError::MissingFile(path)) => assert!(path.ends_with("default.toml")),
            other => panic!("Expected MissingFile, got {:?}", other),
        }
    }

    #[test]
    fn test_layer_precedence() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let dir = config_dir(&[
            ("default.toml", BASE_CONFIG),
            (
                "development.toml",
                "[application]\nname = \"events-dev\"\n[server]\nport = 3001\n",
            ),
            ("local.toml", "[server]\nport = 3002\n[database]\nmax_connections = 3\n"),
        ]);
        env.set("EVENTS_SERVER__PORT", "3003");

        let settings = load_from(&dir, &mut env).unwrap();
        assert_eq!(settings.server.port, 3003);
        assert_eq!(settings.database.max_connections, 3);
        assert_eq!(settings.application.name, "events-dev");
        assert_eq!(settings.application.version, "1.0.0");
        assert_eq!(settings.environment, Environment::Development);
    }

    #[test]
    fn test_environment_overlay_is_optional() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let dir = config_dir(&[("default.toml", BASE_CONFIG)]);
        env.set(Environment::ENV_VAR, "staging");

        let settings = load_from(&dir, &mut env).unwrap();
        assert_eq!(settings.environment, Environment::Staging);
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_env_variable_is_validated() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let dir = config_dir(&[("default.toml", BASE_CONFIG)]);
        env.set("EVENTS_DATABASE__URL", "mysql://localhost/events");

        let err = load_from(&dir, &mut env).unwrap_err();
        assert_eq!(err.key(), Some("database.url"));
    }

    #[test]
    fn test_builder_overrides_environment_and_file() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        let dir = config_dir(&[
            ("default.toml", BASE_CONFIG),
            ("test.toml", "[server]\nport = 4100\n"),
            ("single.toml", "[database]\nurl = \"postgres://single/events\"\n"),
        ]);
        env.set(CONFIG_DIR_VAR, dir.path().to_str().unwrap());

        let layered = ConfigLoader::new()
            .unwrap()
            .with_environment(Environment::Test)
            .load()
            .unwrap();
        assert_eq!(layered.server.port, 4100);
        assert_eq!(layered.environment, Environment::Test);

        let single = ConfigLoader::new()
            .unwrap()
            .with_config_file(dir.path().join("single.toml"))
            .load()
            .unwrap();
        assert_eq!(single.database.url, "postgres://single/events");
        assert_eq!(single.server.port, 8080);
    }
}
