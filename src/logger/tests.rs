//! Tests for the logger configuration and file writer

use crate::logger::config::*;
use crate::logger::writer::RotatingFileWriter;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::fmt::MakeWriter;

fn file_config(path: PathBuf, max_size: u64, max_files: usize) -> FileConfig {
    FileConfig {
        enabled: true,
        path,
        append: true,
        format: LogFormat::Json,
        rotation: RotationConfig {
            max_size,
            max_files,
        },
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LoggerConfig::default();
        assert!(config.console.enabled);
        assert!(!config.file.enabled);
        assert_eq!(config.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_both_outputs_disabled_fails() {
        let mut config = LoggerConfig::default();
        config.console.enabled = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_level_parsing_is_case_insensitive() {
        let config = LoggerConfig {
            level: "WARN".to_string(),
            ..Default::default()
        };
        assert_eq!(config.parse_level().unwrap(), tracing::Level::WARN);
    }

    #[test]
    fn test_unknown_level_fails() {
        let config = LoggerConfig {
            level: "verbose".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_path_fails_only_when_enabled() {
        let mut file = FileConfig {
            path: PathBuf::new(),
            ..Default::default()
        };
        assert!(file.validate().is_ok());
        file.enabled = true;
        assert!(file.validate().is_err());
    }

    #[test]
    fn test_rotation_zero_values_fail() {
        assert!(RotationConfig::new(0, 5).is_err());
        assert!(RotationConfig::new(1024, 0).is_err());
        assert!(RotationConfig::new(1024, 5).is_ok());
    }

    #[test]
    fn test_logger_section_deserializes_with_defaults() {
        let config: LoggerConfig = toml::from_str(
            r#"
            level = "debug"

            [file]
            enabled = true
            format = "compact"

            [file.rotation]
            max_files = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.level, "debug");
        assert!(config.console.enabled);
        assert_eq!(config.file.format, LogFormat::Compact);
        assert_eq!(config.file.path, PathBuf::from("logs/event-management.log"));
        assert_eq!(config.file.rotation, RotationConfig::new(10 * 1024 * 1024, 2).unwrap());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_file_format_is_rejected() {
        let result = toml::from_str::<FileConfig>(r#"format = "pretty""#);
        assert!(result.is_err());
    }
}

mod writer_tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_writer_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/logs/app.log");
        let writer = RotatingFileWriter::new(&file_config(path.clone(), 1024, 3)).unwrap();

        let mut guard = writer.make_writer();
        guard.write_all(b"hello\n").unwrap();
        guard.flush().unwrap();
        drop(guard);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
        assert!(!writer.is_in_fallback_mode());
    }

    #[test]
    fn test_writer_rolls_over_after_max_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        let writer = RotatingFileWriter::new(&file_config(path.clone(), 8, 3)).unwrap();

        let mut guard = writer.make_writer();
        guard.write_all(b"0123456789\n").unwrap();
        guard.write_all(b"next\n").unwrap();
        guard.flush().unwrap();
        drop(guard);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "next\n");
        let rolled: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "app.log")
            .collect();
        assert_eq!(rolled.len(), 1);
        assert_eq!(
            std::fs::read_to_string(rolled[0].path()).unwrap(),
            "0123456789\n"
        );
    }

    #[test]
    fn test_truncate_mode_discards_previous_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "stale\n").unwrap();

        let mut config = file_config(path.clone(), 1024, 3);
        config.append = false;
        let writer = RotatingFileWriter::new(&config).unwrap();
        let mut guard = writer.make_writer();
        guard.write_all(b"fresh\n").unwrap();
        drop(guard);

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\n");
    }
}
