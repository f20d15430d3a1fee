//! Size-based file rotation for the logger

use crate::logger::config::RotationConfig;
use crate::logger::error::LoggerError;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Decides when the active log file rolls over and prunes old files.
///
/// Rolled files are named `{stem}.{YYYYmmdd_HHMMSS_mmm}.{ext}` next to the
/// active file.
pub struct RotationManager {
    config: RotationConfig,
}

impl RotationManager {
    pub fn new(config: RotationConfig) -> Self {
        Self { config }
    }

    pub fn should_rotate(&self, current_file_size: u64) -> bool {
        current_file_size >= self.config.max_size
    }

    /// Renames the active file aside and prunes rolled files beyond `max_files`.
    pub fn rotate(&self, current_path: &Path) -> Result<(), LoggerError> {
        if current_path.exists() {
            let rotated_path = rotated_path_for(current_path);
            fs::rename(current_path, &rotated_path).map_err(|e| {
                LoggerError::rotation(format!(
                    "Failed to rename {} to {}: {}",
                    current_path.display(),
                    rotated_path.display(),
                    e
                ))
            })?;
        }

        self.cleanup_old_files(current_path)
    }

    fn cleanup_old_files(&self, base_path: &Path) -> Result<(), LoggerError> {
        let mut rotated = rotated_files(base_path)?;
        if rotated.len() <= self.config.max_files {
            return Ok(());
        }

        rotated.sort_by_key(|path| fs::metadata(path).and_then(|m| m.modified()).ok());
        let excess = rotated.len() - self.config.max_files;
        for oldest in rotated.into_iter().take(excess) {
            fs::remove_file(&oldest)?;
        }
        Ok(())
    }
}

fn rotated_path_for(base_path: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S_%3f");
    let stem = base_path.file_stem().unwrap_or_default().to_string_lossy();
    let ext = base_path.extension().map(|e| e.to_string_lossy());

    let mut attempt = 0u32;
    loop {
        let suffix = if attempt == 0 {
            timestamp.to_string()
        } else {
            format!("{}_{}", timestamp, attempt)
        };
        let name = match &ext {
            Some(ext) => format!("{}.{}.{}", stem, suffix, ext),
            None => format!("{}.{}", stem, suffix),
        };
        let candidate = base_path.with_file_name(name);
        if !candidate.exists() {
            return candidate;
        }
        attempt += 1;
    }
}

/// Lists rolled files belonging to `base_path`, excluding the active file.
fn rotated_files(base_path: &Path) -> Result<Vec<PathBuf>, LoggerError> {
    let parent = match base_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let prefix = format!(
        "{}.",
        base_path.file_stem().unwrap_or_default().to_string_lossy()
    );
    let active = base_path.file_name();

    Ok(fs::read_dir(parent)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name() != active
                && path
                    .file_name()
                    .map(|n| n.to_string_lossy().starts_with(&prefix))
                    .unwrap_or(false)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn manager(max_size: u64, max_files: usize) -> RotationManager {
        RotationManager::new(RotationConfig {
            max_size,
            max_files,
        })
    }

    #[test]
    fn test_should_rotate_by_size() {
        let manager = manager(1024, 5);
        assert!(!manager.should_rotate(512));
        assert!(!manager.should_rotate(1023));
        assert!(manager.should_rotate(1024));
        assert!(manager.should_rotate(2048));
    }

    #[test]
    fn test_rotate_moves_active_file_aside() {
        let dir = tempdir().unwrap();
        let base_path = dir.path().join("events.log");
        fs::write(&base_path, "old content").unwrap();

        manager(10, 3).rotate(&base_path).unwrap();

        assert!(!base_path.exists());
        let rotated = rotated_files(&base_path).unwrap();
        assert_eq!(rotated.len(), 1);
        assert_eq!(fs::read_to_string(&rotated[0]).unwrap(), "old content");
        let name = rotated[0].file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("events.") && name.ends_with(".log"));
    }

    #[test]
    fn test_rotated_files_ignores_other_logs() {
        let dir = tempdir().unwrap();
        let base_path = dir.path().join("events.log");
        fs::write(&base_path, "").unwrap();
        fs::write(dir.path().join("events.20260101_000000_000.log"), "").unwrap();
        fs::write(dir.path().join("access.log"), "").unwrap();
        fs::write(dir.path().join("events_backup.log"), "").unwrap();

        assert_eq!(rotated_files(&base_path).unwrap().len(), 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_rotation_triggers_at_max_size(
            current_size in 0u64..10_000_000u64,
            max_size in 1u64..10_000_000u64
        ) {
            prop_assert_eq!(
                manager(max_size, 5).should_rotate(current_size),
                current_size >= max_size
            );
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(25))]

        #[test]
        fn prop_rotation_keeps_at_most_max_files(
            max_files in 1usize..8usize,
            initial_file_count in 0usize..12usize
        ) {
            let dir = tempdir().unwrap();
            let base_path = dir.path().join("app.log");
            let now = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_secs() as i64;

            for i in 0..initial_file_count {
                let rotated_path = dir.path().join(format!("app.2025010{}_000000_{:03}.log", i % 9, i));
                let mut file = fs::File::create(&rotated_path).unwrap();
                writeln!(file, "content {}", i).unwrap();
                let mtime = filetime::FileTime::from_unix_time(now - (initial_file_count - i) as i64 * 60, 0);
                filetime::set_file_mtime(&rotated_path, mtime).unwrap();
            }
            fs::write(&base_path, "current").unwrap();

            manager(100, max_files).rotate(&base_path).unwrap();

            let remaining = rotated_files(&base_path).unwrap();
            prop_assert_eq!(remaining.len(), (initial_file_count + 1).min(max_files));
            prop_assert!(remaining.iter().any(|p| fs::read_to_string(p).unwrap() == "current"));
        }
    }
}
