//! Point-in-time copies of the redb file.

use crate::error::AppError;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

fn unix_timestamp_seconds(now: SystemTime) -> Result<u64, AppError> {
    now.duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .map_err(|err| {
            AppError::StorageMessage(format!(
                "Failed to compute backup timestamp from system clock: {}",
                err
            ))
        })
}

/// Copies the database file next to itself with a timestamp suffix.
///
/// Must run while no process holds the database open for writing.
pub struct BackupManager {
    file_path: PathBuf,
}

impl BackupManager {
    /// Create a backup manager for the database directory.
    pub fn new(db_dir: &str) -> Self {
        Self {
            file_path: super::redb_file_path(Path::new(db_dir)),
        }
    }

    /// Copy the database file to `<file>.backup.<unix-seconds>`.
    ///
    /// # Returns
    /// The backup path, or `None` if there is no database file yet.
    ///
    /// # Errors
    /// Returns an error if the clock is before the epoch or copying fails.
    pub fn create_backup(&self) -> Result<Option<PathBuf>, AppError> {
        self.create_backup_at(SystemTime::now())
    }

    fn create_backup_at(&self, now: SystemTime) -> Result<Option<PathBuf>, AppError> {
        if !self.file_path.exists() {
            return Ok(None);
        }
        let timestamp = unix_timestamp_seconds(now)?;
        let mut backup_name = self.file_path.clone().into_os_string();
        backup_name.push(format!(".backup.{}", timestamp));
        let backup_path = PathBuf::from(backup_name);

        std::fs::copy(&self.file_path, &backup_path).map_err(|err| {
            AppError::StorageMessage(format!(
                "Failed to copy {} to {}: {}",
                self.file_path.display(),
                backup_path.display(),
                err
            ))
        })?;
        tracing::info!("Created database backup at: {}", backup_path.display());
        Ok(Some(backup_path))
    }
}

#[cfg(test)]
mod tests {
    use super::BackupManager;
    use crate::Database;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    #[test]
    fn backup_is_none_before_first_open() {
        let dir = TempDir::new().expect("temp dir");
        let db_dir = dir.path().join("db");
        let manager = BackupManager::new(db_dir.to_str().expect("path"));
        assert!(manager.create_backup().expect("backup").is_none());
    }

    #[test]
    fn backup_copies_database_file_with_timestamp_suffix() {
        let dir = TempDir::new().expect("temp dir");
        let db_dir = dir.path().join("db");
        let db_dir_str = db_dir.to_str().expect("path");
        drop(Database::new(db_dir_str).expect("create db"));

        let manager = BackupManager::new(db_dir_str);
        let backup = manager
            .create_backup_at(UNIX_EPOCH + Duration::from_secs(1_700_000_000))
            .expect("backup")
            .expect("backup path");
        assert!(backup.exists());
        assert!(backup
            .to_string_lossy()
            .ends_with("data.redb.backup.1700000000"));
    }
}
