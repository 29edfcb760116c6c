//! redb storage layer for pastes and users.

/// Backup utilities.
pub mod backup;
/// Paste storage helpers.
pub mod paste;
/// redb table definitions.
pub mod tables;
/// User storage helpers.
pub mod user;

use crate::error::AppError;
use crate::models::{Paste, PasteWithAuthor, User};
use crate::store::{PasteStore, PublicFilter, PublicSlice, UserDirectory};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Path of the redb file inside the configured database directory.
pub fn redb_file_path(db_dir: &Path) -> PathBuf {
    db_dir.join(tables::REDB_FILE_NAME)
}

/// Database handle with access to the paste and user tables.
///
/// Open once per process and share via [`Database::share`] or an `Arc`.
pub struct Database {
    pub db: Arc<redb::Database>,
    pub pastes: paste::PasteDb,
    pub users: user::UserDb,
}

impl Database {
    /// Build a database handle from an existing shared redb instance.
    ///
    /// # Errors
    /// Returns an error if table initialization fails.
    pub fn from_shared(db: Arc<redb::Database>) -> Result<Self, AppError> {
        Ok(Self {
            pastes: paste::PasteDb::new(db.clone())?,
            users: user::UserDb::new(db.clone())?,
            db,
        })
    }

    /// Clone this handle for another subsystem in the same process.
    ///
    /// This avoids a second open of the same file, which redb rejects.
    ///
    /// # Errors
    /// Returns an error if table initialization fails.
    pub fn share(&self) -> Result<Self, AppError> {
        Self::from_shared(self.db.clone())
    }

    /// Open (or create) the database under `path` and initialize tables.
    ///
    /// `path` is a directory; the redb file lives inside it.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the file is held
    /// by another process, or redb fails to open it.
    pub fn new(path: &str) -> Result<Self, AppError> {
        let dir = Path::new(path);
        std::fs::create_dir_all(dir).map_err(|err| {
            AppError::StorageMessage(format!(
                "Failed to create database directory {}: {}",
                dir.display(),
                err
            ))
        })?;

        let file = redb_file_path(dir);
        let db = match redb::Database::create(&file) {
            Ok(db) => Arc::new(db),
            Err(redb::DatabaseError::DatabaseAlreadyOpen) => {
                return Err(AppError::StorageMessage(format!(
                    "Database at {} is already open in another process.\n\
                    Stop the other pastebin server, or set DB_PATH to a different location.",
                    file.display()
                )));
            }
            Err(err) => return Err(err.into()),
        };
        tracing::debug!("Opened database at {}", file.display());

        Self::from_shared(db)
    }
}

impl PasteStore for Database {
    fn insert_paste(&self, paste: &Paste) -> Result<(), AppError> {
        self.pastes.create(paste)
    }

    fn find_paste(&self, id: &str) -> Result<Option<Paste>, AppError> {
        self.pastes.get(id)
    }

    fn find_paste_with_author(&self, id: &str) -> Result<Option<PasteWithAuthor>, AppError> {
        self.pastes.get_with_author(id)
    }

    fn delete_paste(&self, id: &str) -> Result<bool, AppError> {
        self.pastes.delete(id)
    }

    fn increment_views(&self, id: &str) -> Result<bool, AppError> {
        self.pastes.increment_views(id)
    }

    fn toggle_visibility(&self, id: &str) -> Result<Option<Paste>, AppError> {
        self.pastes.toggle_visibility(id)
    }

    fn query_public(
        &self,
        filter: PublicFilter<'_>,
        offset: usize,
        limit: usize,
    ) -> Result<PublicSlice, AppError> {
        self.pastes.query_public(filter, offset, limit)
    }

    fn list_by_author(&self, author_id: &str) -> Result<Vec<PasteWithAuthor>, AppError> {
        self.pastes.list_by_author(author_id)
    }
}

impl UserDirectory for Database {
    fn insert_user(&self, user: &User) -> Result<(), AppError> {
        self.users.create(user)
    }

    fn find_user(&self, id: &str) -> Result<Option<User>, AppError> {
        self.users.get(id)
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.users.get_by_email(email)
    }
}

#[cfg(test)]
mod tests;
