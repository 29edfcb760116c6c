//! User storage backed by redb.

use crate::db::paste::deserialize_user;
use crate::db::tables::{USERS, USERS_BY_EMAIL};
use crate::error::AppError;
use crate::models::User;
use crate::store::duplicate_email;
use redb::{ReadableDatabase, ReadableTable};
use std::sync::Arc;

/// Accessor for user tables.
pub struct UserDb {
    db: Arc<redb::Database>,
}

impl UserDb {
    /// Initialize user tables if they do not exist yet.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(USERS)?;
        write_txn.open_table(USERS_BY_EMAIL)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Insert a user and claim its email in one transaction.
    ///
    /// # Errors
    /// Returns [`AppError::Conflict`] when the email is taken, or a storage
    /// error when the id already exists or redb fails.
    pub fn create(&self, user: &User) -> Result<(), AppError> {
        let encoded = bincode::serialize(user)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut users = write_txn.open_table(USERS)?;
            let mut by_email = write_txn.open_table(USERS_BY_EMAIL)?;

            if by_email.get(user.email.as_str())?.is_some() {
                return Err(duplicate_email(&user.email));
            }
            if users.get(user.id.as_str())?.is_some() {
                return Err(AppError::StorageMessage(format!(
                    "User id '{}' already exists",
                    user.id
                )));
            }

            users.insert(user.id.as_str(), encoded.as_slice())?;
            by_email.insert(user.email.as_str(), user.id.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Fetch a user by id.
    pub fn get(&self, id: &str) -> Result<Option<User>, AppError> {
        let read_txn = self.db.begin_read()?;
        let users = read_txn.open_table(USERS)?;
        match users.get(id)? {
            Some(value) => Ok(Some(deserialize_user(value.value())?)),
            None => Ok(None),
        }
    }

    /// Fetch a user by exact (already normalized) email.
    pub fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let read_txn = self.db.begin_read()?;
        let by_email = read_txn.open_table(USERS_BY_EMAIL)?;
        let users = read_txn.open_table(USERS)?;
        let Some(id_guard) = by_email.get(email)? else {
            return Ok(None);
        };
        match users.get(id_guard.value())? {
            Some(value) => Ok(Some(deserialize_user(value.value())?)),
            None => {
                tracing::warn!("Email index points at missing user for {}", email);
                Ok(None)
            }
        }
    }
}
