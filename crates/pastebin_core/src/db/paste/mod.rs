//! Paste storage operations backed by redb.

mod helpers;

use crate::db::tables::{PASTES, PASTES_BY_CREATED, USERS};
use crate::error::AppError;
use crate::models::{Paste, PasteWithAuthor};
use crate::store::{duplicate_paste_id, reverse_timestamp_key, PublicFilter, PublicSlice};
use redb::{ReadableDatabase, ReadableTable, ReadableTableMetadata};
use std::sync::Arc;

use self::helpers::join_author;

pub(crate) use self::helpers::{deserialize_paste, deserialize_user};

/// Accessor for paste-related redb tables.
pub struct PasteDb {
    db: Arc<redb::Database>,
}

impl PasteDb {
    /// Initialize paste tables if they do not exist yet.
    ///
    /// # Returns
    /// A new [`PasteDb`] accessor bound to `db`.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(PASTES)?;
        write_txn.open_table(PASTES_BY_CREATED)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Insert a new paste row and its recency index entry atomically.
    ///
    /// # Errors
    /// Returns an error when serialization fails, the id already exists, or
    /// storage operations fail.
    pub fn create(&self, paste: &Paste) -> Result<(), AppError> {
        let encoded = bincode::serialize(paste)?;
        let recency_key = reverse_timestamp_key(paste.created_at);

        let write_txn = self.db.begin_write()?;
        {
            let mut pastes = write_txn.open_table(PASTES)?;
            let mut created = write_txn.open_table(PASTES_BY_CREATED)?;

            if pastes.get(paste.id.as_str())?.is_some() {
                return Err(duplicate_paste_id(&paste.id));
            }

            pastes.insert(paste.id.as_str(), encoded.as_slice())?;
            created.insert((recency_key, paste.id.as_str()), ())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Fetch a paste by id.
    ///
    /// # Returns
    /// `Ok(Some(paste))` when found, `Ok(None)` when missing.
    pub fn get(&self, id: &str) -> Result<Option<Paste>, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        match pastes.get(id)? {
            Some(value) => Ok(Some(deserialize_paste(value.value())?)),
            None => Ok(None),
        }
    }

    /// Fetch a paste joined with its author's `{id, name}`.
    pub fn get_with_author(&self, id: &str) -> Result<Option<PasteWithAuthor>, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        let users = read_txn.open_table(USERS)?;
        let Some(value) = pastes.get(id)? else {
            return Ok(None);
        };
        let paste = deserialize_paste(value.value())?;
        Ok(Some(join_author(&users, paste)?))
    }

    /// Read-modify-write a single row inside one write transaction.
    ///
    /// redb serializes write transactions, so concurrent callers never lose
    /// each other's updates.
    fn modify<F>(&self, id: &str, apply: F) -> Result<Option<Paste>, AppError>
    where
        F: FnOnce(&mut Paste),
    {
        let write_txn = self.db.begin_write()?;
        let updated = {
            let mut pastes = write_txn.open_table(PASTES)?;
            let Some(guard) = pastes.get(id)? else {
                return Ok(None);
            };
            let mut paste = deserialize_paste(guard.value())?;
            drop(guard);

            apply(&mut paste);
            let encoded = bincode::serialize(&paste)?;
            pastes.insert(id, encoded.as_slice())?;
            paste
        };
        write_txn.commit()?;
        Ok(Some(updated))
    }

    /// Add one to the view counter.
    ///
    /// # Returns
    /// `false` when the paste does not exist.
    pub fn increment_views(&self, id: &str) -> Result<bool, AppError> {
        let updated = self.modify(id, |paste| paste.views = paste.views.saturating_add(1))?;
        Ok(updated.is_some())
    }

    /// Flip the visibility flag.
    ///
    /// # Returns
    /// The updated row, or `None` when missing.
    pub fn toggle_visibility(&self, id: &str) -> Result<Option<Paste>, AppError> {
        self.modify(id, |paste| paste.is_public = !paste.is_public)
    }

    /// Delete a paste and its index entry.
    ///
    /// # Returns
    /// `true` when a row was deleted, `false` when it was already gone.
    pub fn delete(&self, id: &str) -> Result<bool, AppError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut pastes = write_txn.open_table(PASTES)?;
            let mut created = write_txn.open_table(PASTES_BY_CREATED)?;

            let Some(guard) = pastes.get(id)? else {
                return Ok(false);
            };
            let paste = deserialize_paste(guard.value())?;
            drop(guard);

            let _ = created.remove((reverse_timestamp_key(paste.created_at), id))?;
            let _ = pastes.remove(id)?;
        }
        write_txn.commit()?;
        Ok(true)
    }

    /// Walk rows newest-first, invoking `visit` until it returns `false`.
    fn scan_newest_first<F>(&self, mut visit: F) -> Result<(), AppError>
    where
        F: FnMut(Paste, &redb::ReadOnlyTable<&'static str, &'static [u8]>) -> Result<bool, AppError>,
    {
        let read_txn = self.db.begin_read()?;
        let created = read_txn.open_table(PASTES_BY_CREATED)?;
        let pastes = read_txn.open_table(PASTES)?;
        let users = read_txn.open_table(USERS)?;

        for item in created.iter()? {
            let (key, _) = item?;
            let (_, paste_id) = key.value();
            let Some(guard) = pastes.get(paste_id)? else {
                continue;
            };
            let paste = deserialize_paste(guard.value())?;
            if !visit(paste, &users)? {
                break;
            }
        }
        Ok(())
    }

    /// Newest-first window over public, unexpired rows matching `filter`.
    ///
    /// Counting and windowing happen in the same read transaction, so `total`
    /// is consistent with the returned rows.
    pub fn query_public(
        &self,
        filter: PublicFilter<'_>,
        offset: usize,
        limit: usize,
    ) -> Result<PublicSlice, AppError> {
        let mut slice = PublicSlice::default();
        let mut position = 0usize;
        self.scan_newest_first(|paste, users| {
            if !filter.matches(&paste) {
                return Ok(true);
            }
            if position >= offset && slice.pastes.len() < limit {
                slice.pastes.push(join_author(users, paste)?);
            }
            position += 1;
            slice.total += 1;
            Ok(true)
        })?;
        Ok(slice)
    }

    /// Every paste by `author_id`, newest first, regardless of visibility or expiry.
    pub fn list_by_author(&self, author_id: &str) -> Result<Vec<PasteWithAuthor>, AppError> {
        let mut owned = Vec::new();
        self.scan_newest_first(|paste, users| {
            if paste.author_id.as_deref() == Some(author_id) {
                owned.push(join_author(users, paste)?);
            }
            Ok(true)
        })?;
        Ok(owned)
    }

    /// Number of canonical rows, including expired ones not yet evicted.
    pub fn len(&self) -> Result<u64, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        Ok(pastes.len()?)
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.len()? == 0)
    }
}
