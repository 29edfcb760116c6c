//! Storage seam for the lifecycle service.
//!
//! [`crate::Database`] is the durable implementation; [`MemoryStore`] backs
//! tests and embedders that do not need persistence.

mod memory;

pub use memory::MemoryStore;

use crate::error::AppError;
use crate::models::{Paste, PasteWithAuthor, User};
use chrono::{DateTime, Utc};

/// Visibility/expiry filter shared by public listing and search.
#[derive(Debug, Clone, Copy)]
pub struct PublicFilter<'a> {
    /// Reference instant for the expiry check.
    pub now: DateTime<Utc>,
    /// Substring that must appear in the title or the content.
    pub contains: Option<&'a str>,
}

impl<'a> PublicFilter<'a> {
    /// Filter for the recent-pastes listing.
    pub fn recent(now: DateTime<Utc>) -> Self {
        Self {
            now,
            contains: None,
        }
    }

    /// Filter for a text search.
    pub fn search(now: DateTime<Utc>, query: &'a str) -> Self {
        Self {
            now,
            contains: Some(query),
        }
    }

    /// Whether `paste` is public, unexpired and matches the search text.
    ///
    /// Matching is a case-sensitive substring test.
    pub fn matches(&self, paste: &Paste) -> bool {
        if !paste.is_public || !paste.is_live_at(self.now) {
            return false;
        }
        match self.contains {
            None => true,
            Some(needle) => paste.title.contains(needle) || paste.content.contains(needle),
        }
    }
}

/// One window of a filtered listing plus the unwindowed match count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicSlice {
    pub pastes: Vec<PasteWithAuthor>,
    pub total: u64,
}

/// Paste persistence operations used by [`crate::PasteService`].
///
/// Every method is a single atomic store operation.
pub trait PasteStore: Send + Sync {
    /// Insert a new row. Fails with a store error when the id already exists.
    fn insert_paste(&self, paste: &Paste) -> Result<(), AppError>;

    /// Fetch a row without the author join.
    fn find_paste(&self, id: &str) -> Result<Option<Paste>, AppError>;

    /// Fetch a row joined with `{id, name}` of its author.
    fn find_paste_with_author(&self, id: &str) -> Result<Option<PasteWithAuthor>, AppError>;

    /// Delete a row.
    ///
    /// # Returns
    /// `true` when a row was removed, `false` when it was already gone.
    fn delete_paste(&self, id: &str) -> Result<bool, AppError>;

    /// Atomically add one to `views`.
    ///
    /// # Returns
    /// `false` when the row does not exist.
    fn increment_views(&self, id: &str) -> Result<bool, AppError>;

    /// Atomically flip `is_public`.
    ///
    /// # Returns
    /// The updated row, or `None` when it does not exist.
    fn toggle_visibility(&self, id: &str) -> Result<Option<Paste>, AppError>;

    /// Newest-first window over rows matching `filter`, plus the total match count.
    fn query_public(
        &self,
        filter: PublicFilter<'_>,
        offset: usize,
        limit: usize,
    ) -> Result<PublicSlice, AppError>;

    /// Every row authored by `author_id`, newest first, with no visibility or
    /// expiry filtering.
    fn list_by_author(&self, author_id: &str) -> Result<Vec<PasteWithAuthor>, AppError>;
}

/// User persistence operations backing author joins and identity checks.
pub trait UserDirectory: Send + Sync {
    /// Insert a user. Fails with [`AppError::Conflict`] on a duplicate email.
    fn insert_user(&self, user: &User) -> Result<(), AppError>;

    fn find_user(&self, id: &str) -> Result<Option<User>, AppError>;

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}

/// Newest-first ordering key: reverse epoch millis, ties broken by id.
pub(crate) fn reverse_timestamp_key(created_at: DateTime<Utc>) -> u64 {
    // Pre-epoch timestamps are clamped to avoid negative->u64 underflow.
    let millis = created_at.timestamp_millis().max(0) as u64;
    u64::MAX.saturating_sub(millis)
}

pub(crate) fn duplicate_email(email: &str) -> AppError {
    AppError::Conflict(format!("User with email '{}' already exists", email))
}

pub(crate) fn duplicate_paste_id(id: &str) -> AppError {
    AppError::StorageMessage(format!("Paste id '{}' already exists", id))
}
