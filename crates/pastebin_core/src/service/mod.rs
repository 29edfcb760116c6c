//! Paste lifecycle and query service.
//!
//! Business rules live here: id assignment, expiry computation, lazy eviction
//! of expired pastes on read, ownership checks and paging. Persistence is
//! delegated to a [`PasteStore`]; time comes from a [`Clock`].

mod pagination;
mod user;

pub use pagination::Pagination;
pub use user::UserService;

use crate::clock::{Clock, SystemClock};
use crate::error::AppError;
use crate::id::generate_id;
use crate::models::{CreatePasteInput, Paste, PasteWithAuthor, Requester};
use crate::store::{PasteStore, PublicFilter, PublicSlice};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// One page of public pastes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PastePage {
    pub pastes: Vec<PasteWithAuthor>,
    pub total: u64,
    pub total_pages: u64,
    pub current_page: u32,
}

impl PastePage {
    fn from_slice(slice: PublicSlice, pagination: Pagination) -> Self {
        Self {
            total_pages: pagination.total_pages(slice.total),
            total: slice.total,
            pastes: slice.pastes,
            current_page: pagination.page(),
        }
    }
}

/// Lifecycle operations over a shared store.
pub struct PasteService<S: PasteStore> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S: PasteStore> Clone for PasteService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<S: PasteStore> PasteService<S> {
    /// Service reading wall-clock time.
    pub fn new(store: Arc<S>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Create a public paste with a fresh id.
    ///
    /// # Returns
    /// The stored record, with `views = 0` and `created_at = now`.
    ///
    /// # Errors
    /// Propagates store failures, including a duplicate id.
    pub fn create(&self, input: CreatePasteInput, requester: &Requester) -> Result<Paste, AppError> {
        let now = self.clock.now();
        let paste = Paste {
            id: generate_id(),
            title: input.title,
            content: input.content,
            language: input.language,
            is_public: true,
            views: 0,
            expires_at: input.expiration.expires_at(now),
            created_at: now,
            author_id: requester.user_id().map(str::to_string),
        };
        self.store.insert_paste(&paste)?;
        Ok(paste)
    }

    /// Fetch a paste, evicting it first if it has expired.
    ///
    /// # Returns
    /// `Ok(None)` when the paste never existed or was just evicted.
    ///
    /// # Errors
    /// Propagates store failures.
    pub fn get_by_id(&self, id: &str) -> Result<Option<PasteWithAuthor>, AppError> {
        let Some(found) = self.store.find_paste_with_author(id)? else {
            return Ok(None);
        };
        if found.paste.is_expired_at(self.clock.now()) {
            // Losing a race with another evicting reader is fine.
            self.store.delete_paste(id)?;
            return Ok(None);
        }
        Ok(Some(found))
    }

    /// Count one view. A missing paste is ignored.
    pub fn increment_views(&self, id: &str) -> Result<(), AppError> {
        self.store.increment_views(id)?;
        Ok(())
    }

    /// Newest public, unexpired pastes.
    pub fn list_recent_public(&self, page: u32) -> Result<PastePage, AppError> {
        let pagination = Pagination::new(page);
        let slice = self.store.query_public(
            PublicFilter::recent(self.clock.now()),
            pagination.offset(),
            pagination.limit(),
        )?;
        Ok(PastePage::from_slice(slice, pagination))
    }

    /// Public, unexpired pastes whose title or content contains `query`.
    ///
    /// Matching is case-sensitive. An empty query matches everything.
    pub fn search(&self, query: &str, page: u32) -> Result<PastePage, AppError> {
        let pagination = Pagination::new(page);
        let slice = self.store.query_public(
            PublicFilter::search(self.clock.now(), query),
            pagination.offset(),
            pagination.limit(),
        )?;
        Ok(PastePage::from_slice(slice, pagination))
    }

    /// Every paste authored by `user_id`, including private and expired ones.
    pub fn list_for_user(&self, user_id: &str) -> Result<Vec<PasteWithAuthor>, AppError> {
        self.store.list_by_author(user_id)
    }

    /// Delete a paste owned by `requester`.
    ///
    /// # Errors
    /// [`AppError::NotFound`] when absent, [`AppError::Unauthorized`] when the
    /// requester is not the author.
    pub fn delete(&self, id: &str, requester: &Requester) -> Result<(), AppError> {
        self.owned_paste(id, requester)?;
        self.store.delete_paste(id)?;
        Ok(())
    }

    /// Flip the visibility of a paste owned by `requester`.
    ///
    /// # Returns
    /// The updated record.
    ///
    /// # Errors
    /// [`AppError::NotFound`] when absent (including a concurrent delete),
    /// [`AppError::Unauthorized`] when the requester is not the author.
    pub fn toggle_visibility(&self, id: &str, requester: &Requester) -> Result<Paste, AppError> {
        self.owned_paste(id, requester)?;
        self.store
            .toggle_visibility(id)?
            .ok_or(AppError::NotFound)
    }

    fn owned_paste(&self, id: &str, requester: &Requester) -> Result<Paste, AppError> {
        let paste = self.store.find_paste(id)?.ok_or(AppError::NotFound)?;
        if !requester.owns(paste.author_id.as_deref()) {
            return Err(AppError::Unauthorized);
        }
        Ok(paste)
    }
}
