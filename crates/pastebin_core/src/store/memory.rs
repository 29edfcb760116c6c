//! In-memory store with the same semantics as the redb store.

use super::{
    duplicate_email, duplicate_paste_id, reverse_timestamp_key, PasteStore, PublicFilter,
    PublicSlice, UserDirectory,
};
use crate::error::AppError;
use crate::models::{AuthorSummary, Paste, PasteWithAuthor, User};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MemoryState {
    pastes: HashMap<String, Paste>,
    users: HashMap<String, User>,
}

impl MemoryState {
    fn author_of(&self, paste: &Paste) -> Option<AuthorSummary> {
        let user = self.users.get(paste.author_id.as_deref()?)?;
        Some(AuthorSummary {
            id: user.id.clone(),
            name: user.name.clone(),
        })
    }

    fn joined(&self, paste: &Paste) -> PasteWithAuthor {
        PasteWithAuthor {
            author: self.author_of(paste),
            paste: paste.clone(),
        }
    }
}

fn newest_first(mut rows: Vec<&Paste>) -> Vec<&Paste> {
    rows.sort_by(|a, b| {
        reverse_timestamp_key(a.created_at)
            .cmp(&reverse_timestamp_key(b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
    rows
}

/// Mutex-guarded maps; every operation holds the lock for its full duration.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, AppError> {
        self.state
            .lock()
            .map_err(|_| AppError::StorageMessage("In-memory store lock poisoned".to_string()))
    }

    /// Number of stored pastes, including expired ones.
    pub fn paste_count(&self) -> Result<usize, AppError> {
        Ok(self.lock()?.pastes.len())
    }
}

impl PasteStore for MemoryStore {
    fn insert_paste(&self, paste: &Paste) -> Result<(), AppError> {
        let mut state = self.lock()?;
        if state.pastes.contains_key(&paste.id) {
            return Err(duplicate_paste_id(&paste.id));
        }
        state.pastes.insert(paste.id.clone(), paste.clone());
        Ok(())
    }

    fn find_paste(&self, id: &str) -> Result<Option<Paste>, AppError> {
        Ok(self.lock()?.pastes.get(id).cloned())
    }

    fn find_paste_with_author(&self, id: &str) -> Result<Option<PasteWithAuthor>, AppError> {
        let state = self.lock()?;
        Ok(state.pastes.get(id).map(|paste| state.joined(paste)))
    }

    fn delete_paste(&self, id: &str) -> Result<bool, AppError> {
        Ok(self.lock()?.pastes.remove(id).is_some())
    }

    fn increment_views(&self, id: &str) -> Result<bool, AppError> {
        let mut state = self.lock()?;
        match state.pastes.get_mut(id) {
            Some(paste) => {
                paste.views = paste.views.saturating_add(1);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn toggle_visibility(&self, id: &str) -> Result<Option<Paste>, AppError> {
        let mut state = self.lock()?;
        Ok(state.pastes.get_mut(id).map(|paste| {
            paste.is_public = !paste.is_public;
            paste.clone()
        }))
    }

    fn query_public(
        &self,
        filter: PublicFilter<'_>,
        offset: usize,
        limit: usize,
    ) -> Result<PublicSlice, AppError> {
        let state = self.lock()?;
        let matching: Vec<&Paste> = state
            .pastes
            .values()
            .filter(|paste| filter.matches(paste))
            .collect();
        let total = matching.len() as u64;
        let pastes = newest_first(matching)
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|paste| state.joined(paste))
            .collect();
        Ok(PublicSlice { pastes, total })
    }

    fn list_by_author(&self, author_id: &str) -> Result<Vec<PasteWithAuthor>, AppError> {
        let state = self.lock()?;
        let owned: Vec<&Paste> = state
            .pastes
            .values()
            .filter(|paste| paste.author_id.as_deref() == Some(author_id))
            .collect();
        Ok(newest_first(owned)
            .into_iter()
            .map(|paste| state.joined(paste))
            .collect())
    }
}

impl UserDirectory for MemoryStore {
    fn insert_user(&self, user: &User) -> Result<(), AppError> {
        let mut state = self.lock()?;
        if state.users.values().any(|existing| existing.email == user.email) {
            return Err(duplicate_email(&user.email));
        }
        if state.users.contains_key(&user.id) {
            return Err(AppError::StorageMessage(format!(
                "User id '{}' already exists",
                user.id
            )));
        }
        state.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    fn find_user(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.lock()?.users.get(id).cloned())
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }
}
