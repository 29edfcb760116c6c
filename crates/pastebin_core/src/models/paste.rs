//! Paste records, joined author views and creation input.

use super::{Expiration, Language};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical paste row stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paste {
    pub id: String,
    pub title: String,
    pub content: String,
    pub language: Language,
    pub is_public: bool,
    pub views: u64,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub author_id: Option<String>,
}

impl Paste {
    /// Whether the paste is past its deadline at `now`.
    ///
    /// A paste expiring exactly at `now` is not yet expired for reads, but is
    /// already excluded from listings (which require `expires_at > now`).
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|deadline| deadline < now)
    }

    /// Whether the paste is still live for listing and search at `now`.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |deadline| deadline > now)
    }
}

/// Minimal author info joined onto paste reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: String,
    pub name: String,
}

/// Paste row joined with its author, when the author still exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteWithAuthor {
    #[serde(flatten)]
    pub paste: Paste,
    pub author: Option<AuthorSummary>,
}

/// Already-validated input for [`crate::PasteService::create`].
///
/// Bounds and enum membership are guaranteed by [`crate::validation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePasteInput {
    pub title: String,
    pub content: String,
    pub language: Language,
    pub expiration: Expiration,
}
