//! Data models for persistence and API payloads.

/// Expiration choices and their absolute deadlines.
pub mod expiration;
/// Supported syntax-highlighting language tags.
pub mod language;
/// Paste records and joined views.
pub mod paste;
/// Caller identity as seen by the lifecycle service.
pub mod requester;
/// User records managed by the auth provider.
pub mod user;

pub use expiration::Expiration;
pub use language::Language;
pub use paste::{AuthorSummary, CreatePasteInput, Paste, PasteWithAuthor};
pub use requester::Requester;
pub use user::{NewUser, User, UserProfile};
