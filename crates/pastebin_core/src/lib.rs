//! Core domain library for the pastebin (config, storage, lifecycle service).

/// Time sources used by the lifecycle service.
pub mod clock;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants used across pastebin crates.
pub mod constants;
/// redb-backed storage.
pub mod db;
/// Application error types (storage/domain).
pub mod error;
/// Paste identifier generation.
pub mod id;
/// Data models for API requests and persistence.
pub mod models;
/// Paste lifecycle and query service.
pub mod service;
/// Storage seam shared by the redb and in-memory stores.
pub mod store;
/// Request validation producing typed service inputs.
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use constants::{DEFAULT_CLI_SERVER_URL, DEFAULT_PORT, PAGE_SIZE, USER_HEADER};
pub use db::Database;
pub use error::AppError;
pub use models::requester::Requester;
pub use service::{Pagination, PastePage, PasteService, UserService};
pub use store::{MemoryStore, PasteStore, UserDirectory};
