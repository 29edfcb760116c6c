//! Shared test-only helpers for pastebin_core.

use crate::models::{Language, NewUser, Paste, User};
use crate::Database;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::TempDir;

/// Creates an isolated temporary database and returns it with the temp dir.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing file.
///
/// # Panics
/// Panics if temp-dir creation or database initialization fails.
pub(crate) fn setup_temp_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let db = Database::new(db_path.to_str().expect("db path")).expect("db");
    (db, temp_dir)
}

/// Fixed reference instant used across service and store tests.
pub(crate) fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
}

/// Public, never-expiring paste created `age_secs` seconds before [`t0`].
pub(crate) fn paste_at(id: &str, title: &str, content: &str, age_secs: i64) -> Paste {
    Paste {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        language: Language::Plaintext,
        is_public: true,
        views: 0,
        expires_at: None,
        created_at: t0() - Duration::seconds(age_secs),
        author_id: None,
    }
}

pub(crate) fn user_named(name: &str) -> User {
    User::new(
        NewUser {
            email: format!("{}@example.com", name.to_lowercase()),
            name: name.to_string(),
            hashed_password: "opaque-hash".to_string(),
        },
        t0(),
    )
}
