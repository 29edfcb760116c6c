//! Shared integration-test server bootstrap helpers.

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use pastebin_core::{FixedClock, USER_HEADER};
use pastebin_server::{create_app, AppState, Config, Database};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub(crate) fn test_config_for_db_path(db_path: &Path) -> Config {
    Config {
        port: 0,
        db_path: db_path.to_str().expect("db path").to_string(),
        max_body_size: 4 * 1024 * 1024,
    }
}

pub(crate) fn test_server_for_config(config: Config) -> (TestServer, Arc<FixedClock>) {
    let db = Database::new(config.db_path.as_str()).expect("open db");
    let start = Utc
        .with_ymd_and_hms(2024, 1, 15, 12, 0, 0)
        .single()
        .expect("valid start instant");
    let clock = Arc::new(FixedClock::new(start));
    let state = AppState::with_clock(config, db, clock.clone());
    let app = create_app(state, false);
    let server = TestServer::new(app).expect("server");
    (server, clock)
}

pub(crate) fn setup_test_server() -> (TestServer, TempDir, Arc<FixedClock>) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("test.db");
    let config = test_config_for_db_path(&db_path);
    let (server, clock) = test_server_for_config(config);
    (server, temp_dir, clock)
}

pub(crate) fn user_header() -> HeaderName {
    HeaderName::from_static(USER_HEADER)
}

pub(crate) fn as_user(user_id: &str) -> HeaderValue {
    HeaderValue::from_str(user_id).expect("header value")
}

/// Provision a user through the API and return its id.
pub(crate) async fn provision_user(server: &TestServer, name: &str) -> String {
    let response = server
        .post("/api/users")
        .json(&json!({
            "name": name,
            "email": format!("{}@example.com", name.to_lowercase()),
            "hashed_password": "$argon2id$opaque",
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let profile: Value = response.json();
    profile["id"].as_str().expect("user id").to_string()
}
