//! User HTTP handlers.

use crate::{error::HttpError, AppState};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use pastebin_core::{
    models::UserProfile,
    validation::{validate_new_user, ProvisionUserRequest},
};

/// Store a user created by the auth provider.
///
/// # Returns
/// `201 Created` with the public profile.
///
/// # Errors
/// 400 for invalid payloads, 409 when the email is already registered.
pub async fn provision_user(
    State(state): State<AppState>,
    payload: Result<Json<ProvisionUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserProfile>), HttpError> {
    let Json(req) = payload?;
    let new_user = validate_new_user(req)?;
    let user = state.users.provision(new_user)?;
    tracing::info!("Provisioned user {}", user.id);
    Ok((StatusCode::CREATED, Json(UserProfile::from(&user))))
}

/// Public profile of a user.
///
/// # Errors
/// Returns 404 when the id is unknown.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, HttpError> {
    Ok(Json(state.users.profile(&id)?))
}
