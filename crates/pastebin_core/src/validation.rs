//! Request validation producing typed, bounded service inputs.
//!
//! Each validator reports only the first failing field, in declaration order.

use crate::constants::{MAX_CONTENT_CHARS, MAX_TITLE_CHARS, MAX_USER_NAME_CHARS};
use crate::error::AppError;
use crate::models::{CreatePasteInput, Expiration, Language, NewUser};
use serde::Deserialize;

/// Raw paste creation payload.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePasteRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub language: Option<String>,
    pub expiration: Option<String>,
}

/// Raw user provisioning payload sent by the auth provider.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvisionUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub hashed_password: String,
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError::BadRequest(message.into())
}

fn check_length(value: &str, field: &str, max: usize) -> Result<(), AppError> {
    if value.is_empty() {
        return Err(bad_request(format!("{} is required", field)));
    }
    if value.chars().count() > max {
        return Err(bad_request(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

/// Validate a paste creation payload.
///
/// Missing `language` defaults to `plaintext`, missing `expiration` to `never`.
///
/// # Returns
/// A [`CreatePasteInput`] ready for the lifecycle service.
///
/// # Errors
/// Returns [`AppError::BadRequest`] describing the first invalid field.
pub fn validate_create_paste(request: CreatePasteRequest) -> Result<CreatePasteInput, AppError> {
    check_length(&request.title, "Title", MAX_TITLE_CHARS)?;
    check_length(&request.content, "Content", MAX_CONTENT_CHARS)?;

    let language = match request.language.as_deref() {
        None => Language::default(),
        Some(raw) => raw
            .parse()
            .map_err(|_| bad_request("Invalid language selected"))?,
    };
    let expiration = match request.expiration.as_deref() {
        None => Expiration::default(),
        Some(raw) => raw
            .parse()
            .map_err(|_| bad_request("Invalid expiration selected"))?,
    };

    Ok(CreatePasteInput {
        title: request.title,
        content: request.content,
        language,
        expiration,
    })
}

/// Loose structural email check: `local@domain.tld`, no whitespace.
pub fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// Validate a user provisioning payload.
///
/// Emails are trimmed and lowercased so uniqueness is case-insensitive.
///
/// # Errors
/// Returns [`AppError::BadRequest`] describing the first invalid field.
pub fn validate_new_user(request: ProvisionUserRequest) -> Result<NewUser, AppError> {
    check_length(&request.name, "Name", MAX_USER_NAME_CHARS)?;
    let email = request.email.trim().to_lowercase();
    if !is_plausible_email(&email) {
        return Err(bad_request("Invalid email address"));
    }
    if request.hashed_password.is_empty() {
        return Err(bad_request("Credential hash is required"));
    }
    Ok(NewUser {
        email,
        name: request.name,
        hashed_password: request.hashed_password,
    })
}
