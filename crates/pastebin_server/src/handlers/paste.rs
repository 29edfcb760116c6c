//! Paste HTTP handlers.

use crate::{error::HttpError, identity::Caller, AppState};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use pastebin_core::{
    models::{Language, Paste, PasteWithAuthor},
    validation::{validate_create_paste, CreatePasteRequest},
    AppError, PastePage,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// `?page=N` for listing endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// `?q=..&page=N` for search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<String>,
}

/// Lenient page number: missing, unparsable or below 1 all mean page 1.
fn page_number(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .map_or(1, |page| page.clamp(1, i64::from(u32::MAX)) as u32)
}

/// Single-paste response: the joined row plus caller-relative ownership.
#[derive(Debug, Serialize)]
pub struct PasteView {
    #[serde(flatten)]
    pub paste: PasteWithAuthor,
    pub is_owner: bool,
}

/// Create a new paste.
///
/// # Returns
/// The created paste as JSON.
///
/// # Errors
/// Returns 400 for invalid payloads and 500 if persistence fails.
pub async fn create_paste(
    State(state): State<AppState>,
    Caller(requester): Caller,
    payload: Result<Json<CreatePasteRequest>, JsonRejection>,
) -> Result<Json<Paste>, HttpError> {
    let Json(req) = payload?;
    let input = validate_create_paste(req)?;
    let paste = state.pastes.create(input, &requester)?;
    tracing::debug!("Created paste {}", paste.id);
    Ok(Json(paste))
}

/// Fetch a paste by id and count the view.
///
/// The returned `views` includes this request's view.
///
/// # Errors
/// Returns 404 if the paste does not exist or has expired.
pub async fn get_paste(
    State(state): State<AppState>,
    Caller(requester): Caller,
    Path(id): Path<String>,
) -> Result<Json<PasteView>, HttpError> {
    let mut found = state.pastes.get_by_id(&id)?.ok_or(AppError::NotFound)?;
    state.pastes.increment_views(&id)?;
    found.paste.views = found.paste.views.saturating_add(1);

    let is_owner = requester.owns(found.paste.author_id.as_deref());
    Ok(Json(PasteView {
        paste: found,
        is_owner,
    }))
}

/// Delete a paste owned by the caller.
///
/// # Errors
/// 401 without identity, 404 if absent, 403 if the caller is not the author.
pub async fn delete_paste(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Json<Value>, HttpError> {
    let requester = caller.require_identity()?;
    state.pastes.delete(&id, &requester)?;
    Ok(Json(json!({ "success": true })))
}

/// Flip a paste between public and private.
///
/// # Returns
/// The updated paste as JSON.
///
/// # Errors
/// 401 without identity, 404 if absent, 403 if the caller is not the author.
pub async fn toggle_visibility(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<String>,
) -> Result<Json<Paste>, HttpError> {
    let requester = caller.require_identity()?;
    Ok(Json(state.pastes.toggle_visibility(&id, &requester)?))
}

/// List recent public pastes.
pub async fn list_pastes(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PastePage>, HttpError> {
    let Query(query) = query?;
    let page = state
        .pastes
        .list_recent_public(page_number(query.page.as_deref()))?;
    Ok(Json(page))
}

/// Search public pastes by title or content.
///
/// A blank query returns the recent listing instead. Any other query is
/// matched verbatim, surrounding whitespace included.
pub async fn search_pastes(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<PastePage>, HttpError> {
    let Query(query) = query?;
    let page = page_number(query.page.as_deref());
    let results = if query.q.trim().is_empty() {
        state.pastes.list_recent_public(page)?
    } else {
        state.pastes.search(&query.q, page)?
    };
    Ok(Json(results))
}

/// Every paste the caller has written, including private and expired ones.
pub async fn my_pastes(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<Vec<PasteWithAuthor>>, HttpError> {
    let requester = caller.require_identity()?;
    let user_id = requester.user_id().ok_or(HttpError::Unauthenticated)?;
    Ok(Json(state.pastes.list_for_user(user_id)?))
}

/// Supported syntax-highlighting tags.
pub async fn list_languages() -> Json<Vec<&'static str>> {
    Json(Language::ALL.iter().map(|language| language.as_str()).collect())
}

#[cfg(test)]
mod tests {
    use super::page_number;

    #[test]
    fn page_number_falls_back_to_first_page() {
        let cases = [
            (None, 1),
            (Some("3"), 3),
            (Some(" 2 "), 2),
            (Some("0"), 1),
            (Some("-1"), 1),
            (Some("abc"), 1),
            (Some(""), 1),
            (Some("99999999999"), u32::MAX),
        ];
        for (raw, expected) in cases {
            assert_eq!(page_number(raw), expected, "page {:?}", raw);
        }
    }
}
