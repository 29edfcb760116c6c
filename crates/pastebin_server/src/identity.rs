//! Caller identity extraction from the auth provider's header.

use crate::{error::HttpError, AppState};
use axum::{extract::FromRequestParts, http::request::Parts};
use pastebin_core::{Requester, USER_HEADER};

/// Requester resolved from the `x-pastebin-user` header.
///
/// A missing or blank header is anonymous. An id that does not match a known
/// user is rejected with 401.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub Requester);

impl Caller {
    /// The requester, or 401 when anonymous.
    pub fn require_identity(self) -> Result<Requester, HttpError> {
        match self.0 {
            Requester::Anonymous => Err(HttpError::Unauthenticated),
            requester => Ok(requester),
        }
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(USER_HEADER) else {
            return Ok(Caller(Requester::Anonymous));
        };
        let user_id = raw
            .to_str()
            .map_err(|_| HttpError::Unauthenticated)?
            .trim();
        if user_id.is_empty() {
            return Ok(Caller(Requester::Anonymous));
        }

        match state.users.authenticate(user_id)? {
            Some(requester) => Ok(Caller(requester)),
            None => {
                tracing::debug!("Rejecting request for unknown user id {}", user_id);
                Err(HttpError::Unauthenticated)
            }
        }
    }
}
