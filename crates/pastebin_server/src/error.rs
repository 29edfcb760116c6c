//! HTTP error mapping for API handlers.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pastebin_core::AppError;
use serde_json::json;

/// Error returned by API handlers, rendered as `{ "error": message }`.
#[derive(Debug)]
pub enum HttpError {
    /// Domain or storage failure from the core crate.
    App(AppError),
    /// The route needs an identity and the request carried none (or an unknown one).
    Unauthenticated,
    /// Body or query string could not be decoded.
    Rejected { status: StatusCode, message: String },
}

impl From<AppError> for HttpError {
    fn from(err: AppError) -> Self {
        Self::App(err)
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self::Rejected {
            status,
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Rejected {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl HttpError {
    /// Status code this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::Unauthenticated => StatusCode::UNAUTHORIZED,
            HttpError::Rejected { status, .. } => *status,
            HttpError::App(err) => match err {
                AppError::NotFound => StatusCode::NOT_FOUND,
                AppError::Unauthorized => StatusCode::FORBIDDEN,
                AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
                AppError::Conflict(_) => StatusCode::CONFLICT,
                AppError::Database(_)
                | AppError::StorageMessage(_)
                | AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            HttpError::Unauthenticated => "Authentication required".to_string(),
            HttpError::Rejected { message, .. } => message,
            HttpError::App(AppError::NotFound) => "Not found".to_string(),
            HttpError::App(AppError::BadRequest(msg)) | HttpError::App(AppError::Conflict(msg)) => {
                msg
            }
            HttpError::App(err) if err.is_store_failure() => {
                tracing::error!("Storage failure: {}", err);
                "Internal server error".to_string()
            }
            HttpError::App(err) => err.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
