//! API error types and HTTP response mapping.
//!
//! Every error is rendered as a JSON body `{ "error": ..., "detail"?: ... }`:
//! - `Validation(Missing | Traversal)` → 400
//! - `Validation(NotAllowed)` → 403
//! - `Upstream` → the upstream status, forwarded unchanged
//! - `Unreachable` → 502
//! - `NotFound` → 404

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Rejection reasons for a requested download path
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    #[error("Missing path")]
    Missing,

    #[error("Invalid path")]
    Traversal,

    #[error("Not allowed")]
    NotAllowed,
}

impl PathError {
    pub fn status(&self) -> StatusCode {
        match self {
            PathError::Missing | PathError::Traversal => StatusCode::BAD_REQUEST,
            PathError::NotAllowed => StatusCode::FORBIDDEN,
        }
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] PathError),

    #[error("{message}")]
    Upstream {
        status: StatusCode,
        message: String,
        detail: Option<String>,
    },

    #[error("{message}: {source}")]
    Unreachable {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(e) => e.status(),
            ApiError::Upstream { status, .. } => *status,
            ApiError::Unreachable { .. } => StatusCode::BAD_GATEWAY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Short message placed in the `error` field
    pub fn message(&self) -> String {
        match self {
            ApiError::Upstream { message, .. } | ApiError::Unreachable { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }

    fn detail(&self) -> Option<String> {
        match self {
            ApiError::Upstream { detail, .. } => detail.clone(),
            ApiError::Unreachable { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self.detail() {
            Some(detail) => json!({ "error": self.message(), "detail": detail }),
            None => json!({ "error": self.message() }),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
