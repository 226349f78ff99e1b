//! HTTP error handling and response conversion.
//!
//! Clients depend on the exact error bodies: each failure is a one-key JSON
//! object such as `{"postnotfound": "No post found"}`, and the key used for a
//! missing post depends on the route that was called. Handlers therefore pick
//! the missing-post [`ErrorKey`] when converting a [`DomainError`].

use crate::domain::post::errors::{DomainError, FieldErrors};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// A fixed `{key: message}` error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorKey {
    pub key: &'static str,
    pub message: &'static str,
}

/// Missing post on the public read routes.
pub const NO_POST_FOUND: ErrorKey = ErrorKey {
    key: "nopostfound",
    message: "No post found with that Id",
};

/// Missing post on delete, like and unlike.
pub const POST_NOT_FOUND: ErrorKey = ErrorKey {
    key: "postnotfound",
    message: "No post found",
};

/// Missing post on the comment routes.
pub const POST_NO_FOUND: ErrorKey = ErrorKey {
    key: "postnofound",
    message: "No post found",
};

pub const NOT_AUTHORISED: ErrorKey = ErrorKey {
    key: "notauthorised",
    message: "user not authorised",
};

pub const ALREADY_LIKED: ErrorKey = ErrorKey {
    key: "alreadyliked",
    message: "User already liked the post",
};

// Same key as ALREADY_LIKED; existing clients match on it.
pub const NOT_LIKED: ErrorKey = ErrorKey {
    key: "alreadyliked",
    message: "You have not liked the post",
};

pub const COMMENT_NOT_EXIST: ErrorKey = ErrorKey {
    key: "commentnotexist",
    message: "Comment does not exist",
};

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// Fixed-shape error with its status code.
    Keyed(StatusCode, ErrorKey),

    /// Input failed validation (400), body is the field map.
    Validation(FieldErrors),

    /// Missing or invalid bearer token (401).
    Unauthorized,

    /// Store operation failed (500).
    Database(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyed(status, body) => write!(f, "{} {}: {}", status.as_u16(), body.key, body.message),
            Self::Validation(fields) => write!(f, "Validation error: {:?}", fields),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl AppError {
    pub fn not_found(key: ErrorKey) -> Self {
        Self::Keyed(StatusCode::NOT_FOUND, key)
    }

    /// Converts a domain error, reporting a missing post with `missing_post`.
    pub fn from_domain(err: DomainError, missing_post: ErrorKey) -> Self {
        match err {
            DomainError::PostNotFound => Self::not_found(missing_post),
            DomainError::NotAuthorised => Self::Keyed(StatusCode::UNAUTHORIZED, NOT_AUTHORISED),
            DomainError::AlreadyLiked => Self::Keyed(StatusCode::BAD_REQUEST, ALREADY_LIKED),
            DomainError::NotLiked => Self::Keyed(StatusCode::BAD_REQUEST, NOT_LIKED),
            DomainError::CommentNotFound => Self::not_found(COMMENT_NOT_EXIST),
            DomainError::ValidationError(fields) => Self::Validation(fields),
            conflict @ DomainError::Conflict => Self::Database(conflict.to_string()),
            DomainError::InfrastructureError(msg) => Self::Database(msg),
        }
    }

    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Keyed(status, _) => *status,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => tracing::error!("error={}", self),
            StatusCode::UNAUTHORIZED => tracing::debug!("error={}", self),
            _ => tracing::warn!("error={}", self),
        }

        match self {
            Self::Keyed(_, body) => (status, Json(json!({ body.key: body.message }))).into_response(),
            Self::Validation(fields) => (status, Json(fields)).into_response(),
            Self::Unauthorized => (status, "Unauthorized").into_response(),
            Self::Database(_) => {
                (status, Json(json!({ "error": "Database operation failed" }))).into_response()
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        Self::from_domain(err, POST_NOT_FOUND)
    }
}
