use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use ts_rs::TS;

/// Field name → message, as returned to clients on validation failure.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DomainError {
    #[error("Post not found")]
    PostNotFound,
    #[error("User not authorised")]
    NotAuthorised,
    #[error("User already liked the post")]
    AlreadyLiked,
    #[error("User has not liked the post")]
    NotLiked,
    #[error("Comment does not exist")]
    CommentNotFound,
    #[error("Post was changed by another request")]
    Conflict,
    #[error("Validation error: {0:?}")]
    ValidationError(FieldErrors),
    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}
