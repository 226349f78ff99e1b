use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::errors::DomainError;

/// A user-authored text item together with its likes and comments.
///
/// Posts are stored and returned as a single document: likes and comments are
/// embedded, ordered newest first, and only change through the methods below.
///
/// # Invariants
/// - `likes` holds at most one entry per user
/// - `user` is the only identity allowed to delete the post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: Uuid,

    /// Owning user
    pub user: Uuid,

    pub text: String,

    /// Author display name captured at creation time
    pub name: Option<String>,

    /// Author avatar URL captured at creation time
    pub avatar: Option<String>,

    pub likes: Vec<Like>,

    pub comments: Vec<Comment>,

    pub date: DateTime<Utc>,

    /// Store revision the post was read at. A save only applies on top of
    /// the same revision.
    #[serde(skip)]
    pub version: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Like {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub date: DateTime<Utc>,
}

impl Post {
    pub fn new(user: Uuid, text: String, name: Option<String>, avatar: Option<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user,
            text,
            name,
            avatar,
            likes: Vec::new(),
            comments: Vec::new(),
            date: Utc::now(),
            version: 0,
        }
    }

    pub fn is_owned_by(&self, user: Uuid) -> bool {
        self.user == user
    }

    pub fn is_liked_by(&self, user: Uuid) -> bool {
        self.likes.iter().any(|like| like.user == user)
    }

    /// Records a like from `user` at the front of the list.
    pub fn like(&mut self, user: Uuid) -> Result<(), DomainError> {
        if self.is_liked_by(user) {
            return Err(DomainError::AlreadyLiked);
        }
        self.likes.insert(
            0,
            Like {
                id: Uuid::now_v7(),
                user,
            },
        );
        Ok(())
    }

    pub fn unlike(&mut self, user: Uuid) -> Result<(), DomainError> {
        let index = self
            .likes
            .iter()
            .position(|like| like.user == user)
            .ok_or(DomainError::NotLiked)?;
        self.likes.remove(index);
        Ok(())
    }

    /// Prepends `comment` and returns its id.
    pub fn add_comment(&mut self, comment: Comment) -> Uuid {
        let id = comment.id;
        self.comments.insert(0, comment);
        id
    }

    pub fn remove_comment(&mut self, comment_id: Uuid) -> Result<Comment, DomainError> {
        let index = self
            .comments
            .iter()
            .position(|comment| comment.id == comment_id)
            .ok_or(DomainError::CommentNotFound)?;
        Ok(self.comments.remove(index))
    }
}

impl Comment {
    pub fn new(user: Uuid, text: String, name: Option<String>, avatar: Option<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user,
            text,
            name,
            avatar,
            date: Utc::now(),
        }
    }
}
