use super::entity::Post;
use super::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

/// Document-style storage for posts. Likes and comments travel with the post.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, newest `date` first.
    async fn find_all(&self) -> Result<Vec<Post>, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError>;
    async fn create(&self, post: &Post) -> Result<Post, DomainError>;
    /// Writes back the mutable parts of an existing post and bumps its
    /// version. Fails with `Conflict` when the stored version no longer
    /// matches `post.version`.
    async fn save(&self, post: &Post) -> Result<Post, DomainError>;
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}
