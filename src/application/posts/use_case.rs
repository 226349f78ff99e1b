use super::dto::PostInput;
use crate::domain::{
    post::{
        entity::{Comment, Post},
        errors::DomainError,
        repository::PostRepository,
        value_objects::{PostText, optional_field},
    },
    profile::repository::ProfileRepository,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Attempts at a read-modify-write before a concurrent update is reported.
const MAX_SAVE_ATTEMPTS: usize = 5;

/// Post endpoints as sequential lookup → mutate → save steps.
///
/// Identifiers arrive as raw path segments; anything that is not a UUID is
/// reported exactly like a missing document.
pub struct PostsUseCase {
    posts: Arc<dyn PostRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl PostsUseCase {
    pub fn new(posts: Arc<dyn PostRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { posts, profiles }
    }

    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        self.posts.find_all().await
    }

    pub async fn get(&self, id: &str) -> Result<Post, DomainError> {
        self.load(id).await
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, user_id: Uuid, input: PostInput) -> Result<Post, DomainError> {
        let text = PostText::parse(input.text.as_deref()).map_err(DomainError::ValidationError)?;
        let post = Post::new(
            user_id,
            text.into_inner(),
            optional_field(input.name),
            optional_field(input.avatar),
        );
        let created = self.posts.create(&post).await?;
        info!(post_id = %created.id, "Post created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Uuid, id: &str) -> Result<(), DomainError> {
        self.resolve_profile(user_id).await?;
        let post = self.load(id).await?;
        if !post.is_owned_by(user_id) {
            warn!(post_id = %post.id, "Delete refused for non-owner");
            return Err(DomainError::NotAuthorised);
        }
        self.posts.delete(post.id).await?;
        info!(post_id = %post.id, "Post deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn like(&self, user_id: Uuid, id: &str) -> Result<Post, DomainError> {
        self.resolve_profile(user_id).await?;
        self.update(id, |post| post.like(user_id)).await
    }

    #[instrument(skip(self))]
    pub async fn unlike(&self, user_id: Uuid, id: &str) -> Result<Post, DomainError> {
        self.resolve_profile(user_id).await?;
        self.update(id, |post| post.unlike(user_id)).await
    }

    #[instrument(skip(self, input))]
    pub async fn add_comment(
        &self,
        user_id: Uuid,
        id: &str,
        input: PostInput,
    ) -> Result<Post, DomainError> {
        let text = PostText::parse(input.text.as_deref()).map_err(DomainError::ValidationError)?;
        let comment = Comment::new(
            user_id,
            text.into_inner(),
            optional_field(input.name),
            optional_field(input.avatar),
        );
        let comment_id = comment.id;
        let saved = self
            .update(id, |post| {
                post.add_comment(comment.clone());
                Ok(())
            })
            .await?;
        debug!(post_id = %saved.id, %comment_id, "Comment added");
        Ok(saved)
    }

    /// Any authenticated user may remove any comment on the post.
    #[instrument(skip(self))]
    pub async fn remove_comment(
        &self,
        _user_id: Uuid,
        id: &str,
        comment_id: &str,
    ) -> Result<Post, DomainError> {
        let comment_id = Uuid::parse_str(comment_id).ok();
        self.update(id, |post| {
            let comment_id = comment_id.ok_or(DomainError::CommentNotFound)?;
            post.remove_comment(comment_id).map(|_| ())
        })
        .await
    }

    /// Loads the post, applies `change` and saves it. A save that lost a race
    /// with another request is retried on a fresh copy.
    async fn update<F>(&self, id: &str, change: F) -> Result<Post, DomainError>
    where
        F: Fn(&mut Post) -> Result<(), DomainError>,
    {
        let id = Self::parse_post_id(id)?;
        for attempt in 1..=MAX_SAVE_ATTEMPTS {
            let mut post = self
                .posts
                .find_by_id(id)
                .await?
                .ok_or(DomainError::PostNotFound)?;
            change(&mut post)?;
            match self.posts.save(&post).await {
                Err(DomainError::Conflict) => {
                    debug!(post_id = %id, attempt, "Concurrent update, retrying");
                }
                result => return result,
            }
        }
        warn!(post_id = %id, "Giving up after repeated concurrent updates");
        Err(DomainError::Conflict)
    }

    fn parse_post_id(id: &str) -> Result<Uuid, DomainError> {
        Uuid::parse_str(id).map_err(|_| DomainError::PostNotFound)
    }

    async fn load(&self, id: &str) -> Result<Post, DomainError> {
        let id = Self::parse_post_id(id)?;
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PostNotFound)
    }

    async fn resolve_profile(&self, user_id: Uuid) -> Result<(), DomainError> {
        if self.profiles.find_by_user(user_id).await?.is_none() {
            debug!(%user_id, "No profile found for user");
        }
        Ok(())
    }
}
