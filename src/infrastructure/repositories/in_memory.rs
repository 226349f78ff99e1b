//! Process-local stores with the same contract as the PostgreSQL ones.

use crate::domain::{
    post::{entity::Post, errors::DomainError, repository::PostRepository},
    profile::{entity::Profile, repository::ProfileRepository},
};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};
use uuid::Uuid;

fn poisoned() -> DomainError {
    DomainError::InfrastructureError("in-memory store lock poisoned".to_string())
}

#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Uuid, Post>>, DomainError> {
        self.posts.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, Post>>, DomainError> {
        self.posts.write().map_err(|_| poisoned())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        let mut posts: Vec<Post> = self.read()?.values().cloned().collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        Ok(self.read()?.get(&id).cloned())
    }

    async fn create(&self, post: &Post) -> Result<Post, DomainError> {
        let mut posts = self.write()?;
        if posts.contains_key(&post.id) {
            return Err(DomainError::InfrastructureError(format!(
                "duplicate post id {}",
                post.id
            )));
        }
        posts.insert(post.id, post.clone());
        Ok(post.clone())
    }

    async fn save(&self, post: &Post) -> Result<Post, DomainError> {
        let mut posts = self.write()?;
        let stored = posts.get_mut(&post.id).ok_or(DomainError::PostNotFound)?;
        if stored.version != post.version {
            return Err(DomainError::Conflict);
        }
        stored.version += 1;
        stored.text = post.text.clone();
        stored.name = post.name.clone();
        stored.avatar = post.avatar.clone();
        stored.likes = post.likes.clone();
        stored.comments = post.comments.clone();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.write()?
            .remove(&id)
            .map(|_| ())
            .ok_or(DomainError::PostNotFound)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<Uuid, Profile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `profile`, replacing any earlier one for the same user.
    pub fn insert(&self, profile: Profile) -> Result<(), DomainError> {
        let mut profiles = self.profiles.write().map_err(|_| poisoned())?;
        profiles.insert(profile.user, profile);
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, DomainError> {
        let profiles = self.profiles.read().map_err(|_| poisoned())?;
        Ok(profiles.get(&user_id).cloned())
    }
}
