use super::entity::Profile;
use crate::domain::post::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

/// Read access to profiles, which are owned by the profile service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, DomainError>;
}
