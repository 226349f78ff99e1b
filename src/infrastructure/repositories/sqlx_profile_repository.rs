use crate::domain::{
    post::errors::DomainError,
    profile::{entity::Profile, repository::ProfileRepository},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

#[derive(FromRow)]
struct ProfileRow {
    id: Uuid,
    user_id: Uuid,
    handle: String,
    date: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(r: ProfileRow) -> Self {
        Profile {
            id: r.id,
            user: r.user_id,
            handle: r.handle,
            date: r.date,
        }
    }
}

pub struct SqlxProfileRepository {
    pub pool: PgPool,
}

impl SqlxProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for SqlxProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, DomainError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT id, user_id, handle, date FROM profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::InfrastructureError(e.to_string()))?;
        Ok(row.map(Profile::from))
    }
}
