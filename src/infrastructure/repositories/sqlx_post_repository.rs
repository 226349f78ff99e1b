use crate::domain::post::{
    entity::{Comment, Like, Post},
    errors::DomainError,
    repository::PostRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, types::Json};
use tracing::{debug, info, instrument};
use uuid::Uuid;

const POST_COLUMNS: &str = "id, user_id, text, name, avatar, likes, comments, date, version";

#[derive(FromRow)]
struct PostRow {
    id: Uuid,
    user_id: Uuid,
    text: String,
    name: Option<String>,
    avatar: Option<String>,
    likes: Json<Vec<Like>>,
    comments: Json<Vec<Comment>>,
    date: DateTime<Utc>,
    version: i64,
}

impl From<PostRow> for Post {
    fn from(r: PostRow) -> Self {
        Post {
            id: r.id,
            user: r.user_id,
            text: r.text,
            name: r.name,
            avatar: r.avatar,
            likes: r.likes.0,
            comments: r.comments.0,
            date: r.date,
            version: r.version,
        }
    }
}

fn infra(e: sqlx::Error) -> DomainError {
    DomainError::InfrastructureError(e.to_string())
}

/// PostgreSQL-backed post documents. Likes and comments live in JSONB columns
/// so each post is read and written as one unit.
pub struct SqlxPostRepository {
    pub pool: PgPool,
}

impl SqlxPostRepository {
    pub fn new(pool: PgPool) -> Self {
        info!("Initializing SqlxPostRepository with connection pool");
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY date DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(infra)?;
        debug!(count = rows.len(), "Fetched posts");
        Ok(rows.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?;
        Ok(row.map(Post::from))
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn create(&self, post: &Post) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "INSERT INTO posts ({POST_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {POST_COLUMNS}"
        ))
        .bind(post.id)
        .bind(post.user)
        .bind(&post.text)
        .bind(&post.name)
        .bind(&post.avatar)
        .bind(Json(&post.likes))
        .bind(Json(&post.comments))
        .bind(post.date)
        .bind(post.version)
        .fetch_one(&self.pool)
        .await
        .map_err(infra)?;
        Ok(row.into())
    }

    #[instrument(skip(self, post), fields(post_id = %post.id, version = post.version))]
    async fn save(&self, post: &Post) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "UPDATE posts SET text = $3, name = $4, avatar = $5, likes = $6, comments = $7, \
             version = version + 1 \
             WHERE id = $1 AND version = $2 RETURNING {POST_COLUMNS}"
        ))
        .bind(post.id)
        .bind(post.version)
        .bind(&post.text)
        .bind(&post.name)
        .bind(&post.avatar)
        .bind(Json(&post.likes))
        .bind(Json(&post.comments))
        .fetch_optional(&self.pool)
        .await
        .map_err(infra)?;

        if let Some(row) = row {
            return Ok(row.into());
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
            .bind(post.id)
            .fetch_one(&self.pool)
            .await
            .map_err(infra)?;
        if exists {
            debug!("Stale post version");
            Err(DomainError::Conflict)
        } else {
            Err(DomainError::PostNotFound)
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(infra)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound);
        }
        Ok(())
    }
}
