#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use async_trait::async_trait;
use posts_api::{
    application::posts::use_case::PostsUseCase,
    config::Config,
    domain::{
        post::{entity::Post, errors::DomainError, repository::PostRepository},
        profile::entity::Profile,
    },
    infrastructure::{
        database::pool::create_pool,
        repositories::{
            in_memory::{InMemoryPostRepository, InMemoryProfileRepository},
            sqlx_post_repository::SqlxPostRepository,
        },
    },
    presentation::http::{middleware::user::issue_user_token, routes::create_router, state::AppState},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

const JWT_SECRET: &str = "test-jwt-secret";

pub struct TestApp {
    pub app: Router,
    pub profiles: Arc<InMemoryProfileRepository>,
}

pub struct TestUser {
    pub id: Uuid,
    pub token: String,
}

fn build_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        database_max_connections: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        jwt_secret: JWT_SECRET.to_string(),
        ignore_missing_migrations: true,
        cors_allowed_origins: Vec::new(),
        request_body_limit_bytes: 1024 * 1024,
    }
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(Arc::new(InMemoryPostRepository::new()))
}

/// The app over the given post store. Profiles stay in memory.
pub fn spawn_app_with(store: Arc<dyn PostRepository>) -> TestApp {
    let profiles = Arc::new(InMemoryProfileRepository::new());
    let posts = PostsUseCase::new(store, profiles.clone());
    let state = AppState {
        config: build_config(),
        posts: Arc::new(posts),
    };

    TestApp {
        app: create_router(state),
        profiles,
    }
}

/// A migrated pool on `DATABASE_URL`, or `None` when no database is reachable.
pub async fn database_pool() -> Option<PgPool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping PostgreSQL test");
        return None;
    };
    let pool = match create_pool(&url, 2).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("PostgreSQL unavailable ({e}), skipping test");
            return None;
        }
    };
    let mut migrator = sqlx::migrate!("./migrations");
    migrator.set_ignore_missing(true);
    migrator.run(&pool).await.expect("migrations failed");
    Some(pool)
}

/// The app over PostgreSQL, or `None` when no database is reachable.
pub async fn spawn_app_with_database() -> Option<TestApp> {
    let pool = database_pool().await?;
    Some(spawn_app_with(Arc::new(SqlxPostRepository::new(pool))))
}

/// A post store whose every call fails like an unreachable database.
pub struct FailingPostRepository;

fn store_down() -> DomainError {
    DomainError::InfrastructureError("connection refused".to_string())
}

#[async_trait]
impl PostRepository for FailingPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, DomainError> {
        Err(store_down())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, DomainError> {
        Err(store_down())
    }

    async fn create(&self, _post: &Post) -> Result<Post, DomainError> {
        Err(store_down())
    }

    async fn save(&self, _post: &Post) -> Result<Post, DomainError> {
        Err(store_down())
    }

    async fn delete(&self, _id: Uuid) -> Result<(), DomainError> {
        Err(store_down())
    }
}

impl TestApp {
    /// A user with a valid token and a stored profile.
    pub async fn user(&self, name: &str) -> TestUser {
        let id = Uuid::now_v7();
        self.profiles
            .insert(Profile::new(id, name.to_lowercase()))
            .expect("failed to store profile");
        let token = issue_user_token(
            JWT_SECRET,
            id,
            Some(name.to_string()),
            None,
            chrono::Duration::hours(1),
        )
        .expect("failed to issue token");
        TestUser { id, token }
    }

    pub async fn create_post(&self, user: &TestUser, text: &str) -> Value {
        let res = send(
            &self.app,
            json_request("POST", "/api/posts", Some(&user.token), serde_json::json!({ "text": text })),
        )
        .await;
        let res = expect_status(res, StatusCode::OK).await;
        read_json(res).await
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

/// A request carrying `body` verbatim, with an optional content type.
pub fn raw_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    content_type: Option<&str>,
    body: &'static str,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).expect("failed to build request")
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn read_text(res: axum::response::Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("invalid utf8")
}

pub async fn expect_status(
    res: axum::response::Response,
    expected: StatusCode,
) -> axum::response::Response {
    let actual = res.status();

    if actual == expected {
        return res;
    }

    let body = read_text(res).await;
    panic!(
        "HTTP status mismatch. Expected {}, got {}. Response body: {}",
        expected, actual, body
    );
}

/// Sends the request, asserts the status and returns the JSON body.
pub async fn call(app: &Router, req: Request<Body>, expected: StatusCode) -> Value {
    let res = expect_status(send(app, req).await, expected).await;
    read_json(res).await
}
