use crate::{
    application::posts::dto::{DeletePostResponse, PostInput},
    domain::post::entity::Post,
    presentation::http::{
        errors::{AppError, NO_POST_FOUND, POST_NO_FOUND, POST_NOT_FOUND},
        middleware::user::AuthUser,
        state::AppState,
    },
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde_json::{Value, json};

/// Reads a post or comment body. A missing or unreadable body counts as empty
/// input, which then fails validation with the usual field map.
fn read_input(body: Result<Json<PostInput>, JsonRejection>, user: &AuthUser) -> PostInput {
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable request body");
            PostInput::default()
        }
    };
    input.or_identity(user.claims.name.as_deref(), user.claims.avatar.as_deref())
}

pub async fn test_route() -> Json<Value> {
    Json(json!({ "msg": "Posts Works" }))
}

/// Any failure on the public listing reads as "no post found".
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    let posts = state.posts.list().await.map_err(|e| {
        tracing::error!(error = %e, "Listing posts failed");
        AppError::not_found(NO_POST_FOUND)
    })?;
    Ok(Json(posts))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>, AppError> {
    let post = state.posts.get(&id).await.map_err(|e| {
        tracing::debug!(error = %e, post_id = %id, "Post lookup failed");
        AppError::not_found(NO_POST_FOUND)
    })?;
    Ok(Json(post))
}

pub async fn create_post(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<PostInput>, JsonRejection>,
) -> Result<Json<Post>, AppError> {
    let input = read_input(body, &user);
    let post = state
        .posts
        .create(user.id, input)
        .await
        .map_err(|e| AppError::from_domain(e, POST_NOT_FOUND))?;
    Ok(Json(post))
}

pub async fn delete_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DeletePostResponse>, AppError> {
    state
        .posts
        .delete(user.id, &id)
        .await
        .map_err(|e| AppError::from_domain(e, POST_NOT_FOUND))?;
    Ok(Json(DeletePostResponse { success: true }))
}

pub async fn like_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Post>, AppError> {
    let post = state
        .posts
        .like(user.id, &id)
        .await
        .map_err(|e| AppError::from_domain(e, POST_NOT_FOUND))?;
    Ok(Json(post))
}

pub async fn unlike_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Post>, AppError> {
    let post = state
        .posts
        .unlike(user.id, &id)
        .await
        .map_err(|e| AppError::from_domain(e, POST_NOT_FOUND))?;
    Ok(Json(post))
}

pub async fn add_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    body: Result<Json<PostInput>, JsonRejection>,
) -> Result<Json<Post>, AppError> {
    let input = read_input(body, &user);
    let post = state
        .posts
        .add_comment(user.id, &id, input)
        .await
        .map_err(|e| AppError::from_domain(e, POST_NO_FOUND))?;
    Ok(Json(post))
}

pub async fn remove_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<Json<Post>, AppError> {
    let post = state
        .posts
        .remove_comment(user.id, &id, &comment_id)
        .await
        .map_err(|e| AppError::from_domain(e, POST_NO_FOUND))?;
    Ok(Json(post))
}
