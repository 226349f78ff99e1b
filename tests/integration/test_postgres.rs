//! Runs against the PostgreSQL store when `DATABASE_URL` points at a
//! reachable database, and passes trivially otherwise.

use super::helpers::{call, database_pool, empty_request, json_request, spawn_app_with_database};
use axum::http::StatusCode;
use posts_api::{
    domain::{
        post::{entity::Post, errors::DomainError, repository::PostRepository},
        profile::repository::ProfileRepository,
    },
    infrastructure::repositories::{
        sqlx_post_repository::SqlxPostRepository, sqlx_profile_repository::SqlxProfileRepository,
    },
};
use serde_json::{Value, json};
use uuid::Uuid;

#[tokio::test]
async fn postgres_post_lifecycle() {
    let Some(app) = spawn_app_with_database().await else {
        return;
    };
    let author = app.user("Author").await;
    let fan = app.user("Fan").await;

    let older = app.create_post(&author, "Stored in PostgreSQL first").await;
    let newer = app.create_post(&author, "Stored in PostgreSQL second").await;
    let older_id = older["_id"].as_str().unwrap().to_string();
    let newer_id = newer["_id"].as_str().unwrap().to_string();

    let listed = call(&app.app, empty_request("GET", "/api/posts", None), StatusCode::OK).await;
    let ids: Vec<&str> = listed
        .as_array()
        .expect("list should be an array")
        .iter()
        .filter_map(|p| p["_id"].as_str())
        .filter(|id| *id == older_id || *id == newer_id)
        .collect();
    assert_eq!(ids, vec![newer_id.as_str(), older_id.as_str()]);

    let liked = call(
        &app.app,
        empty_request("POST", &format!("/api/posts/like/{}", older_id), Some(&fan.token)),
        StatusCode::OK,
    )
    .await;
    assert_eq!(liked["likes"][0]["user"], fan.id.to_string());

    let commented = call(
        &app.app,
        json_request(
            "POST",
            &format!("/api/posts/comment/{}", older_id),
            Some(&fan.token),
            json!({ "text": "Comment kept in JSONB" }),
        ),
        StatusCode::OK,
    )
    .await;
    let comment_id = commented["comments"][0]["_id"].as_str().unwrap().to_string();

    let fetched = call(
        &app.app,
        empty_request("GET", &format!("/api/posts/{}", older_id), None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(fetched["likes"], liked["likes"]);
    assert_eq!(fetched["comments"][0]["text"], "Comment kept in JSONB");
    assert_eq!(fetched["comments"][0]["name"], "Fan");

    let uncommented = call(
        &app.app,
        empty_request(
            "DELETE",
            &format!("/api/posts/comment/{}/{}", older_id, comment_id),
            Some(&fan.token),
        ),
        StatusCode::OK,
    )
    .await;
    assert_eq!(uncommented["comments"], json!([]));

    let unliked = call(
        &app.app,
        empty_request("POST", &format!("/api/posts/unlike/{}", older_id), Some(&fan.token)),
        StatusCode::OK,
    )
    .await;
    assert_eq!(unliked["likes"], json!([]));

    for id in [&older_id, &newer_id] {
        let deleted = call(
            &app.app,
            empty_request("DELETE", &format!("/api/posts/{}", id), Some(&author.token)),
            StatusCode::OK,
        )
        .await;
        assert_eq!(deleted, json!({ "success": true }));
    }

    let body = call(
        &app.app,
        empty_request("DELETE", &format!("/api/posts/{}", older_id), Some(&author.token)),
        StatusCode::NOT_FOUND,
    )
    .await;
    assert_eq!(body, json!({ "postnotfound": "No post found" }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn postgres_concurrent_likes_are_both_kept() {
    let Some(app) = spawn_app_with_database().await else {
        return;
    };
    let author = app.user("Author").await;
    let post = app.create_post(&author, "Liked by many at once").await;
    let uri = format!("/api/posts/like/{}", post["_id"].as_str().unwrap());

    let mut fans = Vec::new();
    for i in 0..4 {
        fans.push(app.user(&format!("Fan{i}")).await);
    }

    let mut tasks = Vec::new();
    for fan in &fans {
        let router = app.app.clone();
        let req = empty_request("POST", &uri, Some(&fan.token));
        tasks.push(tokio::spawn(async move {
            call(&router, req, StatusCode::OK).await
        }));
    }
    for task in tasks {
        task.await.expect("like task panicked");
    }

    let fetched: Value = call(
        &app.app,
        empty_request("GET", &format!("/api/posts/{}", post["_id"].as_str().unwrap()), None),
        StatusCode::OK,
    )
    .await;
    assert_eq!(fetched["likes"].as_array().unwrap().len(), fans.len());
}

#[tokio::test]
async fn postgres_stale_save_conflicts() {
    let Some(pool) = database_pool().await else {
        return;
    };
    let repo = SqlxPostRepository::new(pool);
    let post = repo
        .create(&Post::new(Uuid::now_v7(), "Versioned post text".into(), None, None))
        .await
        .unwrap();

    let mut first = post.clone();
    first.like(Uuid::now_v7()).unwrap();
    let saved = repo.save(&first).await.unwrap();
    assert_eq!(saved.version, post.version + 1);

    let mut stale = post.clone();
    stale.like(Uuid::now_v7()).unwrap();
    assert!(matches!(repo.save(&stale).await.unwrap_err(), DomainError::Conflict));

    repo.delete(post.id).await.unwrap();
    assert!(matches!(repo.save(&saved).await.unwrap_err(), DomainError::PostNotFound));
    assert!(repo.find_by_id(post.id).await.unwrap().is_none());
}

#[tokio::test]
async fn postgres_unknown_profile_is_none() {
    let Some(pool) = database_pool().await else {
        return;
    };
    let profiles = SqlxProfileRepository::new(pool);
    assert!(profiles.find_by_user(Uuid::now_v7()).await.unwrap().is_none());
}
