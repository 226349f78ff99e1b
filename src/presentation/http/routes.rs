use super::{handlers::posts, middleware::request_id::request_id_middleware, state::AppState};
use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/posts", post_routes())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Static segments win over `{id}`, so `/test`, `/like/..` and `/comment/..`
/// never reach the single-post handlers.
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/test", get(posts::test_route))
        .route("/", get(posts::list_posts).post(posts::create_post))
        .route("/{id}", get(posts::get_post).delete(posts::delete_post))
        .route("/like/{id}", post(posts::like_post))
        .route("/unlike/{id}", post(posts::unlike_post))
        .route("/comment/{id}", post(posts::add_comment))
        .route(
            "/comment/{id}/{comment_id}",
            delete(posts::remove_comment),
        )
}
