use crate::{application::posts::use_case::PostsUseCase, config::Config};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub posts: Arc<PostsUseCase>,
}
