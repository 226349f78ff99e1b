pub mod in_memory;
pub mod sqlx_post_repository;
pub mod sqlx_profile_repository;
