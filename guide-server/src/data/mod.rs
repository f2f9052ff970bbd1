pub mod place_repository;
pub mod user_repository;
