pub mod auth_service;
pub mod place_service;
pub mod recommendation_service;
