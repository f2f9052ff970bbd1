use actix_web::web;

use crate::application::auth_service::AuthService;
use crate::application::place_service::PlaceService;
use crate::application::recommendation_service::RecommendationService;
use crate::data::place_repository::PlaceRepository;
use crate::data::user_repository::UserRepository;

pub mod auth;
pub mod flow;
pub mod place;

pub type AuthServiceData = web::Data<AuthService<dyn UserRepository>>;
pub type PlaceServiceData = web::Data<PlaceService<dyn PlaceRepository>>;
pub type RecommendationServiceData = web::Data<RecommendationService<dyn PlaceRepository>>;
