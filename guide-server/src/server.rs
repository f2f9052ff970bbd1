use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::place_service::PlaceService;
use crate::application::recommendation_service::RecommendationService;
use crate::data::place_repository::PlaceRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::security::JwtKeys;
use crate::presentation::handlers;
use crate::presentation::middleware::{JwtAuthMiddleware, RequestIdMiddleware, TimingMiddleware};
use actix_cors::Cors;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{App, HttpResponse, HttpServer, Responder, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Everything the HTTP layer needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub auth: web::Data<AuthService<dyn UserRepository>>,
    pub places: web::Data<PlaceService<dyn PlaceRepository>>,
    pub recommendations: web::Data<RecommendationService<dyn PlaceRepository>>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        places: Arc<dyn PlaceRepository>,
        keys: JwtKeys,
    ) -> Self {
        Self {
            auth: web::Data::new(AuthService::new(users, keys)),
            places: web::Data::new(PlaceService::new(Arc::clone(&places))),
            recommendations: web::Data::new(RecommendationService::new(places)),
        }
    }

    /// Registers the services and all `/api` routes on an app.
    pub fn configure(&self) -> impl FnOnce(&mut web::ServiceConfig) + use<> {
        let auth = self.auth.clone();
        let places = self.places.clone();
        let recommendations = self.recommendations.clone();
        let keys = auth.keys().clone();

        move |cfg| {
            cfg.app_data(auth)
                .app_data(places)
                .app_data(recommendations)
                .app_data(web::JsonConfig::default().error_handler(|err, _| {
                    DomainError::Validation(err.to_string()).into()
                }))
                .service(
                    web::scope("/api")
                        .route("/health", web::get().to(health))
                        .service(handlers::auth::scope())
                        .service(handlers::place::get_places_by_category)
                        .service(
                            web::resource("/places")
                                .wrap(JwtAuthMiddleware::new(keys.clone()))
                                .route(web::post().to(handlers::place::create_place)),
                        )
                        .service(
                            web::resource("/seed")
                                .wrap(JwtAuthMiddleware::new(keys.clone()))
                                .route(web::post().to(handlers::place::seed)),
                        )
                        .service(
                            web::resource("/flow")
                                .wrap(JwtAuthMiddleware::new(keys))
                                .route(web::get().to(handlers::flow::get_flow)),
                        ),
                );
        }
    }
}

pub async fn start_rest_server(config: AppConfig, state: AppState) -> anyhow::Result<()> {
    let bind_address = (config.host.clone(), config.port);
    info!(host = %bind_address.0, port = bind_address.1, "HTTP server starting");

    HttpServer::new(move || {
        let cors = build_cors(&config);

        App::new()
            .wrap(Logger::default())
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Permissions-Policy", "geolocation=()"))
                    .add(("Cross-Origin-Opener-Policy", "same-origin")),
            )
            .wrap(cors)
            .configure(state.configure())
    })
    .bind(bind_address)?
    .run()
    .await
    .map_err(anyhow::Error::new)?;

    Ok(())
}

fn build_cors(config: &AppConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![
            actix_web::http::header::CONTENT_TYPE,
            actix_web::http::header::AUTHORIZATION,
        ])
        .max_age(3600);

    if config.cors_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
    } else {
        for origin in &config.cors_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    cors
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
    })
}
