use std::sync::Arc;

use anyhow::Context;
use guide_server::data::place_repository::{
    InMemoryPlaceRepository, PlaceRepository, PostgresPlaceRepository,
};
use guide_server::data::user_repository::{
    InMemoryUserRepository, PostgresUserRepository, UserRepository,
};
use guide_server::infrastructure::config::AppConfig;
use guide_server::infrastructure::database::{create_pool, run_migrations};
use guide_server::infrastructure::logging::init_logging;
use guide_server::infrastructure::security::JwtKeys;
use guide_server::server::{AppState, start_rest_server};
use tracing::{info, warn};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let (users, places): (Arc<dyn UserRepository>, Arc<dyn PlaceRepository>) =
        match &config.database_url {
            Some(url) => {
                let pool = create_pool(url)
                    .await
                    .context("failed to connect to database")?;
                run_migrations(&pool)
                    .await
                    .context("failed to run migrations")?;
                info!("using PostgreSQL storage");
                (
                    Arc::new(PostgresUserRepository::new(pool.clone())) as Arc<dyn UserRepository>,
                    Arc::new(PostgresPlaceRepository::new(pool)) as Arc<dyn PlaceRepository>,
                )
            }
            None => {
                warn!("DATABASE_URL not set, data will not outlive the process");
                (
                    Arc::new(InMemoryUserRepository::new()) as Arc<dyn UserRepository>,
                    Arc::new(InMemoryPlaceRepository::new()) as Arc<dyn PlaceRepository>,
                )
            }
        };

    let keys = JwtKeys::new(config.jwt_secret.clone());
    let state = AppState::new(users, places, keys);

    start_rest_server(config, state).await
}
