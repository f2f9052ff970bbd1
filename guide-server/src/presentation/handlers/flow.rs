use crate::domain::error::DomainError;
use crate::domain::user::Identity;
use crate::presentation::handlers::RecommendationServiceData;
use crate::presentation::utils::request_id;
use actix_web::{HttpRequest, HttpResponse};
use tracing::info;

pub async fn get_flow(
    req: HttpRequest,
    identity: Identity,
    engine: RecommendationServiceData,
) -> Result<HttpResponse, DomainError> {
    let flow = engine.recommend().await?;

    info!(
        request_id = %request_id(&req),
        user_id = %identity.user_id,
        total = flow.len(),
        "flow served"
    );

    Ok(HttpResponse::Ok().json(flow))
}
