use crate::domain::error::DomainError;
use crate::domain::place::NewPlace;
use crate::domain::user::Identity;
use crate::presentation::dto::{CreatePlaceRequest, SeedResponse};
use crate::presentation::handlers::PlaceServiceData;
use crate::presentation::utils::request_id;
use actix_web::{Error, HttpRequest, HttpResponse, get, web};
use tracing::info;

/// The role is checked before the body so a non-admin always sees 403.
pub async fn create_place(
    req: HttpRequest,
    identity: Identity,
    places: PlaceServiceData,
    payload: Result<web::Json<CreatePlaceRequest>, Error>,
) -> Result<HttpResponse, Error> {
    let grant = identity.require_admin()?;
    let fields = NewPlace::try_from(payload?.into_inner())?;
    let place = places.create_place(&grant, fields).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %identity.user_id,
        place_id = %place.id,
        "place created"
    );

    Ok(HttpResponse::Created().json(place))
}

#[get("/places/{category}")]
pub async fn get_places_by_category(
    req: HttpRequest,
    places: PlaceServiceData,
    path: web::Path<String>,
) -> Result<HttpResponse, DomainError> {
    let category = path.into_inner();
    let list = places.list_by_category(&category).await?;

    info!(
        request_id = %request_id(&req),
        category = %category,
        total = list.len(),
        "places retrieved"
    );

    Ok(HttpResponse::Ok().json(list))
}

pub async fn seed(
    req: HttpRequest,
    identity: Identity,
    places: PlaceServiceData,
) -> Result<HttpResponse, DomainError> {
    let grant = identity.require_admin()?;
    let inserted = places.seed_demo_data(&grant).await?;

    info!(request_id = %request_id(&req), inserted, "catalogue seeded");

    Ok(HttpResponse::Ok().json(SeedResponse { ok: true, inserted }))
}
