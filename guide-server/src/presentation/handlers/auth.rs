use crate::domain::error::DomainError;
use crate::presentation::dto::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::presentation::handlers::AuthServiceData;
use crate::presentation::utils::request_id;
use actix_web::{HttpRequest, HttpResponse, Scope, post, web};
use tracing::info;

pub fn scope() -> Scope {
    web::scope("/auth").service(register).service(login)
}

#[post("/register")]
async fn register(
    req: HttpRequest,
    service: AuthServiceData,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, DomainError> {
    let RegisterRequest {
        email,
        password,
        admin,
    } = payload.into_inner();
    let user = service.register(email, password, admin).await?;

    info!(
        request_id = %request_id(&req),
        user_id = %user.id,
        admin = user.is_admin,
        "user registered"
    );

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

#[post("/login")]
async fn login(
    req: HttpRequest,
    service: AuthServiceData,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, DomainError> {
    let token = service.login(&payload.email, &payload.password).await?;

    info!(request_id = %request_id(&req), email = %payload.email, "user logged in");

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        expires_in: service.keys().ttl_seconds(),
        token_type: "Bearer".to_string(),
    }))
}
