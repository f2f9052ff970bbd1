use crate::domain::error::DomainError;
use crate::domain::place::NewPlace;
use crate::domain::user::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ======================= AUTH =======================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub admin: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            admin: user.is_admin,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub expires_in: i64,
    #[serde(rename = "token_type")]
    pub token_type: String, // "Bearer"
}

// ======================= PLACES =======================

/// HTML forms post the rating as text, API clients as a number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RatingInput {
    Number(f64),
    Text(String),
}

impl RatingInput {
    fn parse(&self) -> Result<f64, DomainError> {
        let value = match self {
            RatingInput::Number(n) => *n,
            RatingInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| DomainError::Validation(format!("rating is not a number: {s:?}")))?,
        };
        if !value.is_finite() {
            return Err(DomainError::Validation("rating must be finite".into()));
        }
        Ok(value)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePlaceRequest {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub hours: String,
    pub rating: RatingInput,
    pub category: String,
}

impl TryFrom<CreatePlaceRequest> for NewPlace {
    type Error = DomainError;

    fn try_from(req: CreatePlaceRequest) -> Result<Self, Self::Error> {
        let rating = req.rating.parse()?;
        let name = req.name.trim();
        let category = req.category.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("name must not be empty".into()));
        }
        if category.is_empty() {
            return Err(DomainError::Validation("category must not be empty".into()));
        }

        Ok(NewPlace {
            name: name.to_string(),
            address: req.address,
            hours: req.hours,
            rating,
            category: category.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub ok: bool,
    pub inserted: usize,
}
