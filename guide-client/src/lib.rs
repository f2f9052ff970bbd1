//! HTTP client for the place guide API.

mod error;
mod http_client;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use error::GuideClientError;
pub use http_client::GuideClientHttp;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub hours: String,
    pub rating: f64,
    pub category: String,
}

/// Fields for a place to be created; the rating is sent as a number.
#[derive(Debug, Clone, Serialize)]
pub struct NewPlace {
    pub name: String,
    pub address: String,
    pub hours: String,
    pub rating: f64,
    pub category: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredUser {
    pub id: Uuid,
    pub email: String,
    pub admin: bool,
}

impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {} · {} · {:.1}",
            self.name, self.category, self.address, self.hours, self.rating
        )
    }
}
