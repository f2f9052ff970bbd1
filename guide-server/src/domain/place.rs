use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Place {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub hours: String,
    pub rating: f64,
    pub category: String,
}

/// Validated fields for a place that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlace {
    pub name: String,
    pub address: String,
    pub hours: String,
    pub rating: f64,
    pub category: String,
}

impl Place {
    pub fn new(fields: NewPlace) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: fields.name,
            address: fields.address,
            hours: fields.hours,
            rating: fields.rating,
            category: fields.category,
        }
    }
}

/// The fixed catalogue loaded by the seed endpoint.
pub fn demo_places() -> Vec<Place> {
    [
        ("Chopada Medness", "Av. Exemplo, 123", "22:00", 4.8, "Festas"),
        ("Boteco Woods", "Rua Secundária, 45", "18:00", 4.5, "Bares"),
        ("Bar do Zé", "Praça Central, 10", "17:00", 4.2, "Bares"),
    ]
    .into_iter()
    .map(|(name, address, hours, rating, category)| {
        Place::new(NewPlace {
            name: name.to_string(),
            address: address.to_string(),
            hours: hours.to_string(),
            rating,
            category: category.to_string(),
        })
    })
    .collect()
}
