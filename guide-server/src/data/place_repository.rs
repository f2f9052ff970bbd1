use std::collections::BTreeMap;

use crate::domain::error::DomainError;
use crate::domain::place::Place;
use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Raw place storage. Callers are trusted: admin checks happen before a
/// write ever reaches this layer.
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    async fn create(&self, place: Place) -> Result<Place, DomainError>;
    async fn find_by_category(
        &self,
        category: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Place>, DomainError>;
    async fn count_by_category(&self) -> Result<BTreeMap<String, u64>, DomainError>;
    /// Drops every stored place and stores `places` instead.
    async fn replace_all(&self, places: Vec<Place>) -> Result<usize, DomainError>;
}

#[derive(Clone)]
pub struct PostgresPlaceRepository {
    pool: PgPool,
}

impl PostgresPlaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaceRepository for PostgresPlaceRepository {
    async fn create(&self, place: Place) -> Result<Place, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO places (id, name, address, hours, rating, category)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(place.id)
        .bind(&place.name)
        .bind(&place.address)
        .bind(&place.hours)
        .bind(place.rating)
        .bind(&place.category)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create place: {}", e);
            DomainError::Persistence(format!("database error: {}", e))
        })?;

        info!(place_id = %place.id, category = %place.category, "place created");
        Ok(place)
    }

    async fn find_by_category(
        &self,
        category: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Place>, DomainError> {
        // NULL disables the limit
        let limit = limit.map(|l| l as i64);

        sqlx::query_as::<_, Place>(
            r#"
            SELECT id, name, address, hours, rating, category
            FROM places
            WHERE category = $1
            LIMIT $2
            "#,
        )
        .bind(category)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while fetching places for {}: {}", category, e);
            DomainError::Persistence(e.to_string())
        })
    }

    async fn count_by_category(&self) -> Result<BTreeMap<String, u64>, DomainError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT category, COUNT(*) AS total
            FROM places
            GROUP BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while counting places: {}", e);
            DomainError::Persistence(e.to_string())
        })?;

        Ok(rows
            .into_iter()
            .map(|(category, total)| (category, total.max(0) as u64))
            .collect())
    }

    async fn replace_all(&self, places: Vec<Place>) -> Result<usize, DomainError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM places").execute(&mut *tx).await?;
        for place in &places {
            sqlx::query(
                r#"
                INSERT INTO places (id, name, address, hours, rating, category)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(place.id)
            .bind(&place.name)
            .bind(&place.address)
            .bind(&place.hours)
            .bind(place.rating)
            .bind(&place.category)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        info!(inserted = places.len(), "places replaced");
        Ok(places.len())
    }
}

/// Keeps places in insertion order.
#[derive(Default)]
pub struct InMemoryPlaceRepository {
    places: RwLock<Vec<Place>>,
}

impl InMemoryPlaceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlaceRepository for InMemoryPlaceRepository {
    async fn create(&self, place: Place) -> Result<Place, DomainError> {
        self.places.write().await.push(place.clone());
        info!(place_id = %place.id, category = %place.category, "place created");
        Ok(place)
    }

    async fn find_by_category(
        &self,
        category: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Place>, DomainError> {
        Ok(self
            .places
            .read()
            .await
            .iter()
            .filter(|p| p.category == category)
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count_by_category(&self) -> Result<BTreeMap<String, u64>, DomainError> {
        let mut counts = BTreeMap::new();
        for place in self.places.read().await.iter() {
            *counts.entry(place.category.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn replace_all(&self, places: Vec<Place>) -> Result<usize, DomainError> {
        let inserted = places.len();
        *self.places.write().await = places;
        info!(inserted, "places replaced");
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::place::{NewPlace, demo_places};

    fn place(name: &str, category: &str) -> Place {
        Place::new(NewPlace {
            name: name.into(),
            address: "Rua 1".into(),
            hours: "18:00".into(),
            rating: 4.0,
            category: category.into(),
        })
    }

    #[tokio::test]
    async fn counts_group_by_category() {
        let repo = InMemoryPlaceRepository::new();
        for (name, category) in [("a", "Bares"), ("b", "Festas"), ("c", "Bares")] {
            repo.create(place(name, category)).await.unwrap();
        }

        let counts = repo.count_by_category().await.unwrap();
        assert_eq!(counts.get("Bares"), Some(&2));
        assert_eq!(counts.get("Festas"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[tokio::test]
    async fn category_lookup_is_exact_and_bounded() {
        let repo = InMemoryPlaceRepository::new();
        for name in ["a", "b", "c", "d"] {
            repo.create(place(name, "Bares")).await.unwrap();
        }
        repo.create(place("e", "bares")).await.unwrap();

        assert_eq!(repo.find_by_category("Bares", None).await.unwrap().len(), 4);
        let limited = repo.find_by_category("Bares", Some(3)).await.unwrap();
        let names: Vec<_> = limited.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
        assert!(repo.find_by_category("Cafés", None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn replace_all_drops_previous_places() {
        let repo = InMemoryPlaceRepository::new();
        repo.create(place("old", "Museus")).await.unwrap();

        let inserted = repo.replace_all(demo_places()).await.unwrap();
        assert_eq!(inserted, 3);
        assert!(repo.find_by_category("Museus", None).await.unwrap().is_empty());
        assert_eq!(repo.find_by_category("Bares", None).await.unwrap().len(), 2);
    }
}
