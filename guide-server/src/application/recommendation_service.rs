use std::collections::BTreeMap;
use std::sync::Arc;

use crate::data::place_repository::PlaceRepository;
use crate::domain::{error::DomainError, place::Place};
use tracing::{debug, instrument};

/// Upper bound on how many places a flow returns.
pub const FLOW_SIZE: usize = 3;

pub struct RecommendationService<R: PlaceRepository + ?Sized + 'static> {
    repo: Arc<R>,
}

impl<R> RecommendationService<R>
where
    R: PlaceRepository + ?Sized + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Up to [`FLOW_SIZE`] places from the most populated category, in store order.
    #[instrument(skip(self))]
    pub async fn recommend(&self) -> Result<Vec<Place>, DomainError> {
        let counts = self.repo.count_by_category().await?;
        let Some(category) = top_category(&counts) else {
            return Ok(Vec::new());
        };

        debug!(category, total = counts[category], "flow category picked");
        self.repo.find_by_category(category, Some(FLOW_SIZE)).await
    }
}

/// Highest count wins; ties go to the alphabetically first category.
pub fn top_category(counts: &BTreeMap<String, u64>) -> Option<&str> {
    let mut best: Option<(&str, u64)> = None;
    // BTreeMap iterates in key order, so a strict `>` keeps the first of equals
    for (category, &total) in counts {
        if total == 0 {
            continue;
        }
        if best.is_none_or(|(_, top)| total > top) {
            best = Some((category.as_str(), total));
        }
    }
    best.map(|(category, _)| category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::place_repository::InMemoryPlaceRepository;
    use crate::domain::place::NewPlace;
    use async_trait::async_trait;

    /// A store whose backend is gone.
    struct UnreachableStore;

    #[async_trait]
    impl PlaceRepository for UnreachableStore {
        async fn create(&self, _place: Place) -> Result<Place, DomainError> {
            Err(DomainError::Persistence("pool timed out".into()))
        }
        async fn find_by_category(
            &self,
            _category: &str,
            _limit: Option<usize>,
        ) -> Result<Vec<Place>, DomainError> {
            Err(DomainError::Persistence("pool timed out".into()))
        }
        async fn count_by_category(&self) -> Result<BTreeMap<String, u64>, DomainError> {
            Err(DomainError::Persistence("pool timed out".into()))
        }
        async fn replace_all(&self, _places: Vec<Place>) -> Result<usize, DomainError> {
            Err(DomainError::Persistence("pool timed out".into()))
        }
    }

    async fn seed(repo: &InMemoryPlaceRepository, category: &str, n: usize) {
        for i in 0..n {
            repo.create(Place::new(NewPlace {
                name: format!("{category} {i}"),
                address: format!("Rua {i}"),
                hours: "20:00".into(),
                rating: 5.0 - i as f64 * 0.5,
                category: category.into(),
            }))
            .await
            .unwrap();
        }
    }

    #[test]
    fn top_category_prefers_highest_count() {
        let counts = BTreeMap::from([("A".to_string(), 5), ("B".to_string(), 3)]);
        assert_eq!(top_category(&counts), Some("A"));

        let counts = BTreeMap::from([("A".to_string(), 1), ("B".to_string(), 3)]);
        assert_eq!(top_category(&counts), Some("B"));
    }

    #[test]
    fn top_category_breaks_ties_alphabetically() {
        let counts = BTreeMap::from([
            ("Festas".to_string(), 2),
            ("Bares".to_string(), 2),
            ("Cafés".to_string(), 1),
        ]);
        assert_eq!(top_category(&counts), Some("Bares"));
    }

    #[test]
    fn top_category_of_nothing_is_none() {
        assert_eq!(top_category(&BTreeMap::new()), None);
    }

    #[tokio::test]
    async fn flow_comes_from_largest_category_only() {
        let repo = Arc::new(InMemoryPlaceRepository::new());
        seed(&repo, "B", 3).await;
        seed(&repo, "A", 5).await;

        let flow = RecommendationService::new(repo).recommend().await.unwrap();
        assert_eq!(flow.len(), FLOW_SIZE);
        assert!(flow.iter().all(|p| p.category == "A"));
        let names: Vec<_> = flow.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["A 0", "A 1", "A 2"]);
    }

    #[tokio::test]
    async fn flow_returns_fewer_when_category_is_small() {
        let repo = Arc::new(InMemoryPlaceRepository::new());
        seed(&repo, "Festas", 1).await;
        seed(&repo, "Bares", 2).await;

        let flow = RecommendationService::new(repo).recommend().await.unwrap();
        assert_eq!(flow.len(), 2);
        assert!(flow.iter().all(|p| p.category == "Bares"));
    }

    #[tokio::test]
    async fn empty_store_gives_empty_flow() {
        let repo = Arc::new(InMemoryPlaceRepository::new());
        let flow = RecommendationService::new(repo).recommend().await.unwrap();
        assert!(flow.is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_not_an_empty_flow() {
        let err = RecommendationService::new(Arc::new(UnreachableStore))
            .recommend()
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
    }
}
