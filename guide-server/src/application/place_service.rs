use std::sync::Arc;

use crate::data::place_repository::PlaceRepository;
use crate::domain::place::{NewPlace, Place, demo_places};
use crate::domain::{error::DomainError, user::AdminGrant};
use tracing::{info, instrument};

pub struct PlaceService<R: PlaceRepository + ?Sized + 'static> {
    repo: Arc<R>,
}

impl<R> PlaceService<R>
where
    R: PlaceRepository + ?Sized + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, grant), fields(admin_id = %grant.user_id()))]
    pub async fn create_place(
        &self,
        grant: &AdminGrant,
        fields: NewPlace,
    ) -> Result<Place, DomainError> {
        self.repo.create(Place::new(fields)).await
    }

    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Place>, DomainError> {
        self.repo.find_by_category(category, None).await
    }

    /// Replaces the whole catalogue with the demo places.
    #[instrument(skip(self, grant), fields(admin_id = %grant.user_id()))]
    pub async fn seed_demo_data(&self, grant: &AdminGrant) -> Result<usize, DomainError> {
        let inserted = self.repo.replace_all(demo_places()).await?;
        info!(inserted, "demo data seeded");
        Ok(inserted)
    }
}
