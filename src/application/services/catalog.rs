//! Public vehicle catalog

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::vehicle::{Segment, Vehicle};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// Read-only storefront queries
pub struct CatalogService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CatalogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Vehicles that can still be rented, ordered by name
    pub async fn list_available(&self, segment: Option<Segment>) -> DomainResult<Vec<Vehicle>> {
        self.repos.vehicles().find_available(segment).await
    }

    /// A single vehicle, whether or not it is still available
    pub async fn get_by_id(&self, id: Uuid) -> DomainResult<Vehicle> {
        self.repos
            .vehicles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", id))
    }
}
