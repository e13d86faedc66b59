//! Admin fleet management

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::identity::RequestContext;
use crate::domain::vehicle::{FleetStats, SegmentImages, Vehicle, VehicleDraft};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// Vehicle CRUD for administrators. Every operation checks the caller's
/// role before touching storage.
pub struct InventoryService {
    repos: Arc<dyn RepositoryProvider>,
    images: SegmentImages,
}

impl InventoryService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, images: SegmentImages) -> Self {
        Self { repos, images }
    }

    pub async fn create(&self, ctx: &RequestContext, draft: VehicleDraft) -> DomainResult<Vehicle> {
        ctx.require_admin()?;
        let fields = draft.into_fields(&self.images)?;
        let vehicle = self.repos.vehicles().save(Vehicle::new(fields)).await?;
        info!(vehicle_id = %vehicle.id, name = %vehicle.name, "Vehicle created");
        Ok(vehicle)
    }

    /// Replace every editable attribute. Availability is left as it is.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        draft: VehicleDraft,
    ) -> DomainResult<Vehicle> {
        ctx.require_admin()?;
        let fields = draft.into_fields(&self.images)?;

        let mut vehicle = self
            .repos
            .vehicles()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", id))?;
        vehicle.apply(fields);
        self.repos.vehicles().update(vehicle.clone()).await?;

        info!(vehicle_id = %id, "Vehicle updated");
        Ok(vehicle)
    }

    /// Delete a vehicle. Cart items referencing it go too; order history
    /// keeps its snapshot.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> DomainResult<()> {
        ctx.require_admin()?;
        self.repos.vehicles().delete(id).await?;
        info!(vehicle_id = %id, "Vehicle deleted");
        Ok(())
    }

    /// Whole fleet, newest first
    pub async fn list_all(&self, ctx: &RequestContext) -> DomainResult<Vec<Vehicle>> {
        ctx.require_admin()?;
        self.repos.vehicles().find_all().await
    }

    pub async fn stats(&self, ctx: &RequestContext) -> DomainResult<FleetStats> {
        ctx.require_admin()?;
        let vehicles = self.repos.vehicles().find_all().await?;
        Ok(FleetStats::from_vehicles(&vehicles))
    }
}
