//! Vehicle repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{Segment, Vehicle};
use crate::domain::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Vehicle>>;

    /// Vehicles with `available = true`, optionally restricted to one
    /// segment, ordered by name then id
    async fn find_available(&self, segment: Option<Segment>) -> DomainResult<Vec<Vehicle>>;

    /// Every vehicle, newest first
    async fn find_all(&self) -> DomainResult<Vec<Vehicle>>;

    async fn save(&self, vehicle: Vehicle) -> DomainResult<Vehicle>;

    async fn update(&self, vehicle: Vehicle) -> DomainResult<()>;

    /// Delete a vehicle; fails with `NotFound` if absent
    async fn delete(&self, id: Uuid) -> DomainResult<()>;
}
