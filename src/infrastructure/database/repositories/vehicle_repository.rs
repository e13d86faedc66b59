//! SeaORM implementation of VehicleRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::pricing::round_currency;
use crate::domain::vehicle::{Segment, Vehicle, VehicleRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{cart_item, vehicle};

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(super) fn model_to_domain(m: vehicle::Model) -> DomainResult<Vehicle> {
    let segment = Segment::parse(&m.segment)
        .ok_or_else(|| DomainError::Storage(format!("Unknown segment '{}' on vehicle {}", m.segment, m.id)))?;
    Ok(Vehicle {
        id: m.id,
        name: m.name,
        brand: m.brand,
        segment,
        description: m.description,
        price_per_day: round_currency(m.price_per_day),
        horsepower: m.horsepower,
        top_speed: m.top_speed,
        acceleration: m.acceleration,
        image_url: m.image_url,
        available: m.available,
        created_at: m.created_at,
    })
}

fn domain_to_active(v: Vehicle) -> vehicle::ActiveModel {
    vehicle::ActiveModel {
        id: Set(v.id),
        name: Set(v.name),
        brand: Set(v.brand),
        segment: Set(v.segment.as_str().to_string()),
        description: Set(v.description),
        price_per_day: Set(v.price_per_day),
        horsepower: Set(v.horsepower),
        top_speed: Set(v.top_speed),
        acceleration: Set(v.acceleration),
        image_url: Set(v.image_url),
        available: Set(v.available),
        created_at: Set(v.created_at),
    }
}

// ── VehicleRepository impl ──────────────────────────────────────

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Vehicle>> {
        vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_available(&self, segment: Option<Segment>) -> DomainResult<Vec<Vehicle>> {
        let mut query = vehicle::Entity::find().filter(vehicle::Column::Available.eq(true));
        if let Some(segment) = segment {
            query = query.filter(vehicle::Column::Segment.eq(segment.as_str()));
        }
        query
            .order_by_asc(vehicle::Column::Name)
            .order_by_asc(vehicle::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn find_all(&self) -> DomainResult<Vec<Vehicle>> {
        vehicle::Entity::find()
            .order_by_desc(vehicle::Column::CreatedAt)
            .order_by_asc(vehicle::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }

    async fn save(&self, v: Vehicle) -> DomainResult<Vehicle> {
        debug!(vehicle_id = %v.id, name = %v.name, "Saving vehicle");
        let model = domain_to_active(v).insert(&self.db).await?;
        model_to_domain(model)
    }

    async fn update(&self, v: Vehicle) -> DomainResult<()> {
        debug!(vehicle_id = %v.id, "Updating vehicle");

        let existing = vehicle::Entity::find_by_id(v.id).one(&self.db).await?;
        if existing.is_none() {
            return Err(DomainError::not_found("Vehicle", v.id));
        }

        domain_to_active(v).update(&self.db).await?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        debug!(vehicle_id = %id, "Deleting vehicle");

        let txn = self.db.begin().await?;
        cart_item::Entity::delete_many()
            .filter(cart_item::Column::VehicleId.eq(id))
            .exec(&txn)
            .await?;
        let result = vehicle::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(DomainError::not_found("Vehicle", id));
        }
        txn.commit().await?;
        Ok(())
    }
}
