//! SeaORM implementation of CartRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::cart::{CartItem, CartLine, CartRepository, RentalWindow};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{cart_item, vehicle};

use super::vehicle_repository;

pub struct SeaOrmCartRepository {
    db: DatabaseConnection,
}

impl SeaOrmCartRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: cart_item::Model) -> CartItem {
    CartItem {
        id: m.id,
        user_id: m.user_id,
        vehicle_id: m.vehicle_id,
        window: RentalWindow {
            pickup_date: m.pickup_date,
            pickup_time: m.pickup_time,
            pickup_location: m.pickup_location,
            return_date: m.return_date,
            return_time: m.return_time,
            return_location: m.return_location,
        },
        rental_days: u32::try_from(m.rental_days.max(1)).unwrap_or(1),
        created_at: m.created_at,
    }
}

// ── CartRepository impl ─────────────────────────────────────────

#[async_trait]
impl CartRepository for SeaOrmCartRepository {
    async fn save(&self, item: CartItem) -> DomainResult<CartItem> {
        debug!(user_id = %item.user_id, vehicle_id = %item.vehicle_id, "Adding cart item");

        let model = cart_item::ActiveModel {
            id: Set(item.id),
            user_id: Set(item.user_id),
            vehicle_id: Set(item.vehicle_id),
            pickup_date: Set(item.window.pickup_date),
            pickup_time: Set(item.window.pickup_time),
            pickup_location: Set(item.window.pickup_location.clone()),
            return_date: Set(item.window.return_date),
            return_time: Set(item.window.return_time),
            return_location: Set(item.window.return_location.clone()),
            rental_days: Set(i32::try_from(item.rental_days).unwrap_or(i32::MAX)),
            created_at: Set(item.created_at),
        };
        model.insert(&self.db).await?;
        Ok(item)
    }

    async fn find_for_user(&self, user_id: Uuid) -> DomainResult<Vec<CartLine>> {
        let rows = cart_item::Entity::find()
            .filter(cart_item::Column::UserId.eq(user_id))
            .find_also_related(vehicle::Entity)
            .order_by_asc(cart_item::Column::CreatedAt)
            .order_by_asc(cart_item::Column::Id)
            .all(&self.db)
            .await?;

        let mut lines = Vec::with_capacity(rows.len());
        for (item, vehicle) in rows {
            let Some(vehicle) = vehicle else {
                return Err(DomainError::not_found("Vehicle", item.vehicle_id));
            };
            lines.push(CartLine {
                item: model_to_domain(item),
                vehicle: vehicle_repository::model_to_domain(vehicle)?,
            });
        }
        Ok(lines)
    }

    async fn count_for_user(&self, user_id: Uuid) -> DomainResult<u64> {
        Ok(cart_item::Entity::find()
            .filter(cart_item::Column::UserId.eq(user_id))
            .count(&self.db)
            .await?)
    }

    async fn delete(&self, user_id: Uuid, item_id: Uuid) -> DomainResult<()> {
        debug!(%user_id, %item_id, "Removing cart item");

        let result = cart_item::Entity::delete_many()
            .filter(cart_item::Column::Id.eq(item_id))
            .filter(cart_item::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("CartItem", item_id));
        }
        Ok(())
    }
}
