//! SeaORM implementation of OrderRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Select};
use uuid::Uuid;

use crate::domain::cart::RentalWindow;
use crate::domain::order::{Order, OrderItem, OrderRepository, OrderStatus};
use crate::domain::pricing::round_currency;
use crate::domain::vehicle::VehicleSnapshot;
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{order, order_item};

pub struct SeaOrmOrderRepository {
    db: DatabaseConnection,
}

impl SeaOrmOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn item_to_domain(m: order_item::Model) -> OrderItem {
    OrderItem {
        id: m.id,
        order_id: m.order_id,
        vehicle_id: m.vehicle_id,
        window: RentalWindow {
            pickup_date: m.pickup_date,
            pickup_time: m.pickup_time,
            pickup_location: m.pickup_location,
            return_date: m.return_date,
            return_time: m.return_time,
            return_location: m.return_location,
        },
        price_per_day: round_currency(m.price_per_day),
        rental_days: u32::try_from(m.rental_days.max(1)).unwrap_or(1),
        subtotal: round_currency(m.subtotal),
        vehicle: VehicleSnapshot {
            name: m.vehicle_name,
            brand: m.vehicle_brand,
            image_url: m.vehicle_image_url,
        },
    }
}

pub(super) fn item_to_active(item: &OrderItem, position: usize) -> order_item::ActiveModel {
    use sea_orm::Set;

    order_item::ActiveModel {
        id: Set(item.id),
        order_id: Set(item.order_id),
        vehicle_id: Set(item.vehicle_id),
        position: Set(i32::try_from(position).unwrap_or(i32::MAX)),
        pickup_date: Set(item.window.pickup_date),
        pickup_time: Set(item.window.pickup_time),
        pickup_location: Set(item.window.pickup_location.clone()),
        return_date: Set(item.window.return_date),
        return_time: Set(item.window.return_time),
        return_location: Set(item.window.return_location.clone()),
        price_per_day: Set(item.price_per_day),
        rental_days: Set(i32::try_from(item.rental_days).unwrap_or(i32::MAX)),
        subtotal: Set(item.subtotal),
        vehicle_name: Set(item.vehicle.name.clone()),
        vehicle_brand: Set(item.vehicle.brand.clone()),
        vehicle_image_url: Set(item.vehicle.image_url.clone()),
    }
}

fn order_to_domain(m: order::Model, items: Vec<OrderItem>) -> DomainResult<Order> {
    let status = OrderStatus::parse(&m.status)
        .ok_or_else(|| DomainError::Storage(format!("Unknown order status '{}'", m.status)))?;
    Ok(Order {
        id: m.id,
        user_id: m.user_id,
        total_amount: round_currency(m.total_amount),
        status,
        created_at: m.created_at,
        items,
    })
}

impl SeaOrmOrderRepository {
    /// Run an order query and attach every order's items in cart order
    async fn load(&self, query: Select<order::Entity>) -> DomainResult<Vec<Order>> {
        let rows = query
            .order_by_desc(order::Column::CreatedAt)
            .order_by_asc(order::Column::Id)
            .find_with_related(order_item::Entity)
            .all(&self.db)
            .await?;

        rows.into_iter()
            .map(|(header, mut items)| {
                items.sort_by_key(|i| i.position);
                order_to_domain(header, items.into_iter().map(item_to_domain).collect())
            })
            .collect()
    }
}

// ── OrderRepository impl ────────────────────────────────────────

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Order>> {
        let mut orders = self
            .load(order::Entity::find().filter(order::Column::Id.eq(id)))
            .await?;
        Ok(orders.pop())
    }

    async fn find_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Order>> {
        self.load(order::Entity::find().filter(order::Column::UserId.eq(user_id)))
            .await
    }

    async fn find_all(&self) -> DomainResult<Vec<Order>> {
        self.load(order::Entity::find()).await
    }
}
