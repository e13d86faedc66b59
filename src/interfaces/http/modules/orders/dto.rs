//! Order DTOs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::order::{Order, OrderItem};

/// One reserved vehicle within an order, as it was at checkout
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderItemDto {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub vehicle_name: String,
    pub vehicle_brand: String,
    pub vehicle_image_url: String,
    pub pickup_date: NaiveDate,
    #[schema(value_type = String)]
    pub pickup_time: NaiveTime,
    pub pickup_location: String,
    pub return_date: NaiveDate,
    #[schema(value_type = String)]
    pub return_time: NaiveTime,
    pub return_location: String,
    #[schema(value_type = String, example = "450.00")]
    pub price_per_day: Decimal,
    pub rental_days: u32,
    #[schema(value_type = String, example = "900.00")]
    pub subtotal: Decimal,
}

impl From<OrderItem> for OrderItemDto {
    fn from(item: OrderItem) -> Self {
        let w = item.window;
        Self {
            id: item.id,
            vehicle_id: item.vehicle_id,
            vehicle_name: item.vehicle.name,
            vehicle_brand: item.vehicle.brand,
            vehicle_image_url: item.vehicle.image_url,
            pickup_date: w.pickup_date,
            pickup_time: w.pickup_time,
            pickup_location: w.pickup_location,
            return_date: w.return_date,
            return_time: w.return_time,
            return_location: w.return_location,
            price_per_day: item.price_per_day,
            rental_days: item.rental_days,
            subtotal: item.subtotal,
        }
    }
}

/// Order API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderDto {
    pub id: Uuid,
    pub user_id: Uuid,
    #[schema(value_type = String, example = "1300.00")]
    pub total_amount: Decimal,
    /// pending or confirmed
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemDto>,
}

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            total_amount: order.total_amount,
            status: order.status.as_str().to_string(),
            created_at: order.created_at,
            items: order.items.into_iter().map(OrderItemDto::from).collect(),
        }
    }
}
