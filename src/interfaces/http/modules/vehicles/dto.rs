//! Vehicle DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::vehicle::Vehicle;

/// Vehicle API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VehicleDto {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    /// sedan, suv, sports or exotic
    pub segment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Daily rate, two decimal places
    #[schema(value_type = String, example = "450.00")]
    pub price_per_day: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horsepower: Option<i32>,
    /// mph
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_speed: Option<i32>,
    /// 0-60 time, e.g. "2.9s"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceleration: Option<String>,
    pub image_url: String,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            name: v.name,
            brand: v.brand,
            segment: v.segment.as_str().to_string(),
            description: v.description,
            price_per_day: v.price_per_day,
            horsepower: v.horsepower,
            top_speed: v.top_speed,
            acceleration: v.acceleration,
            image_url: v.image_url,
            available: v.available,
            created_at: v.created_at,
        }
    }
}

/// Catalog filter
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct VehicleListQuery {
    /// Only vehicles of this segment
    pub segment: Option<String>,
}
