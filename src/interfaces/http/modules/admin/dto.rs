//! Admin DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::vehicle::{FleetStats, VehicleDraft};

/// Vehicle attributes for create and update
#[derive(Debug, Deserialize, ToSchema)]
pub struct VehicleRequest {
    pub name: String,
    pub brand: String,
    /// sedan, suv, sports or exotic
    pub segment: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "450.00")]
    pub price_per_day: Decimal,
    pub horsepower: Option<i32>,
    pub top_speed: Option<i32>,
    pub acceleration: Option<String>,
    /// Segment artwork is used when omitted
    pub image_url: Option<String>,
}

impl From<VehicleRequest> for VehicleDraft {
    fn from(r: VehicleRequest) -> Self {
        Self {
            name: r.name,
            brand: r.brand,
            segment: r.segment,
            description: r.description,
            price_per_day: r.price_per_day,
            horsepower: r.horsepower,
            top_speed: r.top_speed,
            acceleration: r.acceleration,
            image_url: r.image_url,
        }
    }
}

/// Fleet counters for the dashboard header
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FleetStatsDto {
    pub total: u64,
    pub available: u64,
    pub booked: u64,
}

impl From<FleetStats> for FleetStatsDto {
    fn from(s: FleetStats) -> Self {
        Self {
            total: s.total,
            available: s.available,
            booked: s.booked,
        }
    }
}
