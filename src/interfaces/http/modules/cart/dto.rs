//! Cart DTOs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::domain::cart::{CartSummary, PricedLine, RentalWindow};
use crate::domain::pricing::format_amount;
use crate::domain::DomainError;
use crate::interfaces::http::modules::vehicles::VehicleDto;

fn default_time() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// Accepts `HH:MM` as sent by browser time inputs, or `HH:MM:SS`
fn time_of_day<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveTime::parse_from_str(&raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
        .map_err(|_| serde::de::Error::custom(format!("invalid time '{}'", raw)))
}

/// Request to reserve a vehicle for a rental window
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddToCartRequest {
    pub vehicle_id: Uuid,
    pub pickup_date: NaiveDate,
    /// Defaults to 10:00
    #[serde(default = "default_time", deserialize_with = "time_of_day")]
    #[schema(value_type = String, example = "10:00")]
    pub pickup_time: NaiveTime,
    #[validate(length(min = 1, max = 200, message = "Please enter a pickup location"))]
    pub pickup_location: String,
    pub return_date: NaiveDate,
    /// Defaults to 10:00
    #[serde(default = "default_time", deserialize_with = "time_of_day")]
    #[schema(value_type = String, example = "10:00")]
    pub return_time: NaiveTime,
    #[validate(length(min = 1, max = 200, message = "Please enter a return location"))]
    pub return_location: String,
}

impl AddToCartRequest {
    pub fn into_window(self) -> Result<(Uuid, RentalWindow), DomainError> {
        let window = RentalWindow::new(
            self.pickup_date,
            self.pickup_time,
            self.pickup_location,
            self.return_date,
            self.return_time,
            self.return_location,
        )?;
        Ok((self.vehicle_id, window))
    }
}

/// Newly added cart item
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartItemCreated {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub rental_days: u32,
    pub created_at: DateTime<Utc>,
}

/// Cart line priced at the vehicle's current rate
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartItemDto {
    pub id: Uuid,
    pub vehicle: VehicleDto,
    pub pickup_date: NaiveDate,
    #[schema(value_type = String)]
    pub pickup_time: NaiveTime,
    pub pickup_location: String,
    pub return_date: NaiveDate,
    #[schema(value_type = String)]
    pub return_time: NaiveTime,
    pub return_location: String,
    pub rental_days: u32,
    #[schema(value_type = String, example = "900.00")]
    pub subtotal: Decimal,
}

impl From<PricedLine> for CartItemDto {
    fn from(PricedLine { line, subtotal }: PricedLine) -> Self {
        let w = line.item.window;
        Self {
            id: line.item.id,
            vehicle: line.vehicle.into(),
            pickup_date: w.pickup_date,
            pickup_time: w.pickup_time,
            pickup_location: w.pickup_location,
            return_date: w.return_date,
            return_time: w.return_time,
            return_location: w.return_location,
            rental_days: line.item.rental_days,
            subtotal,
        }
    }
}

/// Whole cart with total
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartDto {
    pub items: Vec<CartItemDto>,
    #[schema(value_type = String, example = "1300.00")]
    pub total: Decimal,
    /// Total formatted for display, e.g. "1300.00 USD"
    pub total_display: String,
}

impl CartDto {
    pub fn new(summary: CartSummary, currency: &str) -> Self {
        Self {
            total_display: format_amount(summary.total, currency),
            total: summary.total,
            items: summary.lines.into_iter().map(CartItemDto::from).collect(),
        }
    }
}

/// Badge count for the navigation bar
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartCountDto {
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_default_to_ten_and_accept_short_form() {
        let request: AddToCartRequest = serde_json::from_value(serde_json::json!({
            "vehicle_id": Uuid::new_v4(),
            "pickup_date": "2025-08-01",
            "pickup_location": "Monaco",
            "return_date": "2025-08-03",
            "return_time": "18:30",
            "return_location": "Nice"
        }))
        .unwrap();
        assert_eq!(request.pickup_time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(request.return_time, NaiveTime::from_hms_opt(18, 30, 0).unwrap());

        let (_, window) = request.into_window().unwrap();
        assert_eq!(window.rental_days(), 2);
    }

    #[test]
    fn inverted_dates_are_rejected() {
        let request: AddToCartRequest = serde_json::from_value(serde_json::json!({
            "vehicle_id": Uuid::new_v4(),
            "pickup_date": "2025-08-05",
            "pickup_location": "Monaco",
            "return_date": "2025-08-01",
            "return_location": "Nice"
        }))
        .unwrap();
        assert!(matches!(
            request.into_window(),
            Err(DomainError::Validation { field, .. }) if field == "return_date"
        ));
    }
}
