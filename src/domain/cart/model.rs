//! Cart domain entities

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::pricing::{self, Billable};
use crate::domain::vehicle::Vehicle;
use crate::shared::errors::DomainError;

/// Whole rental days between two dates: `max(1, ceil(days))`.
///
/// Dates carry no time component, so the day difference is already whole;
/// a same-day rental counts as one day.
pub fn rental_days(pickup: NaiveDate, return_date: NaiveDate) -> u32 {
    let days = (return_date - pickup).num_days();
    u32::try_from(days.max(1)).unwrap_or(u32::MAX)
}

/// Pickup and return details of one reservation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalWindow {
    pub pickup_date: NaiveDate,
    pub pickup_time: NaiveTime,
    pub pickup_location: String,
    pub return_date: NaiveDate,
    pub return_time: NaiveTime,
    pub return_location: String,
}

impl RentalWindow {
    /// Build a window, trimming locations and rejecting an inverted date range
    pub fn new(
        pickup_date: NaiveDate,
        pickup_time: NaiveTime,
        pickup_location: impl Into<String>,
        return_date: NaiveDate,
        return_time: NaiveTime,
        return_location: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let window = Self {
            pickup_date,
            pickup_time,
            pickup_location: pickup_location.into().trim().to_string(),
            return_date,
            return_time,
            return_location: return_location.into().trim().to_string(),
        };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.return_date < self.pickup_date {
            return Err(DomainError::validation(
                "return_date",
                "Return date must not be before pickup date",
            ));
        }
        if self.pickup_location.trim().is_empty() {
            return Err(DomainError::validation(
                "pickup_location",
                "Please enter a pickup location",
            ));
        }
        if self.return_location.trim().is_empty() {
            return Err(DomainError::validation(
                "return_location",
                "Please enter a return location",
            ));
        }
        Ok(())
    }

    pub fn rental_days(&self) -> u32 {
        rental_days(self.pickup_date, self.return_date)
    }
}

/// A pending reservation in a user's cart
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub vehicle_id: Uuid,
    pub window: RentalWindow,
    pub rental_days: u32,
    pub created_at: DateTime<Utc>,
}

impl CartItem {
    pub fn new(user_id: Uuid, vehicle_id: Uuid, window: RentalWindow) -> Self {
        let rental_days = window.rental_days();
        Self {
            id: Uuid::new_v4(),
            user_id,
            vehicle_id,
            window,
            rental_days,
            created_at: Utc::now(),
        }
    }
}

/// Cart item joined with the vehicle's current state
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: CartItem,
    pub vehicle: Vehicle,
}

impl Billable for CartLine {
    fn price_per_day(&self) -> Decimal {
        self.vehicle.price_per_day
    }

    fn rental_days(&self) -> u32 {
        self.item.rental_days
    }
}

/// Cart line with its subtotal at the current rate
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub line: CartLine,
    pub subtotal: Decimal,
}

/// Cart contents priced at current rates
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    pub lines: Vec<PricedLine>,
    pub total: Decimal,
}

impl CartSummary {
    pub fn new(lines: Vec<CartLine>) -> Result<Self, DomainError> {
        let total = pricing::total(&lines)?;
        let lines = lines
            .into_iter()
            .map(|line| {
                let subtotal = line.subtotal()?;
                Ok(PricedLine { line, subtotal })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(Self { lines, total })
    }
}

// ── Tests ──────────────────────────────────────────────────────
