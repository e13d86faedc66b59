//! Order domain entities

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::cart::{CartLine, RentalWindow};
use crate::domain::pricing::{self, Billable};
use crate::domain::vehicle::VehicleSnapshot;
use crate::shared::errors::DomainError;

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    /// Placed through checkout
    Confirmed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Purchased reservation with pricing frozen at checkout
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub vehicle_id: Uuid,
    pub window: RentalWindow,
    pub price_per_day: Decimal,
    pub rental_days: u32,
    pub subtotal: Decimal,
    pub vehicle: VehicleSnapshot,
}

impl OrderItem {
    /// Snapshot a cart line into an order item. Price and display data
    /// come from the vehicle as read during validation.
    pub fn from_cart_line(order_id: Uuid, line: &CartLine) -> Result<Self, DomainError> {
        Ok(Self {
            id: Uuid::new_v4(),
            order_id,
            vehicle_id: line.vehicle.id,
            window: line.item.window.clone(),
            price_per_day: line.vehicle.price_per_day,
            rental_days: line.item.rental_days,
            subtotal: line.subtotal()?,
            vehicle: line.vehicle.snapshot(),
        })
    }
}

impl Billable for OrderItem {
    fn price_per_day(&self) -> Decimal {
        self.price_per_day
    }

    fn rental_days(&self) -> u32 {
        self.rental_days
    }

    /// Stored value; never recomputed from a later price
    fn subtotal(&self) -> Result<Decimal, DomainError> {
        Ok(self.subtotal)
    }
}

/// Immutable order with its items
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Build a confirmed order from validated cart lines
    pub fn from_cart(user_id: Uuid, lines: &[CartLine]) -> Result<Self, DomainError> {
        let id = Uuid::new_v4();
        let items = lines
            .iter()
            .map(|line| OrderItem::from_cart_line(id, line))
            .collect::<Result<Vec<_>, _>>()?;
        let total_amount = pricing::total(&items)?;

        Ok(Self {
            id,
            user_id,
            total_amount,
            status: OrderStatus::Confirmed,
            created_at: Utc::now(),
            items,
        })
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::CartItem;
    use crate::domain::vehicle::{SegmentImages, Vehicle, VehicleDraft};
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal_macros::dec;

    fn vehicle(price: Decimal) -> Vehicle {
        let fields = VehicleDraft {
            name: "Continental GT".into(),
            brand: "Bentley".into(),
            segment: "sedan".into(),
            description: None,
            price_per_day: price,
            horsepower: None,
            top_speed: None,
            acceleration: None,
            image_url: None,
        }
        .into_fields(&SegmentImages::default())
        .unwrap();
        Vehicle::new(fields)
    }

    fn line(price: Decimal, days: i64) -> CartLine {
        let pickup = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let time = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let window = RentalWindow::new(
            pickup,
            time,
            "Airport",
            pickup + chrono::Duration::days(days),
            time,
            "Airport",
        )
        .unwrap();
        let v = vehicle(price);
        CartLine {
            item: CartItem::new(Uuid::new_v4(), v.id, window),
            vehicle: v,
        }
    }

    #[test]
    fn order_totals_its_items() {
        let lines = vec![line(dec!(100), 3), line(dec!(50), 2)];
        let order = Order::from_cart(Uuid::new_v4(), &lines).unwrap();

        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.total_amount, dec!(400.00));
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.items[0].subtotal, dec!(300.00));
        assert_eq!(order.items[1].subtotal, dec!(100.00));
        assert!(order.items.iter().all(|i| i.order_id == order.id));
    }

    #[test]
    fn item_snapshot_ignores_later_price_changes() {
        let mut l = line(dec!(250), 2);
        let item = OrderItem::from_cart_line(Uuid::new_v4(), &l).unwrap();

        l.vehicle.price_per_day = dec!(999);
        assert_eq!(item.price_per_day, dec!(250));
        assert_eq!(item.subtotal().unwrap(), dec!(500.00));
        assert_eq!(item.vehicle.brand, "Bentley");
    }

    #[test]
    fn status_parse_roundtrip() {
        for status in [OrderStatus::Pending, OrderStatus::Confirmed] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("shipped"), None);
    }
}
