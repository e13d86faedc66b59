//! Vehicle domain entity

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::domain::pricing::{round_currency, MAX_PRICE_PER_DAY};
use crate::shared::errors::DomainError;
use crate::shared::validations::first_violation;

/// Fleet segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Sedan,
    Suv,
    Sports,
    Exotic,
}

impl Segment {
    pub const ALL: [Segment; 4] = [Self::Sedan, Self::Suv, Self::Sports, Self::Exotic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sedan => "sedan",
            Self::Suv => "suv",
            Self::Sports => "sports",
            Self::Exotic => "exotic",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sedan" => Some(Self::Sedan),
            "suv" => Some(Self::Suv),
            "sports" => Some(Self::Sports),
            "exotic" => Some(Self::Exotic),
            _ => None,
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fallback artwork used when a vehicle is saved without an image URL
#[derive(Debug, Clone)]
pub struct SegmentImages {
    images: HashMap<Segment, String>,
}

impl SegmentImages {
    pub fn new(images: HashMap<Segment, String>) -> Self {
        let mut merged = Self::default();
        merged.images.extend(images);
        merged
    }

    pub fn for_segment(&self, segment: Segment) -> &str {
        self.images
            .get(&segment)
            .map(String::as_str)
            .unwrap_or("/assets/car-sedan.jpg")
    }
}

impl Default for SegmentImages {
    fn default() -> Self {
        let images = Segment::ALL
            .iter()
            .map(|s| (*s, format!("/assets/car-{}.jpg", s.as_str())))
            .collect();
        Self { images }
    }
}

/// Rental vehicle
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub segment: Segment,
    pub description: Option<String>,
    /// Daily rate, two decimal places
    pub price_per_day: Decimal,
    pub horsepower: Option<i32>,
    /// Top speed in mph
    pub top_speed: Option<i32>,
    /// 0-60 time as displayed, e.g. "2.9s"
    pub acceleration: Option<String>,
    pub image_url: String,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(fields: VehicleFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: fields.name,
            brand: fields.brand,
            segment: fields.segment,
            description: fields.description,
            price_per_day: fields.price_per_day,
            horsepower: fields.horsepower,
            top_speed: fields.top_speed,
            acceleration: fields.acceleration,
            image_url: fields.image_url,
            available: true,
            created_at: Utc::now(),
        }
    }

    /// Replace every editable attribute. Identity, availability and
    /// creation time are kept.
    pub fn apply(&mut self, fields: VehicleFields) {
        self.name = fields.name;
        self.brand = fields.brand;
        self.segment = fields.segment;
        self.description = fields.description;
        self.price_per_day = fields.price_per_day;
        self.horsepower = fields.horsepower;
        self.top_speed = fields.top_speed;
        self.acceleration = fields.acceleration;
        self.image_url = fields.image_url;
    }

    /// Display data frozen into order history at purchase time
    pub fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            name: self.name.clone(),
            brand: self.brand.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// Vehicle display data copied into an order item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleSnapshot {
    pub name: String,
    pub brand: String,
    pub image_url: String,
}

/// Validated, typed vehicle attributes ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleFields {
    pub name: String,
    pub brand: String,
    pub segment: Segment,
    pub description: Option<String>,
    pub price_per_day: Decimal,
    pub horsepower: Option<i32>,
    pub top_speed: Option<i32>,
    pub acceleration: Option<String>,
    pub image_url: String,
}

fn validate_segment(segment: &str) -> Result<(), ValidationError> {
    if Segment::parse(segment).is_some() {
        Ok(())
    } else {
        let mut err = ValidationError::new("segment");
        err.message = Some("Segment must be one of sedan, suv, sports, exotic".into());
        Err(err)
    }
}

/// Runs on the price already rounded to cents
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    let message = if price.is_sign_negative() || price.is_zero() {
        "Price must be positive"
    } else if *price > MAX_PRICE_PER_DAY {
        "Price must be at most 1000000 per day"
    } else {
        return Ok(());
    };
    let mut err = ValidationError::new("price_per_day");
    err.message = Some(message.into());
    Err(err)
}

/// Raw vehicle attributes as submitted by the admin dashboard.
///
/// [`VehicleDraft::into_fields`] is the one validation path shared by the
/// HTTP layer and the inventory service.
#[derive(Debug, Clone, Validate)]
pub struct VehicleDraft {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,
    #[validate(length(min = 2, max = 50, message = "Brand must be 2-50 characters"))]
    pub brand: String,
    #[validate(custom(function = "validate_segment"))]
    pub segment: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_price"))]
    pub price_per_day: Decimal,
    #[validate(range(min = 1, message = "Horsepower must be positive"))]
    pub horsepower: Option<i32>,
    #[validate(range(min = 1, message = "Top speed must be positive"))]
    pub top_speed: Option<i32>,
    #[validate(length(max = 20, message = "Acceleration must be at most 20 characters"))]
    pub acceleration: Option<String>,
    #[validate(url(message = "Invalid image URL"), length(max = 2000, message = "Image URL is too long"))]
    pub image_url: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl VehicleDraft {
    /// Trim text, treat blank optional fields as omitted and round the
    /// price to cents
    fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            brand: self.brand.trim().to_string(),
            segment: self.segment.trim().to_lowercase(),
            description: non_blank(self.description),
            price_per_day: round_currency(self.price_per_day),
            horsepower: self.horsepower,
            top_speed: self.top_speed,
            acceleration: non_blank(self.acceleration),
            image_url: non_blank(self.image_url),
        }
    }

    /// Validate and convert into typed fields. A missing image falls back
    /// to the segment artwork.
    pub fn into_fields(self, images: &SegmentImages) -> Result<VehicleFields, DomainError> {
        let draft = self.normalized();
        draft.validate().map_err(|e| first_violation(&e))?;

        let segment = Segment::parse(&draft.segment).ok_or_else(|| {
            DomainError::validation("segment", "Segment must be one of sedan, suv, sports, exotic")
        })?;
        let image_url = draft
            .image_url
            .unwrap_or_else(|| images.for_segment(segment).to_string());

        Ok(VehicleFields {
            name: draft.name,
            brand: draft.brand,
            segment,
            description: draft.description,
            price_per_day: draft.price_per_day,
            horsepower: draft.horsepower,
            top_speed: draft.top_speed,
            acceleration: draft.acceleration,
            image_url,
        })
    }
}

/// Inventory counters for the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FleetStats {
    pub total: u64,
    pub available: u64,
    pub booked: u64,
}

impl FleetStats {
    pub fn from_vehicles<'a>(vehicles: impl IntoIterator<Item = &'a Vehicle>) -> Self {
        vehicles.into_iter().fold(Self::default(), |mut acc, v| {
            acc.total += 1;
            if v.available {
                acc.available += 1;
            } else {
                acc.booked += 1;
            }
            acc
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn draft() -> VehicleDraft {
        VehicleDraft {
            name: "Huracán EVO".into(),
            brand: "Lamborghini".into(),
            segment: "exotic".into(),
            description: Some("V10, rear-wheel drive".into()),
            price_per_day: dec!(1200),
            horsepower: Some(631),
            top_speed: Some(202),
            acceleration: Some("2.9s".into()),
            image_url: Some("https://cdn.example.com/huracan.jpg".into()),
        }
    }

    fn violation_field(result: Result<VehicleFields, DomainError>) -> String {
        match result {
            Err(DomainError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_draft_converts() {
        let fields = draft().into_fields(&SegmentImages::default()).unwrap();
        assert_eq!(fields.segment, Segment::Exotic);
        assert_eq!(fields.price_per_day, dec!(1200.00));
        assert_eq!(fields.image_url, "https://cdn.example.com/huracan.jpg");
    }

    #[test]
    fn blank_image_falls_back_to_segment_art() {
        let mut d = draft();
        d.image_url = Some("   ".into());
        let fields = d.into_fields(&SegmentImages::default()).unwrap();
        assert_eq!(fields.image_url, "/assets/car-exotic.jpg");
    }

    #[test]
    fn configured_segment_art_overrides_default() {
        let mut d = draft();
        d.image_url = None;
        d.segment = "suv".into();
        let images = SegmentImages::new(HashMap::from([(
            Segment::Suv,
            "https://cdn.example.com/suv.jpg".to_string(),
        )]));
        let fields = d.into_fields(&images).unwrap();
        assert_eq!(fields.image_url, "https://cdn.example.com/suv.jpg");
        assert_eq!(images.for_segment(Segment::Sedan), "/assets/car-sedan.jpg");
    }

    #[test]
    fn rejects_non_positive_price() {
        let mut d = draft();
        d.price_per_day = dec!(0);
        assert_eq!(violation_field(d.into_fields(&SegmentImages::default())), "price_per_day");

        let mut d = draft();
        d.price_per_day = dec!(-10);
        assert_eq!(violation_field(d.into_fields(&SegmentImages::default())), "price_per_day");

        // Rounds to 0.00
        let mut d = draft();
        d.price_per_day = dec!(0.004);
        assert_eq!(violation_field(d.into_fields(&SegmentImages::default())), "price_per_day");
    }

    #[test]
    fn price_rounds_half_up_before_storage() {
        let mut d = draft();
        d.price_per_day = dec!(10.005);
        let fields = d.into_fields(&SegmentImages::default()).unwrap();
        assert_eq!(fields.price_per_day, dec!(10.01));

        let mut d = draft();
        d.price_per_day = dec!(0.005);
        let fields = d.into_fields(&SegmentImages::default()).unwrap();
        assert_eq!(fields.price_per_day, dec!(0.01));
        assert!(fields.price_per_day > Decimal::ZERO);
    }

    #[test]
    fn rejects_price_above_daily_cap() {
        let mut d = draft();
        d.price_per_day = MAX_PRICE_PER_DAY;
        assert!(d.into_fields(&SegmentImages::default()).is_ok());

        let mut d = draft();
        d.price_per_day = dec!(70000000000000000000000000);
        assert_eq!(violation_field(d.into_fields(&SegmentImages::default())), "price_per_day");

        let mut d = draft();
        d.price_per_day = MAX_PRICE_PER_DAY + dec!(0.01);
        assert_eq!(violation_field(d.into_fields(&SegmentImages::default())), "price_per_day");
    }

    #[test]
    fn rejects_unknown_segment() {
        let mut d = draft();
        d.segment = "hatchback".into();
        assert_eq!(violation_field(d.into_fields(&SegmentImages::default())), "segment");
    }

    #[test]
    fn segment_is_case_insensitive_on_input() {
        let mut d = draft();
        d.segment = " SUV ".into();
        let fields = d.into_fields(&SegmentImages::default()).unwrap();
        assert_eq!(fields.segment, Segment::Suv);
    }

    #[test]
    fn rejects_short_name_and_brand() {
        let mut d = draft();
        d.name = "X".into();
        assert_eq!(violation_field(d.into_fields(&SegmentImages::default())), "name");

        let mut d = draft();
        d.brand = " B ".into();
        assert_eq!(violation_field(d.into_fields(&SegmentImages::default())), "brand");
    }

    #[test]
    fn rejects_non_positive_performance_figures() {
        let mut d = draft();
        d.horsepower = Some(0);
        assert_eq!(violation_field(d.into_fields(&SegmentImages::default())), "horsepower");

        let mut d = draft();
        d.top_speed = Some(-5);
        assert_eq!(violation_field(d.into_fields(&SegmentImages::default())), "top_speed");
    }

    #[test]
    fn rejects_malformed_image_url() {
        let mut d = draft();
        d.image_url = Some("not a url".into());
        assert_eq!(violation_field(d.into_fields(&SegmentImages::default())), "image_url");
    }

    #[test]
    fn optional_fields_may_be_omitted() {
        let d = VehicleDraft {
            description: None,
            horsepower: None,
            top_speed: None,
            acceleration: Some("".into()),
            image_url: None,
            ..draft()
        };
        let fields = d.into_fields(&SegmentImages::default()).unwrap();
        assert_eq!(fields.acceleration, None);
        assert_eq!(fields.horsepower, None);
    }

    #[test]
    fn apply_keeps_identity_and_availability() {
        let fields = draft().into_fields(&SegmentImages::default()).unwrap();
        let mut vehicle = Vehicle::new(fields.clone());
        vehicle.available = false;
        let id = vehicle.id;

        let mut changed = fields;
        changed.price_per_day = dec!(999.99);
        vehicle.apply(changed);

        assert_eq!(vehicle.id, id);
        assert!(!vehicle.available);
        assert_eq!(vehicle.price_per_day, dec!(999.99));
    }

    #[test]
    fn fleet_stats_count_booked_vehicles() {
        let fields = draft().into_fields(&SegmentImages::default()).unwrap();
        let a = Vehicle::new(fields.clone());
        let mut b = Vehicle::new(fields);
        b.available = false;

        let stats = FleetStats::from_vehicles([&a, &b]);
        assert_eq!(
            stats,
            FleetStats {
                total: 2,
                available: 1,
                booked: 1
            }
        );
    }
}
