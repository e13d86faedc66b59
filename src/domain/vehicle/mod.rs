//! Vehicle aggregate
//!
//! Contains the Vehicle entity, the shared admin validation schema,
//! and the repository interface.

pub mod model;
pub mod repository;

pub use model::{
    FleetStats, Segment, SegmentImages, Vehicle, VehicleDraft, VehicleFields, VehicleSnapshot,
};
pub use repository::VehicleRepository;
