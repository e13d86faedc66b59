pub mod cart;
pub mod checkout;
pub mod identity;
pub mod order;
pub mod pricing;
pub mod repositories;
pub mod vehicle;

// Re-export commonly used types
pub use cart::{CartItem, CartLine, CartSummary, RentalWindow};
pub use checkout::{CheckoutStage, CheckoutState};
pub use identity::{RequestContext, Role};
pub use order::{Order, OrderItem, OrderStatus};
pub use repositories::{DomainResult, RepositoryProvider};
pub use vehicle::{FleetStats, Segment, SegmentImages, Vehicle, VehicleDraft, VehicleFields};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
