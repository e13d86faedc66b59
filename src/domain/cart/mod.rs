//! Cart aggregate
//!
//! Pending reservations owned by one user, the rental window type and
//! the rental-day rule.

pub mod model;
pub mod repository;

pub use model::{rental_days, CartItem, CartLine, CartSummary, PricedLine, RentalWindow};
pub use repository::CartRepository;
