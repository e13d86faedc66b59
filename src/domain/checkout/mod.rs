//! Checkout: the cart-to-order transition

pub mod stage;
pub mod unit_of_work;

pub use stage::{CheckoutProgress, CheckoutStage, CheckoutState};
pub use unit_of_work::{CheckoutStore, CheckoutUnitOfWork};
