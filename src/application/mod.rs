//! Use cases over the domain repositories

pub mod services;

pub use services::{CartService, CatalogService, CheckoutService, InventoryService, OrderService};
