//! Application services

mod cart;
mod catalog;
mod checkout;
mod inventory;
mod orders;

pub use cart::CartService;
pub use catalog::CatalogService;
pub use checkout::CheckoutService;
pub use inventory::InventoryService;
pub use orders::OrderService;
