//! Checkout unit-of-work interfaces
//!
//! The four checkout writes (order, order items, cart removal, vehicle
//! claims) go through one unit of work that is either committed or rolled
//! back as a whole. Backends with transactions map it onto a database
//! transaction; others keep an undo log and compensate in reverse order.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::order::{Order, OrderItem};
use crate::domain::DomainResult;

#[async_trait]
pub trait CheckoutUnitOfWork: Send {
    /// Insert the order header (items are written separately)
    async fn insert_order(&mut self, order: &Order) -> DomainResult<()>;

    async fn insert_order_items(&mut self, items: &[OrderItem]) -> DomainResult<()>;

    /// Delete the given cart items of `user_id`, returning how many rows
    /// were actually removed
    async fn remove_cart_items(&mut self, user_id: Uuid, item_ids: &[Uuid]) -> DomainResult<u64>;

    /// Compare-and-set `available: true → false`. `Ok(false)` means the
    /// vehicle was already claimed (or no longer exists).
    async fn claim_vehicle(&mut self, vehicle_id: Uuid) -> DomainResult<bool>;

    async fn commit(self: Box<Self>) -> DomainResult<()>;

    /// Undo every effect applied so far
    async fn rollback(self: Box<Self>) -> DomainResult<()>;
}

#[async_trait]
pub trait CheckoutStore: Send + Sync {
    async fn begin(&self) -> DomainResult<Box<dyn CheckoutUnitOfWork>>;
}
