//! Order repository interface
//!
//! Read side only. Orders are written exclusively through the checkout
//! unit of work.

use async_trait::async_trait;
use uuid::Uuid;

use super::model::Order;
use crate::domain::DomainResult;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Order>>;

    /// Orders of one user with items attached, most recent first
    async fn find_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Order>>;

    /// Every order with items attached, most recent first
    async fn find_all(&self) -> DomainResult<Vec<Order>>;
}
