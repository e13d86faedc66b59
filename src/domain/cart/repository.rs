//! Cart repository interface

use async_trait::async_trait;
use uuid::Uuid;

use super::model::{CartItem, CartLine};
use crate::domain::DomainResult;

#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn save(&self, item: CartItem) -> DomainResult<CartItem>;

    /// Items of one user joined with their current vehicle, oldest first
    async fn find_for_user(&self, user_id: Uuid) -> DomainResult<Vec<CartLine>>;

    async fn count_for_user(&self, user_id: Uuid) -> DomainResult<u64>;

    /// Delete one item owned by `user_id`; `NotFound` when there is no
    /// such item for that user
    async fn delete(&self, user_id: Uuid, item_id: Uuid) -> DomainResult<()>;
}
