//! Order history

use std::sync::Arc;

use crate::domain::identity::RequestContext;
use crate::domain::order::Order;
use crate::domain::{DomainResult, RepositoryProvider};

pub struct OrderService {
    repos: Arc<dyn RepositoryProvider>,
}

impl OrderService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// The caller's orders, newest first, with items
    pub async fn list_for_user(&self, ctx: &RequestContext) -> DomainResult<Vec<Order>> {
        self.repos.orders().find_for_user(ctx.user_id).await
    }

    /// Every order in the system. Admin only.
    pub async fn list_all(&self, ctx: &RequestContext) -> DomainResult<Vec<Order>> {
        ctx.require_admin()?;
        self.repos.orders().find_all().await
    }
}
