//! Per-user cart

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::domain::cart::{CartItem, CartSummary, RentalWindow};
use crate::domain::identity::RequestContext;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// Cart operations, always scoped to the caller
pub struct CartService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CartService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Put a vehicle in the caller's cart for the given window
    pub async fn add(
        &self,
        ctx: &RequestContext,
        vehicle_id: Uuid,
        window: RentalWindow,
    ) -> DomainResult<CartItem> {
        window.validate()?;

        let vehicle = self
            .repos
            .vehicles()
            .find_by_id(vehicle_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Vehicle", vehicle_id))?;
        if !vehicle.available {
            return Err(DomainError::VehicleUnavailable { vehicle_id });
        }

        let item = self
            .repos
            .carts()
            .save(CartItem::new(ctx.user_id, vehicle_id, window))
            .await?;
        info!(
            user_id = %ctx.user_id,
            %vehicle_id,
            rental_days = item.rental_days,
            "Added to cart"
        );
        Ok(item)
    }

    /// Remove one of the caller's items. Items of other users are reported
    /// as not found.
    pub async fn remove(&self, ctx: &RequestContext, item_id: Uuid) -> DomainResult<()> {
        self.repos.carts().delete(ctx.user_id, item_id).await?;
        info!(user_id = %ctx.user_id, %item_id, "Removed from cart");
        Ok(())
    }

    /// Cart lines with current vehicle data and the running total
    pub async fn summary(&self, ctx: &RequestContext) -> DomainResult<CartSummary> {
        let lines = self.repos.carts().find_for_user(ctx.user_id).await?;
        CartSummary::new(lines)
    }

    pub async fn count(&self, ctx: &RequestContext) -> DomainResult<u64> {
        self.repos.carts().count_for_user(ctx.user_id).await
    }
}
