//! Checkout orchestrator
//!
//! Turns a user's cart into an order in one all-or-nothing unit:
//! validate, insert order and items, remove the cart items, claim every
//! vehicle. Any failure after validation rolls back every applied effect
//! before the error is returned.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::cart::CartLine;
use crate::domain::checkout::{CheckoutProgress, CheckoutUnitOfWork};
use crate::domain::identity::RequestContext;
use crate::domain::order::Order;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// Why a write step did not reach its stage
enum StepError {
    /// Another checkout claimed the vehicle first
    LostClaim(Uuid),
    Failed(String),
}

impl From<DomainError> for StepError {
    fn from(e: DomainError) -> Self {
        StepError::Failed(e.to_string())
    }
}

/// Service that places orders from carts
pub struct CheckoutService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CheckoutService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Check out the caller's whole cart.
    ///
    /// Returns the committed order, or one of `EmptyCart`,
    /// `VehicleUnavailable` (cart left untouched) or `CheckoutFailed`.
    pub async fn checkout(&self, ctx: &RequestContext) -> DomainResult<Order> {
        let user_id = ctx.user_id;
        let mut progress = CheckoutProgress::new();

        let result = self.run(user_id, &mut progress).await;
        let outcome = match &result {
            Ok(_) => "committed",
            Err(DomainError::EmptyCart) => "empty_cart",
            Err(DomainError::VehicleUnavailable { .. }) => "unavailable",
            Err(_) => "failed",
        };
        metrics::counter!("checkout_total", "outcome" => outcome).increment(1);

        match &result {
            Ok(order) => info!(
                %user_id,
                order_id = %order.id,
                items = order.item_count(),
                total = %order.total_amount,
                "Order placed"
            ),
            Err(DomainError::CheckoutFailed { stage, cause }) => {
                error!(%user_id, stage = %stage, %cause, "Checkout failed")
            }
            Err(e) => info!(%user_id, state = ?progress.state(), error = %e, "Checkout rejected"),
        }
        result
    }

    async fn run(&self, user_id: Uuid, progress: &mut CheckoutProgress) -> DomainResult<Order> {
        // ── Validated ──────────────────────────────────────────
        let (lines, order) = match self.validate(user_id).await {
            Ok(validated) => validated,
            Err(e) => {
                progress.fail();
                return Err(e);
            }
        };
        progress.advance();
        debug!(%user_id, order_id = %order.id, total = %order.total_amount, "Cart validated");

        // ── Effects ────────────────────────────────────────────
        let mut uow = match self.repos.checkout().begin().await {
            Ok(uow) => uow,
            Err(e) => {
                let stage = progress.fail();
                return Err(DomainError::CheckoutFailed {
                    stage,
                    cause: e.to_string(),
                });
            }
        };

        match apply(uow.as_mut(), &order, &lines, progress).await {
            Ok(()) => {}
            Err(step) => {
                let stage = progress.fail();
                if let Err(e) = uow.rollback().await {
                    error!(%user_id, stage = %stage, error = %e, "Checkout rollback failed");
                }
                return Err(match step {
                    StepError::LostClaim(vehicle_id) => {
                        warn!(%user_id, %vehicle_id, "Vehicle claimed by a concurrent checkout");
                        DomainError::VehicleUnavailable { vehicle_id }
                    }
                    StepError::Failed(cause) => DomainError::CheckoutFailed { stage, cause },
                });
            }
        }

        // ── Committed ──────────────────────────────────────────
        if let Err(e) = uow.commit().await {
            let stage = progress.fail();
            return Err(DomainError::CheckoutFailed {
                stage,
                cause: e.to_string(),
            });
        }
        progress.advance();

        Ok(order)
    }

    /// Read the cart, check that everything in it can still be bought and
    /// price the order
    async fn validate(&self, user_id: Uuid) -> DomainResult<(Vec<CartLine>, Order)> {
        let lines = self.repos.carts().find_for_user(user_id).await?;
        if lines.is_empty() {
            return Err(DomainError::EmptyCart);
        }
        if let Some(line) = lines.iter().find(|l| !l.vehicle.available) {
            return Err(DomainError::VehicleUnavailable {
                vehicle_id: line.vehicle.id,
            });
        }
        let order = Order::from_cart(user_id, &lines)?;
        Ok((lines, order))
    }
}

/// Apply the four write steps in order, advancing `progress` after each
async fn apply(
    uow: &mut dyn CheckoutUnitOfWork,
    order: &Order,
    lines: &[CartLine],
    progress: &mut CheckoutProgress,
) -> Result<(), StepError> {
    uow.insert_order(order).await?;
    progress.advance();

    uow.insert_order_items(&order.items).await?;
    progress.advance();

    let item_ids: Vec<Uuid> = lines.iter().map(|l| l.item.id).collect();
    let removed = uow.remove_cart_items(order.user_id, &item_ids).await?;
    if removed != item_ids.len() as u64 {
        return Err(StepError::Failed(format!(
            "cart changed during checkout: expected {} items, removed {}",
            item_ids.len(),
            removed
        )));
    }
    progress.advance();

    let mut seen = HashSet::new();
    for vehicle_id in lines.iter().map(|l| l.vehicle.id) {
        if !seen.insert(vehicle_id) {
            continue;
        }
        if !uow.claim_vehicle(vehicle_id).await? {
            return Err(StepError::LostClaim(vehicle_id));
        }
    }
    progress.advance();

    Ok(())
}
