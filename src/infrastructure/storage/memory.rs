//! In-memory storage implementation
//!
//! Backs every repository with `DashMap` tables. There are no
//! transactions, so checkout runs against an undo log: each applied
//! effect records its compensation, and rollback replays them in reverse.
//! Vehicle claims rely on the per-entry write lock of `DashMap::get_mut`
//! for compare-and-set.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::cart::{CartItem, CartLine, CartRepository};
use crate::domain::checkout::{CheckoutStore, CheckoutUnitOfWork};
use crate::domain::identity::{Role, RoleRepository};
use crate::domain::order::{Order, OrderItem, OrderRepository};
use crate::domain::vehicle::{Segment, Vehicle, VehicleRepository};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

#[derive(Default)]
struct Tables {
    vehicles: DashMap<Uuid, Vehicle>,
    cart_items: DashMap<Uuid, CartItem>,
    orders: DashMap<Uuid, Order>,
    roles: DashMap<Uuid, HashSet<Role>>,
}

/// In-memory storage for development and testing
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    tables: Arc<Tables>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryStorage {
    fn vehicles(&self) -> &dyn VehicleRepository {
        self
    }

    fn carts(&self) -> &dyn CartRepository {
        self
    }

    fn orders(&self) -> &dyn OrderRepository {
        self
    }

    fn roles(&self) -> &dyn RoleRepository {
        self
    }

    fn checkout(&self) -> &dyn CheckoutStore {
        self
    }
}

// ── Vehicles ────────────────────────────────────────────────────

#[async_trait]
impl VehicleRepository for InMemoryStorage {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Vehicle>> {
        Ok(self.tables.vehicles.get(&id).map(|v| v.clone()))
    }

    async fn find_available(&self, segment: Option<Segment>) -> DomainResult<Vec<Vehicle>> {
        let mut vehicles: Vec<Vehicle> = self
            .tables
            .vehicles
            .iter()
            .filter(|v| v.available && segment.map_or(true, |s| v.segment == s))
            .map(|v| v.clone())
            .collect();
        vehicles.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(vehicles)
    }

    async fn find_all(&self) -> DomainResult<Vec<Vehicle>> {
        let mut vehicles: Vec<Vehicle> = self.tables.vehicles.iter().map(|v| v.clone()).collect();
        vehicles.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(vehicles)
    }

    async fn save(&self, vehicle: Vehicle) -> DomainResult<Vehicle> {
        self.tables.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn update(&self, vehicle: Vehicle) -> DomainResult<()> {
        match self.tables.vehicles.get_mut(&vehicle.id) {
            Some(mut existing) => {
                *existing = vehicle;
                Ok(())
            }
            None => Err(DomainError::not_found("Vehicle", vehicle.id)),
        }
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if self.tables.vehicles.remove(&id).is_none() {
            return Err(DomainError::not_found("Vehicle", id));
        }
        // Cart items follow their vehicle, order history keeps its snapshot
        self.tables.cart_items.retain(|_, item| item.vehicle_id != id);
        Ok(())
    }
}

// ── Cart ────────────────────────────────────────────────────────

#[async_trait]
impl CartRepository for InMemoryStorage {
    async fn save(&self, item: CartItem) -> DomainResult<CartItem> {
        if !self.tables.vehicles.contains_key(&item.vehicle_id) {
            return Err(DomainError::not_found("Vehicle", item.vehicle_id));
        }
        self.tables.cart_items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn find_for_user(&self, user_id: Uuid) -> DomainResult<Vec<CartLine>> {
        let mut items: Vec<CartItem> = self
            .tables
            .cart_items
            .iter()
            .filter(|i| i.user_id == user_id)
            .map(|i| i.clone())
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        items
            .into_iter()
            .map(|item| {
                let vehicle = self
                    .tables
                    .vehicles
                    .get(&item.vehicle_id)
                    .map(|v| v.clone())
                    .ok_or_else(|| DomainError::not_found("Vehicle", item.vehicle_id))?;
                Ok(CartLine { item, vehicle })
            })
            .collect()
    }

    async fn count_for_user(&self, user_id: Uuid) -> DomainResult<u64> {
        Ok(self
            .tables
            .cart_items
            .iter()
            .filter(|i| i.user_id == user_id)
            .count() as u64)
    }

    async fn delete(&self, user_id: Uuid, item_id: Uuid) -> DomainResult<()> {
        self.tables
            .cart_items
            .remove_if(&item_id, |_, item| item.user_id == user_id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("CartItem", item_id))
    }
}

// ── Orders ──────────────────────────────────────────────────────

impl InMemoryStorage {
    fn orders_matching(&self, pred: impl Fn(&Order) -> bool) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .tables
            .orders
            .iter()
            .filter(|o| pred(o))
            .map(|o| o.clone())
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        orders
    }
}

#[async_trait]
impl OrderRepository for InMemoryStorage {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Order>> {
        Ok(self.tables.orders.get(&id).map(|o| o.clone()))
    }

    async fn find_for_user(&self, user_id: Uuid) -> DomainResult<Vec<Order>> {
        Ok(self.orders_matching(|o| o.user_id == user_id))
    }

    async fn find_all(&self) -> DomainResult<Vec<Order>> {
        Ok(self.orders_matching(|_| true))
    }
}

// ── Roles ───────────────────────────────────────────────────────

#[async_trait]
impl RoleRepository for InMemoryStorage {
    async fn roles_for(&self, user_id: Uuid) -> DomainResult<Vec<Role>> {
        Ok(self
            .tables
            .roles
            .get(&user_id)
            .map(|r| r.iter().copied().collect())
            .unwrap_or_default())
    }

    async fn grant(&self, user_id: Uuid, role: Role) -> DomainResult<()> {
        self.tables.roles.entry(user_id).or_default().insert(role);
        Ok(())
    }
}

// ── Checkout ────────────────────────────────────────────────────

/// Compensation for one applied checkout effect
#[derive(Debug)]
enum Undo {
    DeleteOrder(Uuid),
    DeleteOrderItems(Uuid),
    RestoreCartItems(Vec<CartItem>),
    ReleaseVehicle(Uuid),
}

/// Checkout unit of work with compensating rollback
pub struct MemoryCheckout {
    tables: Arc<Tables>,
    undo: Vec<Undo>,
    finished: bool,
}

impl MemoryCheckout {
    fn compensate(&mut self) {
        while let Some(step) = self.undo.pop() {
            debug!(?step, "Compensating checkout effect");
            match step {
                Undo::ReleaseVehicle(id) => {
                    if let Some(mut v) = self.tables.vehicles.get_mut(&id) {
                        v.available = true;
                    }
                }
                Undo::RestoreCartItems(items) => {
                    for item in items {
                        self.tables.cart_items.insert(item.id, item);
                    }
                }
                Undo::DeleteOrderItems(order_id) => {
                    if let Some(mut order) = self.tables.orders.get_mut(&order_id) {
                        order.items.clear();
                    }
                }
                Undo::DeleteOrder(order_id) => {
                    self.tables.orders.remove(&order_id);
                }
            }
        }
        self.finished = true;
    }
}

#[async_trait]
impl CheckoutUnitOfWork for MemoryCheckout {
    async fn insert_order(&mut self, order: &Order) -> DomainResult<()> {
        let header = Order {
            items: Vec::new(),
            ..order.clone()
        };
        self.tables.orders.insert(order.id, header);
        self.undo.push(Undo::DeleteOrder(order.id));
        Ok(())
    }

    async fn insert_order_items(&mut self, items: &[OrderItem]) -> DomainResult<()> {
        for item in items {
            let mut order = self
                .tables
                .orders
                .get_mut(&item.order_id)
                .ok_or_else(|| DomainError::not_found("Order", item.order_id))?;
            order.items.push(item.clone());
        }
        if let Some(first) = items.first() {
            self.undo.push(Undo::DeleteOrderItems(first.order_id));
        }
        Ok(())
    }

    async fn remove_cart_items(&mut self, user_id: Uuid, item_ids: &[Uuid]) -> DomainResult<u64> {
        let removed: Vec<CartItem> = item_ids
            .iter()
            .filter_map(|id| {
                self.tables
                    .cart_items
                    .remove_if(id, |_, item| item.user_id == user_id)
                    .map(|(_, item)| item)
            })
            .collect();
        let count = removed.len() as u64;
        self.undo.push(Undo::RestoreCartItems(removed));
        Ok(count)
    }

    async fn claim_vehicle(&mut self, vehicle_id: Uuid) -> DomainResult<bool> {
        let Some(mut vehicle) = self.tables.vehicles.get_mut(&vehicle_id) else {
            return Ok(false);
        };
        if !vehicle.available {
            return Ok(false);
        }
        vehicle.available = false;
        drop(vehicle);
        self.undo.push(Undo::ReleaseVehicle(vehicle_id));
        Ok(true)
    }

    async fn commit(mut self: Box<Self>) -> DomainResult<()> {
        self.undo.clear();
        self.finished = true;
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> DomainResult<()> {
        self.compensate();
        Ok(())
    }
}

impl Drop for MemoryCheckout {
    fn drop(&mut self) {
        if !self.finished {
            warn!(
                pending = self.undo.len(),
                "Checkout unit of work dropped without commit, rolling back"
            );
            self.compensate();
        }
    }
}

#[async_trait]
impl CheckoutStore for InMemoryStorage {
    async fn begin(&self) -> DomainResult<Box<dyn CheckoutUnitOfWork>> {
        Ok(Box::new(MemoryCheckout {
            tables: Arc::clone(&self.tables),
            undo: Vec::new(),
            finished: false,
        }))
    }
}

// ── Tests ──────────────────────────────────────────────────────
