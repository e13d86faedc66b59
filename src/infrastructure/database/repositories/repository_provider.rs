//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::cart::CartRepository;
use crate::domain::checkout::CheckoutStore;
use crate::domain::identity::RoleRepository;
use crate::domain::order::OrderRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::vehicle::VehicleRepository;

use super::cart_repository::SeaOrmCartRepository;
use super::checkout_store::SeaOrmCheckoutStore;
use super::order_repository::SeaOrmOrderRepository;
use super::role_repository::SeaOrmRoleRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let lines = repos.carts().find_for_user(user_id).await?;
/// let uow = repos.checkout().begin().await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    vehicles: SeaOrmVehicleRepository,
    carts: SeaOrmCartRepository,
    orders: SeaOrmOrderRepository,
    roles: SeaOrmRoleRepository,
    checkout: SeaOrmCheckoutStore,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            carts: SeaOrmCartRepository::new(db.clone()),
            orders: SeaOrmOrderRepository::new(db.clone()),
            roles: SeaOrmRoleRepository::new(db.clone()),
            checkout: SeaOrmCheckoutStore::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn carts(&self) -> &dyn CartRepository {
        &self.carts
    }

    fn orders(&self) -> &dyn OrderRepository {
        &self.orders
    }

    fn roles(&self) -> &dyn RoleRepository {
        &self.roles
    }

    fn checkout(&self) -> &dyn CheckoutStore {
        &self.checkout
    }
}
