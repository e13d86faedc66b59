//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod cart_repository;
pub mod checkout_store;
pub mod order_repository;
pub mod repository_provider;
pub mod role_repository;
pub mod vehicle_repository;

pub use cart_repository::SeaOrmCartRepository;
pub use checkout_store::SeaOrmCheckoutStore;
pub use order_repository::SeaOrmOrderRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use role_repository::SeaOrmRoleRepository;
pub use vehicle_repository::SeaOrmVehicleRepository;
