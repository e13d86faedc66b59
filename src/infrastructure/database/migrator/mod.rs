//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_vehicles;
mod m20250101_000002_create_cart_items;
mod m20250101_000003_create_orders;
mod m20250101_000004_create_order_items;
mod m20250101_000005_create_user_roles;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_vehicles::Migration),
            Box::new(m20250101_000002_create_cart_items::Migration),
            Box::new(m20250101_000003_create_orders::Migration),
            Box::new(m20250101_000004_create_order_items::Migration),
            Box::new(m20250101_000005_create_user_roles::Migration),
        ]
    }
}
