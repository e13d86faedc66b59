//! Transactional checkout unit of work
//!
//! Every write goes through one `DatabaseTransaction`; dropping it without
//! commit rolls back. The vehicle claim is a conditional update whose
//! affected-row count decides who won.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::checkout::{CheckoutStore, CheckoutUnitOfWork};
use crate::domain::order::{Order, OrderItem};
use crate::domain::DomainResult;
use crate::infrastructure::database::entities::{cart_item, order, order_item, vehicle};

use super::order_repository::item_to_active;

pub struct SeaOrmCheckoutStore {
    db: DatabaseConnection,
}

impl SeaOrmCheckoutStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CheckoutStore for SeaOrmCheckoutStore {
    async fn begin(&self) -> DomainResult<Box<dyn CheckoutUnitOfWork>> {
        let txn = self.db.begin().await?;
        Ok(Box::new(SeaOrmCheckout { txn }))
    }
}

pub struct SeaOrmCheckout {
    txn: DatabaseTransaction,
}

#[async_trait]
impl CheckoutUnitOfWork for SeaOrmCheckout {
    async fn insert_order(&mut self, o: &Order) -> DomainResult<()> {
        debug!(order_id = %o.id, user_id = %o.user_id, total = %o.total_amount, "Inserting order");
        order::ActiveModel {
            id: Set(o.id),
            user_id: Set(o.user_id),
            total_amount: Set(o.total_amount),
            status: Set(o.status.as_str().to_string()),
            created_at: Set(o.created_at),
        }
        .insert(&self.txn)
        .await?;
        Ok(())
    }

    async fn insert_order_items(&mut self, items: &[OrderItem]) -> DomainResult<()> {
        if items.is_empty() {
            return Ok(());
        }
        let models = items
            .iter()
            .enumerate()
            .map(|(position, item)| item_to_active(item, position));
        order_item::Entity::insert_many(models)
            .exec_without_returning(&self.txn)
            .await?;
        Ok(())
    }

    async fn remove_cart_items(&mut self, user_id: Uuid, item_ids: &[Uuid]) -> DomainResult<u64> {
        if item_ids.is_empty() {
            return Ok(0);
        }
        let result = cart_item::Entity::delete_many()
            .filter(cart_item::Column::UserId.eq(user_id))
            .filter(cart_item::Column::Id.is_in(item_ids.iter().copied()))
            .exec(&self.txn)
            .await?;
        Ok(result.rows_affected)
    }

    async fn claim_vehicle(&mut self, vehicle_id: Uuid) -> DomainResult<bool> {
        let result = vehicle::Entity::update_many()
            .col_expr(vehicle::Column::Available, Expr::value(false))
            .filter(vehicle::Column::Id.eq(vehicle_id))
            .filter(vehicle::Column::Available.eq(true))
            .exec(&self.txn)
            .await?;
        Ok(result.rows_affected == 1)
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        self.txn.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        self.txn.rollback().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::{CartItem, CartRepository, RentalWindow};
    use crate::domain::order::OrderRepository;
    use crate::domain::vehicle::{SegmentImages, Vehicle, VehicleDraft, VehicleRepository};
    use crate::infrastructure::database::repositories::{
        SeaOrmCartRepository, SeaOrmOrderRepository, SeaOrmVehicleRepository,
    };
    use crate::infrastructure::database::test_database;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal_macros::dec;

    struct Fixture {
        vehicles: SeaOrmVehicleRepository,
        carts: SeaOrmCartRepository,
        orders: SeaOrmOrderRepository,
        store: SeaOrmCheckoutStore,
    }

    async fn fixture() -> Fixture {
        let db = test_database().await;
        Fixture {
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            carts: SeaOrmCartRepository::new(db.clone()),
            orders: SeaOrmOrderRepository::new(db.clone()),
            store: SeaOrmCheckoutStore::new(db),
        }
    }

    fn vehicle(name: &str) -> Vehicle {
        let fields = VehicleDraft {
            name: name.into(),
            brand: "Bentley".into(),
            segment: "sedan".into(),
            description: None,
            price_per_day: dec!(100),
            horsepower: None,
            top_speed: None,
            acceleration: None,
            image_url: None,
        }
        .into_fields(&SegmentImages::default())
        .unwrap();
        Vehicle::new(fields)
    }

    fn window(days: i64) -> RentalWindow {
        let d = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let t = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        RentalWindow::new(d, t, "Mayfair", d + chrono::Duration::days(days), t, "Mayfair").unwrap()
    }

    #[tokio::test]
    async fn committed_checkout_is_visible() {
        let f = fixture().await;
        let v = f.vehicles.save(vehicle("Flying Spur")).await.unwrap();
        let user = Uuid::new_v4();
        let item = f.carts.save(CartItem::new(user, v.id, window(3))).await.unwrap();
        let lines = f.carts.find_for_user(user).await.unwrap();
        let order = Order::from_cart(user, &lines).unwrap();

        let mut uow = f.store.begin().await.unwrap();
        uow.insert_order(&order).await.unwrap();
        uow.insert_order_items(&order.items).await.unwrap();
        assert_eq!(uow.remove_cart_items(user, &[item.id]).await.unwrap(), 1);
        assert!(uow.claim_vehicle(v.id).await.unwrap());
        uow.commit().await.unwrap();

        let stored = f.orders.find_by_id(order.id).await.unwrap().unwrap();
        assert_eq!(stored.total_amount, dec!(300));
        assert_eq!(stored.items.len(), 1);
        assert_eq!(stored.items[0].vehicle.name, "Flying Spur");
        assert_eq!(stored.items[0].subtotal, dec!(300));
        assert_eq!(f.carts.count_for_user(user).await.unwrap(), 0);
        assert!(!f.vehicles.find_by_id(v.id).await.unwrap().unwrap().available);
    }

    #[tokio::test]
    async fn rollback_leaves_no_trace() {
        let f = fixture().await;
        let v = f.vehicles.save(vehicle("Continental GT")).await.unwrap();
        let user = Uuid::new_v4();
        let item = f.carts.save(CartItem::new(user, v.id, window(2))).await.unwrap();
        let lines = f.carts.find_for_user(user).await.unwrap();
        let order = Order::from_cart(user, &lines).unwrap();

        let mut uow = f.store.begin().await.unwrap();
        uow.insert_order(&order).await.unwrap();
        uow.insert_order_items(&order.items).await.unwrap();
        uow.remove_cart_items(user, &[item.id]).await.unwrap();
        uow.rollback().await.unwrap();

        assert!(f.orders.find_for_user(user).await.unwrap().is_empty());
        assert_eq!(f.carts.count_for_user(user).await.unwrap(), 1);
        assert!(f.vehicles.find_by_id(v.id).await.unwrap().unwrap().available);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_checkouts_on_sqlite_file_claim_once() {
        use crate::application::services::CheckoutService;
        use crate::domain::identity::RequestContext;
        use crate::domain::DomainError;
        use crate::infrastructure::database::{
            init_database, run_migrations, DatabaseConfig, SeaOrmRepositoryProvider,
        };
        use std::sync::Arc;
        use tokio::sync::Barrier;

        let path = std::env::temp_dir().join(format!("luxe-race-{}.db", Uuid::new_v4()));
        let mut config = DatabaseConfig::sqlite(&path.to_string_lossy());
        config.max_connections = 4;
        let db = init_database(&config).await.unwrap();
        run_migrations(&db).await.unwrap();

        let vehicles = SeaOrmVehicleRepository::new(db.clone());
        let carts = SeaOrmCartRepository::new(db.clone());
        let orders = SeaOrmOrderRepository::new(db.clone());
        let service = Arc::new(CheckoutService::new(Arc::new(SeaOrmRepositoryProvider::new(
            db.clone(),
        ))));

        for round in 0..10 {
            let v = vehicles.save(vehicle(&format!("Mulsanne {round}"))).await.unwrap();
            let buyers = [Uuid::new_v4(), Uuid::new_v4()];
            for (i, user) in buyers.iter().enumerate() {
                carts.save(CartItem::new(*user, v.id, window(i as i64 + 1))).await.unwrap();
            }

            let barrier = Arc::new(Barrier::new(buyers.len()));
            let tasks: Vec<_> = buyers
                .iter()
                .map(|&user| {
                    let service = Arc::clone(&service);
                    let barrier = Arc::clone(&barrier);
                    tokio::spawn(async move {
                        barrier.wait().await;
                        service.checkout(&RequestContext::customer(user)).await
                    })
                })
                .collect();

            let mut wins = 0;
            for task in tasks {
                match task.await.unwrap() {
                    Ok(_) => wins += 1,
                    Err(DomainError::VehicleUnavailable { vehicle_id }) => {
                        assert_eq!(vehicle_id, v.id)
                    }
                    Err(other) => panic!("round {round}: unexpected error {other:?}"),
                }
            }
            assert_eq!(wins, 1, "round {round}");

            assert!(!vehicles.find_by_id(v.id).await.unwrap().unwrap().available);
            let claims = orders
                .find_all()
                .await
                .unwrap()
                .iter()
                .flat_map(|o| o.items.iter())
                .filter(|i| i.vehicle_id == v.id)
                .count();
            assert_eq!(claims, 1, "round {round}");
            let carts_left: u64 = [
                carts.count_for_user(buyers[0]).await.unwrap(),
                carts.count_for_user(buyers[1]).await.unwrap(),
            ]
            .iter()
            .sum();
            assert_eq!(carts_left, 1, "round {round}: loser keeps its cart");
        }

        db.close().await.unwrap();
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }
    }

    #[tokio::test]
    async fn second_claim_loses() {
        let f = fixture().await;
        let v = f.vehicles.save(vehicle("Bentayga")).await.unwrap();

        let mut uow = f.store.begin().await.unwrap();
        assert!(uow.claim_vehicle(v.id).await.unwrap());
        assert!(!uow.claim_vehicle(v.id).await.unwrap());
        assert!(!uow.claim_vehicle(Uuid::new_v4()).await.unwrap());
        uow.commit().await.unwrap();
    }
}
