//! Create cart_items table
//!
//! Cart rows are removed together with their vehicle.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_vehicles::Vehicles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CartItems::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CartItems::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(CartItems::UserId).uuid().not_null())
                    .col(ColumnDef::new(CartItems::VehicleId).uuid().not_null())
                    .col(ColumnDef::new(CartItems::PickupDate).date().not_null())
                    .col(ColumnDef::new(CartItems::PickupTime).time().not_null())
                    .col(ColumnDef::new(CartItems::PickupLocation).string().not_null())
                    .col(ColumnDef::new(CartItems::ReturnDate).date().not_null())
                    .col(ColumnDef::new(CartItems::ReturnTime).time().not_null())
                    .col(ColumnDef::new(CartItems::ReturnLocation).string().not_null())
                    .col(
                        ColumnDef::new(CartItems::RentalDays)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(CartItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cart_items_vehicle")
                            .from(CartItems::Table, CartItems::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cart_items_user")
                    .table(CartItems::Table)
                    .col(CartItems::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CartItems::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum CartItems {
    Table,
    Id,
    UserId,
    VehicleId,
    PickupDate,
    PickupTime,
    PickupLocation,
    ReturnDate,
    ReturnTime,
    ReturnLocation,
    RentalDays,
    CreatedAt,
}
