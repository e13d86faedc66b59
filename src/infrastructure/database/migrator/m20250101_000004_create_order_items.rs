//! Create order_items table
//!
//! Items reference their order but not the vehicle: the snapshot columns
//! keep history readable after the vehicle is gone.

use sea_orm_migration::prelude::*;

use super::m20250101_000003_create_orders::Orders;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrderItems::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OrderItems::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(OrderItems::OrderId).uuid().not_null())
                    .col(ColumnDef::new(OrderItems::VehicleId).uuid().not_null())
                    .col(ColumnDef::new(OrderItems::Position).integer().not_null())
                    .col(ColumnDef::new(OrderItems::PickupDate).date().not_null())
                    .col(ColumnDef::new(OrderItems::PickupTime).time().not_null())
                    .col(ColumnDef::new(OrderItems::PickupLocation).string().not_null())
                    .col(ColumnDef::new(OrderItems::ReturnDate).date().not_null())
                    .col(ColumnDef::new(OrderItems::ReturnTime).time().not_null())
                    .col(ColumnDef::new(OrderItems::ReturnLocation).string().not_null())
                    .col(
                        ColumnDef::new(OrderItems::PricePerDay)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(OrderItems::RentalDays).integer().not_null())
                    .col(
                        ColumnDef::new(OrderItems::Subtotal)
                            .decimal_len(20, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(OrderItems::VehicleName).string_len(100).not_null())
                    .col(ColumnDef::new(OrderItems::VehicleBrand).string_len(50).not_null())
                    .col(ColumnDef::new(OrderItems::VehicleImageUrl).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_items_order")
                            .from(OrderItems::Table, OrderItems::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_order_items_order")
                    .table(OrderItems::Table)
                    .col(OrderItems::OrderId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderItems::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum OrderItems {
    Table,
    Id,
    OrderId,
    VehicleId,
    Position,
    PickupDate,
    PickupTime,
    PickupLocation,
    ReturnDate,
    ReturnTime,
    ReturnLocation,
    PricePerDay,
    RentalDays,
    Subtotal,
    VehicleName,
    VehicleBrand,
    VehicleImageUrl,
}
