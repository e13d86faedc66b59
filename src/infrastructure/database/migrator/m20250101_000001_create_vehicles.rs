//! Create vehicles table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Vehicles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Vehicles::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Vehicles::Brand).string_len(50).not_null())
                    .col(ColumnDef::new(Vehicles::Segment).string_len(20).not_null())
                    .col(ColumnDef::new(Vehicles::Description).string_len(500))
                    .col(
                        ColumnDef::new(Vehicles::PricePerDay)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Vehicles::Horsepower).integer())
                    .col(ColumnDef::new(Vehicles::TopSpeed).integer())
                    .col(ColumnDef::new(Vehicles::Acceleration).string_len(20))
                    .col(ColumnDef::new(Vehicles::ImageUrl).text().not_null())
                    .col(
                        ColumnDef::new(Vehicles::Available)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Vehicles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vehicles_available_segment")
                    .table(Vehicles::Table)
                    .col(Vehicles::Available)
                    .col(Vehicles::Segment)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Vehicles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Vehicles {
    Table,
    Id,
    Name,
    Brand,
    Segment,
    Description,
    PricePerDay,
    Horsepower,
    TopSpeed,
    Acceleration,
    ImageUrl,
    Available,
    CreatedAt,
}
