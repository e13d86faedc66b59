//! Order item entity
//!
//! Carries its own copy of the vehicle's name, brand and image so that
//! history survives the vehicle being edited or deleted. `vehicle_id` is
//! therefore not a foreign key.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub order_id: Uuid,
    pub vehicle_id: Uuid,

    /// Cart order the item was placed in
    pub position: i32,

    pub pickup_date: Date,
    pub pickup_time: Time,
    pub pickup_location: String,
    pub return_date: Date,
    pub return_time: Time,
    pub return_location: String,

    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price_per_day: Decimal,
    pub rental_days: i32,
    #[sea_orm(column_type = "Decimal(Some((20, 2)))")]
    pub subtotal: Decimal,

    pub vehicle_name: String,
    pub vehicle_brand: String,
    pub vehicle_image_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
