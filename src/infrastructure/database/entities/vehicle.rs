//! Vehicle entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    pub brand: String,

    /// sedan, suv, sports or exotic
    pub segment: String,

    #[sea_orm(nullable)]
    pub description: Option<String>,

    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub price_per_day: Decimal,

    #[sea_orm(nullable)]
    pub horsepower: Option<i32>,
    #[sea_orm(nullable)]
    pub top_speed: Option<i32>,
    #[sea_orm(nullable)]
    pub acceleration: Option<String>,

    pub image_url: String,

    /// Cleared by checkout, never set back by it
    pub available: bool,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItems,
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
