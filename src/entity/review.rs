use super::Nullable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,
    pub comment: Option<String>,
    pub customer_id: Option<i32>,
    pub item_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customer::Entity",
        from = "Column::CustomerId",
        to = "super::customer::Column::Id",
        on_delete = "Cascade"
    )]
    Customer,
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to = "super::item::Column::Id",
        on_delete = "Cascade"
    )]
    Item,
}

impl Related<super::customer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customer.def()
    }
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl Model {
    pub async fn customer<C>(&self, db: &C) -> Result<Option<super::customer::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_related(super::customer::Entity).one(db).await
    }

    pub async fn item<C>(&self, db: &C) -> Result<Option<super::item::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_related(super::item::Entity).one(db).await
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Review {}, customer_id={}, item_id={}>",
            self.id,
            Nullable(&self.customer_id),
            Nullable(&self.item_id)
        )
    }
}

impl ActiveModelBehavior for ActiveModel {}
