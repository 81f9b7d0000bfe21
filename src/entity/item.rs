use super::Nullable;
use async_trait::async_trait;
use sea_orm::{entity::prelude::*, ActiveValue, QueryOrder};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,
    pub name: Option<String>,
    pub price: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::review::Entity")]
    Review,
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Model {
    pub async fn reviews<C>(&self, db: &C) -> Result<Vec<super::review::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_related(super::review::Entity)
            .order_by_asc(super::review::Column::Id)
            .all(db)
            .await
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Item {}, {}, {}>",
            self.id,
            Nullable(&self.name),
            Nullable(&self.price)
        )
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_delete<C>(self, db: &C) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if let ActiveValue::Set(id) | ActiveValue::Unchanged(id) = &self.id {
            let res = super::review::Entity::delete_many()
                .filter(super::review::Column::ItemId.eq(*id))
                .exec(db)
                .await?;
            tracing::debug!(item_id = *id, reviews = res.rows_affected, "cascade delete");
        }
        Ok(self)
    }
}
