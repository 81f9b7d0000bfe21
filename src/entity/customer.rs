use super::Nullable;
use async_trait::async_trait;
use sea_orm::{entity::prelude::*, ActiveValue, QueryOrder};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,
    pub name: Option<String>,
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
    /// Reviews written by this customer, in insertion order.
    pub async fn reviews<C>(&self, db: &C) -> Result<Vec<super::review::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_related(super::review::Entity)
            .order_by_asc(super::review::Column::Id)
            .all(db)
            .await
    }

    /// Items this customer has reviewed, projected through the current reviews.
    ///
    /// One entry per review, so an item reviewed twice appears twice. Reviews
    /// without an item are skipped. Computed on every call, never cached.
    pub async fn items<C>(&self, db: &C) -> Result<Vec<super::item::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let rows = self
            .find_related(super::review::Entity)
            .order_by_asc(super::review::Column::Id)
            .find_also_related(super::item::Entity)
            .all(db)
            .await?;

        Ok(rows.into_iter().filter_map(|(_, item)| item).collect())
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Customer {}, {}>", self.id, Nullable(&self.name))
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
                .filter(super::review::Column::CustomerId.eq(*id))
                .exec(db)
                .await?;
            tracing::debug!(customer_id = *id, reviews = res.rows_affected, "cascade delete");
        }
        Ok(self)
    }
}
