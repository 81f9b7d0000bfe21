//! Serialization views over the review entities.
//!
//! Every view embeds its related rows one level deep and no further. The
//! nested shapes are distinct types ([`CustomerRef`], [`ItemRef`],
//! [`ReviewRef`]) that carry no relation fields at all, so a dump always
//! terminates at depth two no matter how densely the rows are connected.
//!
//! The load side accepts only the writable columns of each entity. `id` and
//! the nested relations are dump-only and are rejected on input, as is any
//! field the view does not know.

use crate::entity::{customer, item, review};
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Value,
};
use std::collections::HashMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as Json;
use thiserror::Error;

/// Errors raised while converting between views and JSON.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The payload did not match the writable fields of the view
    #[error("invalid {entity} payload: {source}")]
    Load {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The view could not be rendered as JSON
    #[error("failed to dump view: {0}")]
    Dump(#[from] serde_json::Error),
}

/// Rendering of a view into plain JSON data.
pub trait Dump: Serialize + Sized {
    fn to_json(&self) -> Result<Json, SchemaError> {
        Ok(serde_json::to_value(self)?)
    }

    fn dump_many(views: &[Self]) -> Result<Json, SchemaError> {
        Ok(serde_json::to_value(views)?)
    }
}

/// A customer nested inside another view, without its reviews.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CustomerRef {
    pub id: i32,
    pub name: Option<String>,
}

/// An item nested inside another view, without its reviews.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemRef {
    pub id: i32,
    pub name: Option<String>,
    pub price: Option<f64>,
}

/// A review nested inside a customer or item, without its back-links.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReviewRef {
    pub id: i32,
    pub comment: Option<String>,
}

impl From<customer::Model> for CustomerRef {
    fn from(model: customer::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<item::Model> for ItemRef {
    fn from(model: item::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            price: model.price,
        }
    }
}

impl From<review::Model> for ReviewRef {
    fn from(model: review::Model) -> Self {
        Self {
            id: model.id,
            comment: model.comment,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CustomerSchema {
    pub id: i32,
    pub name: Option<String>,
    pub reviews: Vec<ReviewRef>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ItemSchema {
    pub id: i32,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub reviews: Vec<ReviewRef>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReviewSchema {
    pub id: i32,
    pub comment: Option<String>,
    pub customer: Option<CustomerRef>,
    pub item: Option<ItemRef>,
}

impl Dump for CustomerSchema {}
impl Dump for ItemSchema {}
impl Dump for ReviewSchema {}

impl CustomerSchema {
    pub fn dump(customer: customer::Model, reviews: Vec<review::Model>) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            reviews: reviews.into_iter().map(Into::into).collect(),
        }
    }

    pub async fn fetch<C>(db: &C, id: i32) -> Result<Option<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        let Some(customer) = customer::Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        let reviews = customer.reviews(db).await?;

        Ok(Some(Self::dump(customer, reviews)))
    }

    pub async fn fetch_all<C>(db: &C) -> Result<Vec<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        let rows = customer::Entity::find()
            .order_by_asc(customer::Column::Id)
            .find_with_related(review::Entity)
            .order_by_asc(review::Column::Id)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(customer, reviews)| Self::dump(customer, reviews))
            .collect())
    }

    /// Parses a customer payload. Only `name` is writable.
    pub fn load(payload: Json) -> Result<customer::ActiveModel, SchemaError> {
        let input: CustomerInput = parse("customer", payload)?;

        Ok(customer::ActiveModel {
            name: set_if_present(input.name),
            ..Default::default()
        })
    }
}

impl ItemSchema {
    pub fn dump(item: item::Model, reviews: Vec<review::Model>) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
            reviews: reviews.into_iter().map(Into::into).collect(),
        }
    }

    pub async fn fetch<C>(db: &C, id: i32) -> Result<Option<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        let Some(item) = item::Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        let reviews = item.reviews(db).await?;

        Ok(Some(Self::dump(item, reviews)))
    }

    pub async fn fetch_all<C>(db: &C) -> Result<Vec<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        let rows = item::Entity::find()
            .order_by_asc(item::Column::Id)
            .find_with_related(review::Entity)
            .order_by_asc(review::Column::Id)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(item, reviews)| Self::dump(item, reviews))
            .collect())
    }

    /// Parses an item payload. `name` and `price` are writable.
    pub fn load(payload: Json) -> Result<item::ActiveModel, SchemaError> {
        let input: ItemInput = parse("item", payload)?;

        Ok(item::ActiveModel {
            name: set_if_present(input.name),
            price: set_if_present(input.price),
            ..Default::default()
        })
    }
}

impl ReviewSchema {
    pub fn dump(
        review: review::Model,
        customer: Option<customer::Model>,
        item: Option<item::Model>,
    ) -> Self {
        Self {
            id: review.id,
            comment: review.comment,
            customer: customer.map(Into::into),
            item: item.map(Into::into),
        }
    }

    pub async fn fetch<C>(db: &C, id: i32) -> Result<Option<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        let Some(review) = review::Entity::find_by_id(id).one(db).await? else {
            return Ok(None);
        };
        let customer = review.customer(db).await?;
        let item = review.item(db).await?;

        Ok(Some(Self::dump(review, customer, item)))
    }

    pub async fn fetch_all<C>(db: &C) -> Result<Vec<Self>, DbErr>
    where
        C: ConnectionTrait,
    {
        let rows = review::Entity::find()
            .order_by_asc(review::Column::Id)
            .find_also_related(customer::Entity)
            .all(db)
            .await?;

        let item_ids: Vec<i32> = rows.iter().filter_map(|(r, _)| r.item_id).collect();
        let items: HashMap<i32, item::Model> = if item_ids.is_empty() {
            HashMap::new()
        } else {
            item::Entity::find()
                .filter(item::Column::Id.is_in(item_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|item| (item.id, item))
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|(review, customer)| {
                let item = review.item_id.and_then(|id| items.get(&id).cloned());
                Self::dump(review, customer, item)
            })
            .collect())
    }

    /// Parses a review payload. Only `comment` is writable; the customer and
    /// item links are set by the caller.
    pub fn load(payload: Json) -> Result<review::ActiveModel, SchemaError> {
        let input: ReviewInput = parse("review", payload)?;

        Ok(review::ActiveModel {
            comment: set_if_present(input.comment),
            ..Default::default()
        })
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CustomerInput {
    #[serde(default, deserialize_with = "present")]
    name: Option<Option<String>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ItemInput {
    #[serde(default, deserialize_with = "present")]
    name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    price: Option<Option<f64>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ReviewInput {
    #[serde(default, deserialize_with = "present")]
    comment: Option<Option<String>>,
}

fn parse<T>(entity: &'static str, payload: Json) -> Result<T, SchemaError>
where
    T: for<'de> Deserialize<'de>,
{
    serde_json::from_value(payload).map_err(|source| SchemaError::Load { entity, source })
}

// Distinguishes an explicit `null` (Some(None)) from a missing key (None).
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn set_if_present<V>(value: Option<V>) -> ActiveValue<V>
where
    V: Into<Value>,
{
    match value {
        Some(v) => ActiveValue::Set(v),
        None => ActiveValue::NotSet,
    }
}
