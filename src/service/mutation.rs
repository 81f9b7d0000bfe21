use super::not_found;
use crate::entity::{customer, item, prelude::*, review};
use sea_orm::*;
use tracing::instrument;

pub struct Mutation;

impl Mutation {
    pub async fn create_customer<C>(
        db: &C,
        form_data: customer::Model,
    ) -> Result<customer::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        customer::ActiveModel {
            name: Set(form_data.name),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn create_item<C>(db: &C, form_data: item::Model) -> Result<item::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        item::ActiveModel {
            name: Set(form_data.name),
            price: Set(form_data.price),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Fails with the engine's constraint error if the customer or item does not exist.
    pub async fn create_review<C>(db: &C, form_data: review::Model) -> Result<review::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        review::ActiveModel {
            comment: Set(form_data.comment),
            customer_id: Set(form_data.customer_id),
            item_id: Set(form_data.item_id),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    pub async fn update_customer_by_id<C>(
        db: &C,
        id: i32,
        form_data: customer::Model,
    ) -> Result<customer::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let customer: customer::ActiveModel = Customer::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| not_found("customer", id))?
            .into();

        customer::ActiveModel {
            id: customer.id,
            name: Set(form_data.name),
        }
        .update(db)
        .await
    }

    pub async fn update_item_by_id<C>(
        db: &C,
        id: i32,
        form_data: item::Model,
    ) -> Result<item::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let item: item::ActiveModel = Item::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| not_found("item", id))?
            .into();

        item::ActiveModel {
            id: item.id,
            name: Set(form_data.name),
            price: Set(form_data.price),
        }
        .update(db)
        .await
    }

    pub async fn update_review_by_id<C>(
        db: &C,
        id: i32,
        form_data: review::Model,
    ) -> Result<review::Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let review: review::ActiveModel = Review::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| not_found("review", id))?
            .into();

        review::ActiveModel {
            id: review.id,
            comment: Set(form_data.comment),
            customer_id: Set(form_data.customer_id),
            item_id: Set(form_data.item_id),
        }
        .update(db)
        .await
    }

    /// Deletes a customer together with all of its reviews, in one transaction.
    ///
    /// Called on an open transaction this nests, so the caller still decides the outcome.
    #[instrument(level = "trace", skip(db))]
    pub async fn delete_customer<C>(db: &C, id: i32) -> Result<DeleteResult, DbErr>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;

        let customer: customer::ActiveModel = Customer::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| not_found("customer", id))?
            .into();
        let res = customer.delete(&txn).await?;

        txn.commit().await?;
        tracing::debug!(customer_id = id, "customer deleted");
        Ok(res)
    }

    /// Deletes an item together with all of its reviews, in one transaction.
    #[instrument(level = "trace", skip(db))]
    pub async fn delete_item<C>(db: &C, id: i32) -> Result<DeleteResult, DbErr>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;

        let item: item::ActiveModel = Item::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| not_found("item", id))?
            .into();
        let res = item.delete(&txn).await?;

        txn.commit().await?;
        tracing::debug!(item_id = id, "item deleted");
        Ok(res)
    }

    pub async fn delete_review<C>(db: &C, id: i32) -> Result<DeleteResult, DbErr>
    where
        C: ConnectionTrait,
    {
        let review: review::ActiveModel = Review::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| not_found("review", id))?
            .into();

        review.delete(db).await
    }
}
