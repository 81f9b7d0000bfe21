use crate::entity::{customer, item, prelude::*, review};
use sea_orm::*;
use tracing::instrument;

pub struct Query;

impl Query {
    pub async fn find_customer_by_id<C>(db: &C, id: i32) -> Result<Option<customer::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Customer::find_by_id(id).one(db).await
    }

    pub async fn find_item_by_id<C>(db: &C, id: i32) -> Result<Option<item::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Item::find_by_id(id).one(db).await
    }

    pub async fn find_review_by_id<C>(db: &C, id: i32) -> Result<Option<review::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Review::find_by_id(id).one(db).await
    }

    /// If ok, returns (customer models, num pages). Pages start at 1; a zero
    /// `page` or `customers_per_page` is rejected.
    #[instrument(level = "trace", skip(db))]
    pub async fn find_customers_in_page<C>(
        db: &C,
        page: u64,
        customers_per_page: u64,
    ) -> Result<(Vec<customer::Model>, u64), DbErr>
    where
        C: ConnectionTrait,
    {
        if customers_per_page == 0 {
            return Err(DbErr::Custom("customers_per_page must be positive".to_owned()));
        }
        if page == 0 {
            return Err(DbErr::Custom("page must be positive".to_owned()));
        }

        let paginator = Customer::find()
            .order_by_asc(customer::Column::Id)
            .paginate(db, customers_per_page);
        let num_pages = paginator.num_pages().await?;

        paginator
            .fetch_page(page - 1)
            .await
            .map(|p| (p, num_pages))
    }

    /// Items reviewed by a customer, one per review. `None` if the customer does not exist.
    #[instrument(level = "trace", skip(db))]
    pub async fn find_items_of_customer<C>(
        db: &C,
        id: i32,
    ) -> Result<Option<Vec<item::Model>>, DbErr>
    where
        C: ConnectionTrait,
    {
        match Customer::find_by_id(id).one(db).await? {
            Some(customer) => customer.items(db).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn find_reviews_of_customer<C>(db: &C, id: i32) -> Result<Vec<review::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Review::find()
            .filter(review::Column::CustomerId.eq(id))
            .order_by_asc(review::Column::Id)
            .all(db)
            .await
    }

    pub async fn find_reviews_of_item<C>(db: &C, id: i32) -> Result<Vec<review::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Review::find()
            .filter(review::Column::ItemId.eq(id))
            .order_by_asc(review::Column::Id)
            .all(db)
            .await
    }
}
