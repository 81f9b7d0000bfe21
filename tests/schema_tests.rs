pub mod common;

use common::*;
use customer_reviews::{
    entity::review,
    schema::{CustomerSchema, Dump, ItemSchema, ReviewSchema},
    Mutation,
};
use pretty_assertions::assert_eq;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DbErr};
use serde_json::{json, Value};

fn keys(value: &Value) -> Vec<&str> {
    value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect()
}

#[tokio::test]
async fn customer_view_follows_item_deletion() -> Result<(), DbErr> {
    let ctx = TestContext::new().await;
    let db = &ctx.db;
    insert_customer(db, 1, "Ana").await?;
    insert_item(db, 1, "Mug", 9.99).await?;
    insert_review(db, 1, "Great", 1, 1).await?;

    let view = CustomerSchema::fetch(db, 1).await?.unwrap();
    assert_eq!(
        view.to_json().unwrap(),
        json!({ "id": 1, "name": "Ana", "reviews": [{ "id": 1, "comment": "Great" }] })
    );

    Mutation::delete_item(db, 1).await?;

    let view = CustomerSchema::fetch(db, 1).await?.unwrap();
    assert_eq!(
        view.to_json().unwrap(),
        json!({ "id": 1, "name": "Ana", "reviews": [] })
    );

    Ok(())
}

#[tokio::test]
async fn nested_reviews_carry_no_back_links() -> Result<(), DbErr> {
    let ctx = TestContext::new().await;
    let db = &ctx.db;
    insert_customer(db, 1, "Ana").await?;
    insert_customer(db, 2, "Ben").await?;
    insert_item(db, 1, "Mug", 9.99).await?;
    insert_item(db, 2, "Pen", 1.5).await?;
    insert_review(db, 1, "Great", 1, 1).await?;
    insert_review(db, 2, "Leaks", 1, 2).await?;
    insert_review(db, 3, "Again", 1, 1).await?;
    insert_review(db, 4, "Fine", 2, 1).await?;

    let customer = CustomerSchema::fetch(db, 1).await?.unwrap().to_json().unwrap();
    let reviews = customer["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 3);
    for review in reviews {
        assert_eq!(keys(review), ["comment", "id"]);
    }

    let item = ItemSchema::fetch(db, 1).await?.unwrap().to_json().unwrap();
    assert_eq!(keys(&item), ["id", "name", "price", "reviews"]);
    let reviews = item["reviews"].as_array().unwrap();
    assert_eq!(reviews.len(), 3);
    for review in reviews {
        assert_eq!(keys(review), ["comment", "id"]);
    }

    Ok(())
}

#[tokio::test]
async fn review_view_nests_parents_one_level() -> Result<(), DbErr> {
    let ctx = TestContext::new().await;
    let db = &ctx.db;
    insert_customer(db, 1, "Ana").await?;
    insert_item(db, 1, "Mug", 9.99).await?;
    insert_review(db, 1, "Great", 1, 1).await?;
    insert_review(db, 2, "Again", 1, 1).await?;

    let view = ReviewSchema::fetch(db, 2).await?.unwrap().to_json().unwrap();
    assert_eq!(
        view,
        json!({
            "id": 2,
            "comment": "Again",
            "customer": { "id": 1, "name": "Ana" },
            "item": { "id": 1, "name": "Mug", "price": 9.99 },
        })
    );
    assert!(view["customer"].get("reviews").is_none());
    assert!(view["item"].get("reviews").is_none());

    Ok(())
}

#[tokio::test]
async fn fetch_all_views() -> Result<(), DbErr> {
    let ctx = TestContext::new().await;
    let db = &ctx.db;
    insert_customer(db, 1, "Ana").await?;
    insert_customer(db, 2, "Ben").await?;
    insert_item(db, 1, "Mug", 9.99).await?;
    insert_review(db, 1, "Great", 2, 1).await?;
    review::ActiveModel {
        id: Set(2),
        comment: Set(None),
        customer_id: Set(Some(1)),
        item_id: Set(None),
    }
    .insert(db)
    .await?;

    let customers = CustomerSchema::fetch_all(db).await?;
    assert_eq!(
        CustomerSchema::dump_many(&customers).unwrap(),
        json!([
            { "id": 1, "name": "Ana", "reviews": [{ "id": 2, "comment": null }] },
            { "id": 2, "name": "Ben", "reviews": [{ "id": 1, "comment": "Great" }] },
        ])
    );

    let items = ItemSchema::fetch_all(db).await?;
    assert_eq!(
        ItemSchema::dump_many(&items).unwrap(),
        json!([
            { "id": 1, "name": "Mug", "price": 9.99, "reviews": [{ "id": 1, "comment": "Great" }] },
        ])
    );

    let reviews = ReviewSchema::fetch_all(db).await?;
    assert_eq!(
        ReviewSchema::dump_many(&reviews).unwrap(),
        json!([
            {
                "id": 1,
                "comment": "Great",
                "customer": { "id": 2, "name": "Ben" },
                "item": { "id": 1, "name": "Mug", "price": 9.99 },
            },
            {
                "id": 2,
                "comment": null,
                "customer": { "id": 1, "name": "Ana" },
                "item": null,
            },
        ])
    );

    Ok(())
}

#[tokio::test]
async fn fetch_missing_entity() -> Result<(), DbErr> {
    let ctx = TestContext::new().await;

    assert_eq!(CustomerSchema::fetch(&ctx.db, 1).await?, None);
    assert_eq!(ItemSchema::fetch(&ctx.db, 1).await?, None);
    assert_eq!(ReviewSchema::fetch(&ctx.db, 1).await?, None);

    Ok(())
}

#[tokio::test]
async fn loaded_payload_is_insertable() -> Result<(), DbErr> {
    let ctx = TestContext::new().await;
    let db = &ctx.db;

    let customer = CustomerSchema::load(json!({ "name": "Ana" }))
        .unwrap()
        .insert(db)
        .await?;
    let item = ItemSchema::load(json!({ "name": "Mug", "price": 9.99 }))
        .unwrap()
        .insert(db)
        .await?;

    let mut review = ReviewSchema::load(json!({ "comment": "Great" })).unwrap();
    review.customer_id = Set(Some(customer.id));
    review.item_id = Set(Some(item.id));
    let review = review.insert(db).await?;

    assert_eq!(
        ReviewSchema::fetch(db, review.id).await?.unwrap().to_json().unwrap(),
        json!({
            "id": review.id,
            "comment": "Great",
            "customer": { "id": customer.id, "name": "Ana" },
            "item": { "id": item.id, "name": "Mug", "price": 9.99 },
        })
    );

    Ok(())
}

#[tokio::test]
async fn review_views_pair_items_by_foreign_key() -> Result<(), DbErr> {
    let ctx = TestContext::new().await;
    let db = &ctx.db;
    insert_customer(db, 1, "Ana").await?;
    insert_item(db, 1, "Mug", 9.99).await?;
    insert_item(db, 2, "Pen", 1.5).await?;
    insert_review(db, 1, "Leaks", 1, 2).await?;
    review::ActiveModel {
        id: Set(2),
        comment: Set(Some("No item".to_owned())),
        customer_id: Set(Some(1)),
        item_id: Set(None),
    }
    .insert(db)
    .await?;
    insert_review(db, 3, "Great", 1, 1).await?;
    insert_review(db, 4, "Refill", 1, 2).await?;

    let pairs: Vec<(i32, Option<i32>)> = ReviewSchema::fetch_all(db)
        .await?
        .into_iter()
        .map(|view| (view.id, view.item.map(|item| item.id)))
        .collect();

    assert_eq!(pairs, [(1, Some(2)), (2, None), (3, Some(1)), (4, Some(2))]);

    Ok(())
}
