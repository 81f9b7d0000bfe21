#![allow(dead_code)]

use customer_reviews::{
    entity::{customer, item, review},
    setup::{self, DatabaseConfig},
};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, DbErr};

pub struct TestContext {
    pub db: DatabaseConnection,
}

impl TestContext {
    pub async fn new() -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        // every connection to `sqlite::memory:` is its own database
        let config = DatabaseConfig {
            max_connections: Some(1),
            sqlx_logging: false,
            ..Default::default()
        };
        let db = config.connect().await.unwrap();
        setup::create_tables(&db).await.unwrap();

        Self { db }
    }
}

pub async fn insert_customer(
    db: &DatabaseConnection,
    id: i32,
    name: &str,
) -> Result<customer::Model, DbErr> {
    customer::ActiveModel {
        id: Set(id),
        name: Set(Some(name.to_owned())),
    }
    .insert(db)
    .await
}

pub async fn insert_item(
    db: &DatabaseConnection,
    id: i32,
    name: &str,
    price: f64,
) -> Result<item::Model, DbErr> {
    item::ActiveModel {
        id: Set(id),
        name: Set(Some(name.to_owned())),
        price: Set(Some(price)),
    }
    .insert(db)
    .await
}

pub async fn insert_review(
    db: &DatabaseConnection,
    id: i32,
    comment: &str,
    customer_id: i32,
    item_id: i32,
) -> Result<review::Model, DbErr> {
    review::ActiveModel {
        id: Set(id),
        comment: Set(Some(comment.to_owned())),
        customer_id: Set(Some(customer_id)),
        item_id: Set(Some(item_id)),
    }
    .insert(db)
    .await
}
