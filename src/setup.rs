//! Connection settings and table layout.

use crate::entity::{customer, item, review};
use sea_orm::{
    sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Table, TableCreateStatement},
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityName, ExecResult,
};
use serde::Deserialize;
use tracing::instrument;

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_owned(),
            max_connections: None,
            sqlx_logging: true,
        }
    }
}

impl DatabaseConfig {
    /// Takes the url from `DATABASE_URL`, falling back to an in-memory SQLite database.
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned()),
            ..Default::default()
        }
    }

    pub fn options(&self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(self.url.clone());
        opt.sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(log::LevelFilter::Debug);
        if let Some(max) = self.max_connections {
            opt.max_connections(max);
        }
        opt
    }

    pub async fn connect(&self) -> Result<DatabaseConnection, DbErr> {
        tracing::debug!(max_connections = ?self.max_connections, "connecting to database");
        Database::connect(self.options()).await
    }
}

/// Foreign key name following `fk_<table>_<column>_<referenced_table>`.
pub fn fk_name(table: &str, column: &str, referenced: &str) -> String {
    format!("fk_{table}_{column}_{referenced}")
}

async fn create_table<C>(db: &C, stmt: &TableCreateStatement) -> Result<ExecResult, DbErr>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    db.execute(builder.build(stmt)).await
}

/// Creates `customers`, `items` and `reviews` if they do not exist yet.
#[instrument(level = "trace", skip(db))]
pub async fn create_tables<C>(db: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    create_table(db, &customer_table()).await?;
    create_table(db, &item_table()).await?;
    create_table(db, &review_table()).await?;
    Ok(())
}

pub fn customer_table() -> TableCreateStatement {
    Table::create()
        .table(customer::Entity)
        .if_not_exists()
        .col(
            ColumnDef::new(customer::Column::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(customer::Column::Name).string())
        .to_owned()
}

pub fn item_table() -> TableCreateStatement {
    Table::create()
        .table(item::Entity)
        .if_not_exists()
        .col(
            ColumnDef::new(item::Column::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(item::Column::Name).string())
        .col(ColumnDef::new(item::Column::Price).double())
        .to_owned()
}

pub fn review_table() -> TableCreateStatement {
    let (reviews, customers, items) = (review::Entity, customer::Entity, item::Entity);

    Table::create()
        .table(reviews)
        .if_not_exists()
        .col(
            ColumnDef::new(review::Column::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(review::Column::Comment).string())
        .col(ColumnDef::new(review::Column::CustomerId).integer())
        .col(ColumnDef::new(review::Column::ItemId).integer())
        .foreign_key(
            ForeignKey::create()
                .name(fk_name(reviews.table_name(), "customer_id", customers.table_name()))
                .from(reviews, review::Column::CustomerId)
                .to(customers, customer::Column::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .foreign_key(
            ForeignKey::create()
                .name(fk_name(reviews.table_name(), "item_id", items.table_name()))
                .from(reviews, review::Column::ItemId)
                .to(items, item::Column::Id)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}
