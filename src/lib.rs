//! Customers, items and the reviews that connect them, on top of SeaORM.
//!
//! - [`entity`] declares the three tables and their relations. Reviews are
//!   owned by both their customer and their item: deleting either parent
//!   removes the review.
//! - [`schema`] renders entities as nested JSON views whose depth is bounded
//!   by construction, and parses the writable fields back in.
//! - [`service`] has the `Query` / `Mutation` helpers a request layer calls.
//! - [`setup`] holds the connection settings and the table DDL.
//!
//! ```ignore
//! use customer_reviews::{schema::{CustomerSchema, Dump}, setup};
//!
//! let db = setup::DatabaseConfig::default().connect().await?;
//! setup::create_tables(&db).await?;
//! let view = CustomerSchema::fetch(&db, 1).await?;
//! ```

pub mod entity;
pub mod schema;
pub mod service;
pub mod setup;

pub use schema::SchemaError;
pub use service::{Mutation, Query};

pub use sea_orm;
