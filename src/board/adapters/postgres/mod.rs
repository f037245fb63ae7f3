//! `PostgreSQL` adapter for the order store port.

mod models;
mod repository;
mod schema;

pub use repository::{BoardPgPool, PostgresOrderStore};
