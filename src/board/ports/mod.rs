//! Port contracts for the ordering core.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod repository;

pub use repository::{OrderStore, OrderStoreError, OrderStoreResult, TaskFilter};
#[cfg(test)]
pub use repository::MockOrderStore;
