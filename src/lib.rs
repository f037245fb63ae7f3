//! Kanban board ordering.
//!
//! Keeps the display order of columns and of tasks within columns
//! consistent between an authoritative store and an optimistic client.
//!
//! # Architecture
//!
//! The server side follows hexagonal architecture principles:
//!
//! - **Domain**: columns, tasks and the `(order, id)` sibling ordering rule
//! - **Ports**: the [`board::ports::OrderStore`] persistence trait
//! - **Adapters**: in-memory and `PostgreSQL` stores
//! - **Services**: the ownership-checking [`board::services::OrderCoordinator`]
//!
//! # Modules
//!
//! - [`board`]: authoritative ordering with atomic batch updates
//! - [`client`]: speculative mirror, drag gestures and reconciliation

pub mod board;
pub mod client;
