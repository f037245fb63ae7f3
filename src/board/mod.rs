//! Server-side ordering core for owner-scoped kanban boards.
//!
//! Columns are ordered per owner and tasks per column. Bulk reorders are
//! committed atomically so no reader observes a half-applied order. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Ownership-checking services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
