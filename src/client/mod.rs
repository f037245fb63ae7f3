//! Client side of board ordering.
//!
//! [`state::ClientOrderState`] mirrors the board and applies moves
//! speculatively, [`drag::DragSession`] turns pointer gestures into a single
//! [`domain::DragIntent`], and [`services::SyncReconciler`] persists that
//! intent through an [`ports::OrderGateway`] and rolls the mirror back when
//! the server refuses it.

pub mod adapters;
pub mod domain;
pub mod drag;
pub mod ports;
pub mod services;
pub mod state;

#[cfg(test)]
mod tests;
