//! Adapter implementations for the order store port.

pub mod memory;
pub mod postgres;
