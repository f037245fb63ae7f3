//! Client-side ports.

pub mod gateway;

#[cfg(test)]
pub use gateway::MockOrderGateway;
pub use gateway::{GatewayError, GatewayResult, OrderGateway};
