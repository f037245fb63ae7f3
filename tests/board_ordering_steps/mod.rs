//! Step definitions for board ordering scenarios.

pub mod given;
pub mod when;
pub mod world;
