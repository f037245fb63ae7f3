//! In-memory order store for tests and single-process use.

mod store;

pub use store::{FaultPoint, InMemoryOrderStore};
