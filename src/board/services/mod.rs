//! Application services for owner-scoped ordering.

mod coordinator;
mod requests;

pub use coordinator::{OrderCoordinator, OrderingError, OrderingResult};
pub use requests::{MoveTaskRequest, ReorderColumnsRequest, ReorderTasksRequest, ValidationError};
