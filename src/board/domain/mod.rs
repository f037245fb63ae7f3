//! Domain model for owner-scoped columns and tasks.
//!
//! The board domain holds the entities whose relative order the rest of the
//! crate maintains. It carries no infrastructure concerns.

mod board;
mod column;
mod error;
mod ids;
mod ordering;
mod task;

pub use board::Board;
pub use column::{Column, PersistedColumnData};
pub use error::{BoardDomainError, ParseTaskPriorityError};
pub use ids::{ColumnId, OwnerId, TaskId};
pub use ordering::{
    TaskOrderEntry, compare_columns, compare_tasks, position_to_order, sort_columns, sort_tasks,
};
pub use task::{PersistedTaskData, Task, TaskDraft, TaskPriority};
