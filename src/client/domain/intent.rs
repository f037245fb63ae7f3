//! The single persistence intent a finished gesture produces.

use crate::board::domain::{ColumnId, TaskId, TaskOrderEntry};
use serde::{Deserialize, Serialize};

/// Persistence call committed by a drag gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DragIntent {
    /// Persist the full resulting column sequence.
    ReorderColumns {
        /// Every column id in its new display order.
        ordered_ids: Vec<ColumnId>,
    },
    /// Persist the recomputed orders of one column's tasks.
    ReorderTasks {
        /// New order for every task of the column.
        entries: Vec<TaskOrderEntry>,
    },
    /// Persist one task's move into another column.
    MoveTask {
        /// Task being moved.
        task_id: TaskId,
        /// Target column.
        column_id: ColumnId,
        /// Order within the target column.
        order: i32,
    },
}
