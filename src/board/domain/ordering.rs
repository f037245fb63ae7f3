//! Sibling ordering rules shared by the store adapters and the client mirror.
//!
//! Order values are not unique on creation, so every read sorts by
//! `(order, id)`: ties fall back to ascending identifier.

use super::{Column, ColumnId, Task, TaskId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One row of a bulk task reorder: the task's new order and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOrderEntry {
    /// Task being placed.
    pub id: TaskId,
    /// New order value within `column_id`.
    pub order: i32,
    /// Column the task is placed in.
    pub column_id: ColumnId,
}

impl TaskOrderEntry {
    /// Creates an entry.
    #[must_use]
    pub const fn new(id: TaskId, order: i32, column_id: ColumnId) -> Self {
        Self {
            id,
            order,
            column_id,
        }
    }
}

/// Display ordering for columns.
#[must_use]
pub fn compare_columns(left: &Column, right: &Column) -> Ordering {
    left.order()
        .cmp(&right.order())
        .then_with(|| left.id().cmp(&right.id()))
}

/// Display ordering for tasks within a column.
#[must_use]
pub fn compare_tasks(left: &Task, right: &Task) -> Ordering {
    left.order()
        .cmp(&right.order())
        .then_with(|| left.id().cmp(&right.id()))
}

/// Sorts columns into display order.
pub fn sort_columns(columns: &mut [Column]) {
    columns.sort_by(compare_columns);
}

/// Sorts tasks into display order.
///
/// Tasks from different columns are not grouped; callers filter by column
/// first when they need a sibling group.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(compare_tasks);
}

/// Converts a 0-based list position into an order value.
///
/// Saturates at `i32::MAX`; boards never hold that many siblings.
#[must_use]
pub fn position_to_order(position: usize) -> i32 {
    i32::try_from(position).unwrap_or(i32::MAX)
}
