//! Owner-scoped read model of a whole board.

use super::{Column, ColumnId, Task};
use serde::{Deserialize, Serialize};

/// Canonical board contents for one owner.
///
/// Columns and tasks are each sorted by `(order, id)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// The owner's columns in display order.
    pub columns: Vec<Column>,
    /// The owner's tasks in display order.
    pub tasks: Vec<Task>,
}

impl Board {
    /// Returns the tasks in `column_id`, keeping display order.
    pub fn tasks_in(&self, column_id: ColumnId) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |task| task.column_id() == column_id)
    }
}
