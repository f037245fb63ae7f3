//! Client-side mirror of the board with speculative reordering.
//!
//! The mirror renders from its own copy of columns and tasks. Speculative
//! moves apply immediately and hand back a [`Snapshot`] of the collection
//! they touched so a failed persistence call can be undone exactly.

use crate::board::domain::{
    Board, Column, ColumnId, Task, TaskId, TaskOrderEntry, compare_columns, compare_tasks,
    position_to_order,
};
use crate::client::domain::Snapshot;
use thiserror::Error;

/// Errors raised by speculative operations on the mirror.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ClientStateError {
    /// The column is not in the mirror.
    #[error("column {0} is not on the board")]
    UnknownColumn(ColumnId),

    /// The task is not in the mirror.
    #[error("task {0} is not on the board")]
    UnknownTask(TaskId),
}

/// Speculative local copy of an owner's board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientOrderState {
    columns: Vec<Column>,
    tasks: Vec<Task>,
    error: Option<String>,
}

impl ClientOrderState {
    /// Creates a mirror seeded from a canonical board.
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        Self {
            columns: board.columns,
            tasks: board.tasks,
            error: None,
        }
    }

    /// Replaces both collections with a fresh canonical board.
    ///
    /// Any pending error message is kept; callers clear it explicitly.
    pub fn replace(&mut self, board: Board) {
        self.columns = board.columns;
        self.tasks = board.tasks;
    }

    /// Raw column collection in storage position, not display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Raw task collection in storage position, not display order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Looks up a column.
    #[must_use]
    pub fn column(&self, column_id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id() == column_id)
    }

    /// Looks up a task.
    #[must_use]
    pub fn task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Columns sorted by `(order, id)`.
    #[must_use]
    pub fn sorted_columns(&self) -> Vec<&Column> {
        let mut columns: Vec<&Column> = self.columns.iter().collect();
        columns.sort_by(|left, right| compare_columns(left, right));
        columns
    }

    /// Column ids in display order.
    #[must_use]
    pub fn column_ids(&self) -> Vec<ColumnId> {
        self.sorted_columns()
            .into_iter()
            .map(Column::id)
            .collect()
    }

    /// Tasks of `column_id` sorted by `(order, id)`.
    #[must_use]
    pub fn tasks_in(&self, column_id: ColumnId) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|task| task.column_id() == column_id)
            .collect();
        tasks.sort_by(|left, right| compare_tasks(left, right));
        tasks
    }

    /// Task ids of `column_id` in display order.
    #[must_use]
    pub fn task_ids_in(&self, column_id: ColumnId) -> Vec<TaskId> {
        self.tasks_in(column_id).into_iter().map(Task::id).collect()
    }

    /// Reorder entries describing `column_id` as currently displayed.
    #[must_use]
    pub fn order_entries(&self, column_id: ColumnId) -> Vec<TaskOrderEntry> {
        self.tasks_in(column_id)
            .into_iter()
            .map(|task| TaskOrderEntry::new(task.id(), task.order(), column_id))
            .collect()
    }

    /// Current user-visible error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Records a user-visible error.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Clears the user-visible error.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Captures the column collection.
    #[must_use]
    pub fn snapshot_columns(&self) -> Snapshot {
        Snapshot::Columns(self.columns.clone())
    }

    /// Captures the task collection.
    #[must_use]
    pub fn snapshot_tasks(&self) -> Snapshot {
        Snapshot::Tasks(self.tasks.clone())
    }

    /// Moves `active` into the display slot held by `over`.
    ///
    /// Every column is then renumbered to its 0-based position. Returns
    /// the column collection as it was before the move.
    ///
    /// # Errors
    ///
    /// Returns [`ClientStateError::UnknownColumn`] when either id is
    /// missing; the mirror is left untouched.
    pub fn move_column_speculative(
        &mut self,
        active: ColumnId,
        over: ColumnId,
    ) -> Result<Snapshot, ClientStateError> {
        let mut ordered = self.column_ids();
        let from = position_of(&ordered, active).ok_or(ClientStateError::UnknownColumn(active))?;
        let to = position_of(&ordered, over).ok_or(ClientStateError::UnknownColumn(over))?;

        let snapshot = self.snapshot_columns();
        let moved = ordered.remove(from);
        ordered.insert(to, moved);
        for (position, column_id) in ordered.iter().enumerate() {
            if let Some(column) = self
                .columns
                .iter_mut()
                .find(|column| column.id() == *column_id)
            {
                column.set_order(position_to_order(position));
            }
        }
        Ok(snapshot)
    }

    /// Places `task_id` at `new_order` within `new_column`.
    ///
    /// The task is taken out of its current column and inserted at the
    /// requested position, clamped to the target column's length. Both the
    /// target and the source column are renumbered densely from 0. Returns
    /// the task collection as it was before the move.
    ///
    /// # Errors
    ///
    /// Returns [`ClientStateError`] when the task or column is missing; the
    /// mirror is left untouched.
    pub fn move_task_speculative(
        &mut self,
        task_id: TaskId,
        new_column: ColumnId,
        new_order: i32,
    ) -> Result<Snapshot, ClientStateError> {
        let source = self
            .task(task_id)
            .map(Task::column_id)
            .ok_or(ClientStateError::UnknownTask(task_id))?;
        if self.column(new_column).is_none() {
            return Err(ClientStateError::UnknownColumn(new_column));
        }

        let snapshot = self.snapshot_tasks();
        let mut target: Vec<TaskId> = self
            .task_ids_in(new_column)
            .into_iter()
            .filter(|id| *id != task_id)
            .collect();
        let slot = usize::try_from(new_order).unwrap_or(0).min(target.len());
        target.insert(slot, task_id);
        self.renumber(new_column, &target);

        if source != new_column {
            let remaining = self.task_ids_in(source);
            self.renumber(source, &remaining);
        }
        Ok(snapshot)
    }

    /// Reinstates a collection captured earlier.
    pub fn restore(&mut self, snapshot: Snapshot) {
        match snapshot {
            Snapshot::Columns(columns) => self.columns = columns,
            Snapshot::Tasks(tasks) => self.tasks = tasks,
        }
    }

    fn renumber(&mut self, column_id: ColumnId, ordered: &[TaskId]) {
        for (position, task_id) in ordered.iter().enumerate() {
            if let Some(task) = self.tasks.iter_mut().find(|task| task.id() == *task_id) {
                task.place(column_id, position_to_order(position));
            }
        }
    }
}

fn position_of<T: PartialEq>(items: &[T], wanted: T) -> Option<usize> {
    items.iter().position(|item| *item == wanted)
}
