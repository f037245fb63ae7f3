//! Store port for owner-scoped, transactional order mutation.

use crate::board::domain::{
    Column, ColumnId, OwnerId, Task, TaskId, TaskOrderEntry, TaskPriority,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for order store operations.
pub type OrderStoreResult<T> = Result<T, OrderStoreError>;

/// Optional filters for task listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Only tasks with exactly this status label.
    pub status: Option<String>,
    /// Only tasks with this priority.
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    /// Restricts the listing to a status label.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Restricts the listing to a priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Returns whether `task` passes the filter.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let status_ok = self
            .status
            .as_deref()
            .is_none_or(|status| task.status() == status);
        let priority_ok = self
            .priority
            .is_none_or(|priority| task.priority() == priority);
        status_ok && priority_ok
    }
}

/// Persistence contract for columns, tasks and their order values.
///
/// Every operation is filtered by owner: rows belonging to another owner are
/// invisible to reads and excluded from writes. Cross-owner policy (rejecting
/// a move into a foreign column) belongs to the calling service, not to the
/// store. Each mutating call commits atomically or not at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Stores a new column.
    ///
    /// # Errors
    ///
    /// Returns [`OrderStoreError::DuplicateColumn`] when the identifier is
    /// already taken.
    async fn insert_column(&self, column: &Column) -> OrderStoreResult<()>;

    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`OrderStoreError::DuplicateTask`] when the identifier is
    /// already taken or [`OrderStoreError::MissingColumn`] when the referenced
    /// column does not exist.
    async fn insert_task(&self, task: &Task) -> OrderStoreResult<()>;

    /// Finds a column owned by `owner`.
    async fn find_column(
        &self,
        owner: OwnerId,
        id: ColumnId,
    ) -> OrderStoreResult<Option<Column>>;

    /// Finds a task owned by `owner`.
    async fn find_task(&self, owner: OwnerId, id: TaskId) -> OrderStoreResult<Option<Task>>;

    /// Returns the owner's columns sorted by `(order, id)`.
    async fn list_columns(&self, owner: OwnerId) -> OrderStoreResult<Vec<Column>>;

    /// Returns the owner's tasks passing `filter`, sorted by `(order, id)`.
    async fn list_tasks(&self, owner: OwnerId, filter: &TaskFilter)
    -> OrderStoreResult<Vec<Task>>;

    /// Returns the subset of `ids` that name columns owned by `owner`.
    async fn owned_column_ids(
        &self,
        owner: OwnerId,
        ids: &[ColumnId],
    ) -> OrderStoreResult<Vec<ColumnId>>;

    /// Sets each owned column's order to its index in `ordered_ids`.
    ///
    /// Returns the number of rows updated.
    async fn reorder_columns(
        &self,
        owner: OwnerId,
        ordered_ids: &[ColumnId],
        at: DateTime<Utc>,
    ) -> OrderStoreResult<u64>;

    /// Sets order and column for every listed task owned by `owner` in one
    /// batched statement.
    ///
    /// Returns the number of rows updated.
    async fn reorder_tasks(
        &self,
        owner: OwnerId,
        entries: &[TaskOrderEntry],
        at: DateTime<Utc>,
    ) -> OrderStoreResult<u64>;

    /// Places one owned task at `order` in `column_id`.
    ///
    /// Returns the updated task, or `None` when no owned task matched.
    async fn move_task(
        &self,
        owner: OwnerId,
        task_id: TaskId,
        column_id: ColumnId,
        order: i32,
        at: DateTime<Utc>,
    ) -> OrderStoreResult<Option<Task>>;

    /// Deletes an owned column and all of its tasks in one transaction.
    ///
    /// Returns whether a column existed.
    async fn delete_column(&self, owner: OwnerId, column_id: ColumnId) -> OrderStoreResult<bool>;
}

/// Errors returned by order store implementations.
#[derive(Debug, Clone, Error)]
pub enum OrderStoreError {
    /// A column with the same identifier already exists.
    #[error("duplicate column identifier: {0}")]
    DuplicateColumn(ColumnId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A task references a column that does not exist.
    #[error("column not found: {0}")]
    MissingColumn(ColumnId),

    /// Persistence-layer failure; the transaction was rolled back.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl OrderStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
