//! Ownership-checking coordinator in front of the order store.

use super::requests::{MoveTaskRequest, ReorderColumnsRequest, ReorderTasksRequest, ValidationError};
use crate::board::{
    domain::{Board, BoardDomainError, Column, ColumnId, OwnerId, Task, TaskDraft, TaskId},
    ports::{OrderStore, OrderStoreError, TaskFilter},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Service-level errors for ordering operations.
#[derive(Debug, Error)]
pub enum OrderingError {
    /// The request shape is invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Entity construction failed validation.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// The task is absent or owned by someone else.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
    /// The target column is absent or owned by someone else.
    #[error("target column {column_id} does not belong to the caller")]
    ForbiddenMove {
        /// Column that was rejected.
        column_id: ColumnId,
    },
    /// The store failed and rolled the transaction back.
    #[error(transparent)]
    Storage(#[from] OrderStoreError),
}

impl OrderingError {
    /// Returns the HTTP status a boundary adapter should answer with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::Domain(_) => 400,
            Self::ForbiddenMove { .. } => 403,
            Self::TaskNotFound(_) => 404,
            Self::Storage(_) => 500,
        }
    }
}

/// Result type for ordering service operations.
pub type OrderingResult<T> = Result<T, OrderingError>;

/// Owner-scoped ordering service.
///
/// Rejects operations that would cross owner boundaries before delegating to
/// the store. Concurrent calls for the same owner are not serialized: the
/// last committed write wins.
#[derive(Clone)]
pub struct OrderCoordinator<S, C>
where
    S: OrderStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> OrderCoordinator<S, C>
where
    S: OrderStore,
    C: Clock + Send + Sync,
{
    /// Creates a new coordinator.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    async fn ensure_column_owned(&self, owner: OwnerId, column_id: ColumnId) -> OrderingResult<Column> {
        match self.store.find_column(owner, column_id).await? {
            Some(column) => Ok(column),
            None => {
                warn!(%owner, %column_id, "rejected column outside owner scope");
                Err(OrderingError::ForbiddenMove { column_id })
            }
        }
    }

    /// Creates a column at the creator-supplied order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Domain`] for an invalid name or order, or
    /// [`OrderingError::Storage`] when persistence fails.
    pub async fn create_column(
        &self,
        owner: OwnerId,
        name: impl Into<String> + Send,
        order: i32,
    ) -> OrderingResult<Column> {
        let column = Column::new(owner, name, order, &*self.clock)?;
        self.store.insert_column(&column).await?;
        debug!(%owner, column_id = %column.id(), order, "created column");
        Ok(column)
    }

    /// Creates a task in one of the owner's columns.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::ForbiddenMove`] when the draft's column is not
    /// owned by `owner`, [`OrderingError::Domain`] for invalid fields, or
    /// [`OrderingError::Storage`].
    pub async fn create_task(&self, owner: OwnerId, draft: TaskDraft) -> OrderingResult<Task> {
        self.ensure_column_owned(owner, draft.column_id()).await?;
        let task = Task::new(owner, draft, &*self.clock)?;
        self.store.insert_task(&task).await?;
        debug!(%owner, task_id = %task.id(), column_id = %task.column_id(), "created task");
        Ok(task)
    }

    /// Returns the owner's columns and tasks in display order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Storage`] when a read fails.
    pub async fn board(&self, owner: OwnerId) -> OrderingResult<Board> {
        let columns = self.store.list_columns(owner).await?;
        let tasks = self.store.list_tasks(owner, &TaskFilter::default()).await?;
        Ok(Board { columns, tasks })
    }

    /// Lists the owner's tasks passing `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Storage`] when the read fails.
    pub async fn list_tasks(&self, owner: OwnerId, filter: &TaskFilter) -> OrderingResult<Vec<Task>> {
        Ok(self.store.list_tasks(owner, filter).await?)
    }

    /// Finds one of the owner's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::TaskNotFound`] when absent or not owned.
    pub async fn find_task(&self, owner: OwnerId, task_id: TaskId) -> OrderingResult<Task> {
        self.store
            .find_task(owner, task_id)
            .await?
            .ok_or(OrderingError::TaskNotFound(task_id))
    }

    /// Assigns each owned column its position in `request.ordered_ids`.
    ///
    /// Ids the owner does not own are skipped. An empty list is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Validation`] for repeated ids or
    /// [`OrderingError::Storage`] when the transaction fails.
    pub async fn reorder_columns(
        &self,
        owner: OwnerId,
        request: &ReorderColumnsRequest,
    ) -> OrderingResult<()> {
        request.validate()?;
        if request.ordered_ids.is_empty() {
            return Ok(());
        }
        let updated = self
            .store
            .reorder_columns(owner, &request.ordered_ids, self.clock.utc())
            .await?;
        debug!(%owner, requested = request.ordered_ids.len(), updated, "reordered columns");
        Ok(())
    }

    /// Applies every `(order, columnId)` entry for the owner's tasks in one
    /// batch.
    ///
    /// Entries naming tasks the owner does not own are skipped. An empty list
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Validation`] for malformed entries,
    /// [`OrderingError::ForbiddenMove`] when an entry targets a column the
    /// owner does not own, or [`OrderingError::Storage`].
    pub async fn reorder_tasks(
        &self,
        owner: OwnerId,
        request: &ReorderTasksRequest,
    ) -> OrderingResult<()> {
        request.validate()?;
        if request.tasks.is_empty() {
            return Ok(());
        }

        let targets = request.target_columns();
        let owned = self.store.owned_column_ids(owner, &targets).await?;
        if let Some(column_id) = targets.into_iter().find(|id| !owned.contains(id)) {
            warn!(%owner, %column_id, "rejected task reorder into foreign column");
            return Err(OrderingError::ForbiddenMove { column_id });
        }

        let updated = self
            .store
            .reorder_tasks(owner, &request.tasks, self.clock.utc())
            .await?;
        debug!(%owner, requested = request.tasks.len(), updated, "reordered tasks");
        Ok(())
    }

    /// Moves one task to `request.new_column_id` at `request.new_order`.
    ///
    /// Sibling orders are left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::TaskNotFound`] when the task is absent or not
    /// owned, [`OrderingError::ForbiddenMove`] when the target column is
    /// absent or not owned, [`OrderingError::Validation`] for a negative
    /// order, or [`OrderingError::Storage`].
    pub async fn move_task(
        &self,
        owner: OwnerId,
        task_id: TaskId,
        request: MoveTaskRequest,
    ) -> OrderingResult<Task> {
        request.validate()?;
        let task = self.store.find_task(owner, task_id).await?;
        let column = self.store.find_column(owner, request.new_column_id).await?;

        if task.is_none() {
            return Err(OrderingError::TaskNotFound(task_id));
        }
        if column.is_none() {
            warn!(%owner, %task_id, column_id = %request.new_column_id, "rejected move into foreign column");
            return Err(OrderingError::ForbiddenMove {
                column_id: request.new_column_id,
            });
        }

        // The column can vanish between the check above and the write.
        let moved = match self
            .store
            .move_task(
                owner,
                task_id,
                request.new_column_id,
                request.new_order,
                self.clock.utc(),
            )
            .await
        {
            Ok(moved) => moved.ok_or(OrderingError::TaskNotFound(task_id))?,
            Err(OrderStoreError::MissingColumn(column_id)) => {
                warn!(%owner, %task_id, %column_id, "target column removed during move");
                return Err(OrderingError::ForbiddenMove { column_id });
            }
            Err(err) => return Err(err.into()),
        };
        debug!(%owner, %task_id, column_id = %moved.column_id(), order = moved.order(), "moved task");
        Ok(moved)
    }

    /// Deletes an owned column together with its tasks.
    ///
    /// Returns whether the column existed.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Storage`] when the transaction fails; in that
    /// case neither the column nor its tasks are removed.
    pub async fn delete_column(&self, owner: OwnerId, column_id: ColumnId) -> OrderingResult<bool> {
        let existed = self.store.delete_column(owner, column_id).await?;
        debug!(%owner, %column_id, existed, "deleted column");
        Ok(existed)
    }
}
