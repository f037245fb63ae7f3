//! Thread-safe in-memory order store.
//!
//! Every mutation runs against a private copy of the tables while the write
//! lock is held and is swapped in only when the whole operation succeeds, so
//! readers see either the old or the new state. A one-shot fault can be armed
//! at a named point to exercise rollback.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::board::{
    domain::{
        Column, ColumnId, OwnerId, Task, TaskId, TaskOrderEntry, position_to_order,
        sort_columns, sort_tasks,
    },
    ports::{OrderStore, OrderStoreError, OrderStoreResult, TaskFilter},
};

/// Point inside a store transaction where an injected fault fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultPoint {
    /// After all column orders were rewritten, before commit.
    ReorderColumns,
    /// After all task rows were rewritten, before commit.
    ReorderTasks,
    /// After the task was relocated, before commit.
    MoveTask,
    /// After the column's tasks were deleted, before the column itself.
    DeleteColumnTasks,
}

/// Thread-safe in-memory order store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    tables: BoardTables,
    armed_fault: Option<FaultPoint>,
}

#[derive(Debug, Clone, Default)]
struct BoardTables {
    columns: HashMap<ColumnId, Column>,
    tasks: HashMap<TaskId, Task>,
}

/// Trips the armed fault, if any, when its point is reached.
struct FaultGate {
    armed: Option<FaultPoint>,
}

impl FaultGate {
    fn checkpoint(&mut self, point: FaultPoint) -> OrderStoreResult<()> {
        if self.armed != Some(point) {
            return Ok(());
        }
        self.armed = None;
        Err(OrderStoreError::persistence(std::io::Error::other(
            format!("injected fault at {point:?}"),
        )))
    }
}

impl InMemoryOrderStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a one-shot fault that aborts the next transaction reaching
    /// `point`.
    pub fn inject_fault(&self, point: FaultPoint) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.armed_fault = Some(point);
    }

    fn read<T>(&self, f: impl FnOnce(&BoardTables) -> T) -> OrderStoreResult<T> {
        let state = self.state.read().map_err(|err| {
            OrderStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(f(&state.tables))
    }

    fn transaction<T, F>(&self, f: F) -> OrderStoreResult<T>
    where
        F: FnOnce(&mut BoardTables, &mut FaultGate) -> OrderStoreResult<T>,
    {
        let mut state = self.state.write().map_err(|err| {
            OrderStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut working = state.tables.clone();
        let mut gate = FaultGate {
            armed: state.armed_fault,
        };
        let result = f(&mut working, &mut gate);
        state.armed_fault = gate.armed;
        let value = result?;
        state.tables = working;
        Ok(value)
    }
}

fn owned_column(tables: &BoardTables, owner: OwnerId, id: ColumnId) -> Option<&Column> {
    tables
        .columns
        .get(&id)
        .filter(|column| column.owner_id() == owner)
}

fn owned_task_mut(tables: &mut BoardTables, owner: OwnerId, id: TaskId) -> Option<&mut Task> {
    tables
        .tasks
        .get_mut(&id)
        .filter(|task| task.owner_id() == owner)
}

fn count(rows: usize) -> u64 {
    u64::try_from(rows).unwrap_or(u64::MAX)
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert_column(&self, column: &Column) -> OrderStoreResult<()> {
        self.transaction(|tables, _| {
            if tables.columns.contains_key(&column.id()) {
                return Err(OrderStoreError::DuplicateColumn(column.id()));
            }
            tables.columns.insert(column.id(), column.clone());
            Ok(())
        })
    }

    async fn insert_task(&self, task: &Task) -> OrderStoreResult<()> {
        self.transaction(|tables, _| {
            if tables.tasks.contains_key(&task.id()) {
                return Err(OrderStoreError::DuplicateTask(task.id()));
            }
            if !tables.columns.contains_key(&task.column_id()) {
                return Err(OrderStoreError::MissingColumn(task.column_id()));
            }
            tables.tasks.insert(task.id(), task.clone());
            Ok(())
        })
    }

    async fn find_column(
        &self,
        owner: OwnerId,
        id: ColumnId,
    ) -> OrderStoreResult<Option<Column>> {
        self.read(|tables| owned_column(tables, owner, id).cloned())
    }

    async fn find_task(&self, owner: OwnerId, id: TaskId) -> OrderStoreResult<Option<Task>> {
        self.read(|tables| {
            tables
                .tasks
                .get(&id)
                .filter(|task| task.owner_id() == owner)
                .cloned()
        })
    }

    async fn list_columns(&self, owner: OwnerId) -> OrderStoreResult<Vec<Column>> {
        self.read(|tables| {
            let mut columns: Vec<Column> = tables
                .columns
                .values()
                .filter(|column| column.owner_id() == owner)
                .cloned()
                .collect();
            sort_columns(&mut columns);
            columns
        })
    }

    async fn list_tasks(
        &self,
        owner: OwnerId,
        filter: &TaskFilter,
    ) -> OrderStoreResult<Vec<Task>> {
        self.read(|tables| {
            let mut tasks: Vec<Task> = tables
                .tasks
                .values()
                .filter(|task| task.owner_id() == owner && filter.matches(task))
                .cloned()
                .collect();
            sort_tasks(&mut tasks);
            tasks
        })
    }

    async fn owned_column_ids(
        &self,
        owner: OwnerId,
        ids: &[ColumnId],
    ) -> OrderStoreResult<Vec<ColumnId>> {
        self.read(|tables| {
            ids.iter()
                .copied()
                .filter(|id| owned_column(tables, owner, *id).is_some())
                .collect()
        })
    }

    async fn reorder_columns(
        &self,
        owner: OwnerId,
        ordered_ids: &[ColumnId],
        at: DateTime<Utc>,
    ) -> OrderStoreResult<u64> {
        self.transaction(|tables, gate| {
            let mut updated = 0_usize;
            for (position, id) in ordered_ids.iter().enumerate() {
                let Some(column) = tables
                    .columns
                    .get_mut(id)
                    .filter(|column| column.owner_id() == owner)
                else {
                    continue;
                };
                column.reposition(position_to_order(position), at);
                updated += 1;
            }
            gate.checkpoint(FaultPoint::ReorderColumns)?;
            Ok(count(updated))
        })
    }

    async fn reorder_tasks(
        &self,
        owner: OwnerId,
        entries: &[TaskOrderEntry],
        at: DateTime<Utc>,
    ) -> OrderStoreResult<u64> {
        self.transaction(|tables, gate| {
            let mut updated = 0_usize;
            for entry in entries {
                let Some(task) = owned_task_mut(tables, owner, entry.id) else {
                    continue;
                };
                task.relocate(entry.column_id, entry.order, at);
                updated += 1;
            }
            gate.checkpoint(FaultPoint::ReorderTasks)?;
            Ok(count(updated))
        })
    }

    async fn move_task(
        &self,
        owner: OwnerId,
        task_id: TaskId,
        column_id: ColumnId,
        order: i32,
        at: DateTime<Utc>,
    ) -> OrderStoreResult<Option<Task>> {
        self.transaction(|tables, gate| {
            if !tables.columns.contains_key(&column_id) {
                return Err(OrderStoreError::MissingColumn(column_id));
            }
            let Some(task) = owned_task_mut(tables, owner, task_id) else {
                return Ok(None);
            };
            task.relocate(column_id, order, at);
            let moved = task.clone();
            gate.checkpoint(FaultPoint::MoveTask)?;
            Ok(Some(moved))
        })
    }

    async fn delete_column(&self, owner: OwnerId, column_id: ColumnId) -> OrderStoreResult<bool> {
        self.transaction(|tables, gate| {
            tables
                .tasks
                .retain(|_, task| !(task.column_id() == column_id && task.owner_id() == owner));
            gate.checkpoint(FaultPoint::DeleteColumnTasks)?;

            let exists = owned_column(tables, owner, column_id).is_some();
            if exists {
                tables.columns.remove(&column_id);
            }
            Ok(exists)
        })
    }
}
