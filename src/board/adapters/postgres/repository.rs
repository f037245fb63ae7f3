//! `PostgreSQL` order store implementation.
//!
//! Bulk reorders are single set-based statements over bound arrays
//! (`UPDATE … FROM UNNEST(...)`), each run inside an explicit
//! `READ COMMITTED` transaction.

use super::{
    models::{ColumnRow, NewColumnRow, NewTaskRow, TaskRow},
    schema::{board_columns, board_tasks},
};
use crate::board::{
    domain::{
        Column, ColumnId, OwnerId, PersistedColumnData, PersistedTaskData, Task, TaskId,
        TaskOrderEntry, TaskPriority,
    },
    ports::{OrderStore, OrderStoreError, OrderStoreResult, TaskFilter},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{Array, Int4, Timestamptz, Uuid as SqlUuid};
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by the board adapter.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

const REORDER_COLUMNS_SQL: &str = concat!(
    "UPDATE board_columns AS c ",
    "SET sort_order = (v.position - 1)::INTEGER, updated_at = $3 ",
    "FROM UNNEST($1::UUID[]) WITH ORDINALITY AS v(id, position) ",
    "WHERE c.id = v.id AND c.owner_id = $2",
);

const REORDER_TASKS_SQL: &str = concat!(
    "UPDATE board_tasks AS t ",
    "SET sort_order = v.sort_order, column_id = v.column_id, updated_at = $5 ",
    "FROM UNNEST($1::UUID[], $2::INTEGER[], $3::UUID[]) AS v(id, sort_order, column_id) ",
    "WHERE t.id = v.id AND t.owner_id = $4",
);

/// `PostgreSQL`-backed order store.
#[derive(Debug, Clone)]
pub struct PostgresOrderStore {
    pool: BoardPgPool,
}

impl PostgresOrderStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> OrderStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> OrderStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(OrderStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(OrderStoreError::persistence)?
    }

    async fn run_transaction<F, T>(&self, f: F) -> OrderStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> OrderStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        self.run_blocking(move |connection| {
            connection.build_transaction().read_committed().run(f)
        })
        .await
    }
}

impl From<DieselError> for OrderStoreError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn insert_column(&self, column: &Column) -> OrderStoreResult<()> {
        let column_id = column.id();
        let new_row = NewColumnRow {
            id: column_id.into_inner(),
            owner_id: column.owner_id().into_inner(),
            name: column.name().to_owned(),
            sort_order: column.order(),
            created_at: column.created_at(),
            updated_at: column.updated_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(board_columns::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        OrderStoreError::DuplicateColumn(column_id)
                    }
                    _ => OrderStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn insert_task(&self, task: &Task) -> OrderStoreResult<()> {
        let task_id = task.id();
        let column_id = task.column_id();
        let new_row = to_new_task_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(board_tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        OrderStoreError::DuplicateTask(task_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        OrderStoreError::MissingColumn(column_id)
                    }
                    _ => OrderStoreError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_column(
        &self,
        owner: OwnerId,
        id: ColumnId,
    ) -> OrderStoreResult<Option<Column>> {
        self.run_blocking(move |connection| {
            let row = board_columns::table
                .filter(board_columns::id.eq(id.into_inner()))
                .filter(board_columns::owner_id.eq(owner.into_inner()))
                .select(ColumnRow::as_select())
                .first::<ColumnRow>(connection)
                .optional()?;
            Ok(row.map(row_to_column))
        })
        .await
    }

    async fn find_task(&self, owner: OwnerId, id: TaskId) -> OrderStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = board_tasks::table
                .filter(board_tasks::id.eq(id.into_inner()))
                .filter(board_tasks::owner_id.eq(owner.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_columns(&self, owner: OwnerId) -> OrderStoreResult<Vec<Column>> {
        self.run_blocking(move |connection| {
            let rows = board_columns::table
                .filter(board_columns::owner_id.eq(owner.into_inner()))
                .order((board_columns::sort_order.asc(), board_columns::id.asc()))
                .select(ColumnRow::as_select())
                .load::<ColumnRow>(connection)?;
            Ok(rows.into_iter().map(row_to_column).collect())
        })
        .await
    }

    async fn list_tasks(
        &self,
        owner: OwnerId,
        filter: &TaskFilter,
    ) -> OrderStoreResult<Vec<Task>> {
        let status = filter.status.clone();
        let priority = filter.priority;
        self.run_blocking(move |connection| {
            let mut query = board_tasks::table
                .filter(board_tasks::owner_id.eq(owner.into_inner()))
                .into_boxed();
            if let Some(status_label) = status {
                query = query.filter(board_tasks::status.eq(status_label));
            }
            if let Some(wanted) = priority {
                query = query.filter(board_tasks::priority.eq(wanted.as_str()));
            }
            let rows = query
                .order((board_tasks::sort_order.asc(), board_tasks::id.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn owned_column_ids(
        &self,
        owner: OwnerId,
        ids: &[ColumnId],
    ) -> OrderStoreResult<Vec<ColumnId>> {
        let wanted: Vec<Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let found = board_columns::table
                .filter(board_columns::owner_id.eq(owner.into_inner()))
                .filter(board_columns::id.eq_any(wanted))
                .select(board_columns::id)
                .load::<Uuid>(connection)?;
            Ok(found.into_iter().map(ColumnId::from_uuid).collect())
        })
        .await
    }

    async fn reorder_columns(
        &self,
        owner: OwnerId,
        ordered_ids: &[ColumnId],
        at: DateTime<Utc>,
    ) -> OrderStoreResult<u64> {
        if ordered_ids.is_empty() {
            return Ok(0);
        }
        let ids: Vec<Uuid> = ordered_ids.iter().map(|id| id.into_inner()).collect();

        self.run_transaction(move |connection| {
            let updated = diesel::sql_query(REORDER_COLUMNS_SQL)
                .bind::<Array<SqlUuid>, _>(ids)
                .bind::<SqlUuid, _>(owner.into_inner())
                .bind::<Timestamptz, _>(at)
                .execute(connection)?;
            Ok(row_count(updated))
        })
        .await
    }

    async fn reorder_tasks(
        &self,
        owner: OwnerId,
        entries: &[TaskOrderEntry],
        at: DateTime<Utc>,
    ) -> OrderStoreResult<u64> {
        if entries.is_empty() {
            return Ok(0);
        }
        let ids: Vec<Uuid> = entries.iter().map(|entry| entry.id.into_inner()).collect();
        let orders: Vec<i32> = entries.iter().map(|entry| entry.order).collect();
        let columns: Vec<Uuid> = entries
            .iter()
            .map(|entry| entry.column_id.into_inner())
            .collect();

        self.run_transaction(move |connection| {
            let updated = diesel::sql_query(REORDER_TASKS_SQL)
                .bind::<Array<SqlUuid>, _>(ids)
                .bind::<Array<Int4>, _>(orders)
                .bind::<Array<SqlUuid>, _>(columns)
                .bind::<SqlUuid, _>(owner.into_inner())
                .bind::<Timestamptz, _>(at)
                .execute(connection)?;
            Ok(row_count(updated))
        })
        .await
    }

    async fn move_task(
        &self,
        owner: OwnerId,
        task_id: TaskId,
        column_id: ColumnId,
        order: i32,
        at: DateTime<Utc>,
    ) -> OrderStoreResult<Option<Task>> {
        self.run_transaction(move |connection| {
            let row = diesel::update(
                board_tasks::table
                    .filter(board_tasks::id.eq(task_id.into_inner()))
                    .filter(board_tasks::owner_id.eq(owner.into_inner())),
            )
            .set((
                board_tasks::column_id.eq(column_id.into_inner()),
                board_tasks::sort_order.eq(order),
                board_tasks::updated_at.eq(at),
            ))
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(connection)
            .optional()
            .map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                    OrderStoreError::MissingColumn(column_id)
                }
                _ => OrderStoreError::persistence(err),
            })?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete_column(&self, owner: OwnerId, column_id: ColumnId) -> OrderStoreResult<bool> {
        self.run_transaction(move |connection| {
            diesel::delete(
                board_tasks::table
                    .filter(board_tasks::column_id.eq(column_id.into_inner()))
                    .filter(board_tasks::owner_id.eq(owner.into_inner())),
            )
            .execute(connection)?;

            let deleted = diesel::delete(
                board_columns::table
                    .filter(board_columns::id.eq(column_id.into_inner()))
                    .filter(board_columns::owner_id.eq(owner.into_inner())),
            )
            .execute(connection)?;
            Ok(deleted > 0)
        })
        .await
    }
}

fn row_count(rows: usize) -> u64 {
    u64::try_from(rows).unwrap_or(u64::MAX)
}

fn to_new_task_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        owner_id: task.owner_id().into_inner(),
        column_id: task.column_id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().to_owned(),
        sort_order: task.order(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_column(row: ColumnRow) -> Column {
    Column::from_persisted(PersistedColumnData {
        id: ColumnId::from_uuid(row.id),
        owner_id: OwnerId::from_uuid(row.owner_id),
        name: row.name,
        order: row.sort_order,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_task(row: TaskRow) -> OrderStoreResult<Task> {
    let TaskRow {
        id,
        owner_id,
        column_id,
        title,
        description,
        priority: persisted_priority,
        status,
        sort_order,
        created_at,
        updated_at,
    } = row;

    let priority = TaskPriority::try_from(persisted_priority.as_str())
        .map_err(OrderStoreError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        owner_id: OwnerId::from_uuid(owner_id),
        column_id: ColumnId::from_uuid(column_id),
        title,
        description,
        priority,
        status,
        order: sort_order,
        created_at,
        updated_at,
    }))
}
