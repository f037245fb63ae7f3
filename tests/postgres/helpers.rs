//! Shared helpers for `PostgreSQL` integration tests.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use kanban_order::board::{
    adapters::postgres::PostgresOrderStore,
    domain::{Column, ColumnId, OwnerId, Task, TaskDraft},
    ports::OrderStore,
};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::fixture;
use tokio::runtime::Runtime;
use tracing::warn;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// SQL creating the board tables.
const CREATE_BOARD_TABLES_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_board_tables/up.sql");

/// Template database name for the pre-migrated schema.
const TEMPLATE_DB: &str = "kanban_order_test_template";

/// Trigger that makes every column delete fail inside the database.
pub const REFUSE_COLUMN_DELETE_SQL: &str = concat!(
    "CREATE FUNCTION refuse_column_delete() RETURNS trigger AS $$ ",
    "BEGIN RAISE EXCEPTION 'column delete refused'; END; ",
    "$$ LANGUAGE plpgsql; ",
    "CREATE TRIGGER refuse_column_delete BEFORE DELETE ON board_columns ",
    "FOR EACH ROW EXECUTE FUNCTION refuse_column_delete();",
);

/// Creates a tokio runtime for driving the async store in tests.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(CREATE_BOARD_TABLES_SQL)
                .map_err(|e| eyre::eyre!("migration failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// Drops the per-test database even when the test panics.
pub struct CleanupGuard {
    cluster: &'static TestCluster,
    db_name: String,
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        if let Err(err) = self.cluster.drop_database(self.db_name.as_str()) {
            warn!(db_name = %self.db_name, error = %err, "failed to drop test database");
        }
    }
}

/// A migrated database private to one test, with a store over it.
pub struct PgBoard {
    pub store: PostgresOrderStore,
    pub rt: Runtime,
    pub owner: OwnerId,
    cluster: &'static TestCluster,
    db_name: String,
    _guard: CleanupGuard,
}

/// Provides a fresh database cloned from the migrated template.
#[fixture]
pub fn pg_board(shared_test_cluster: &'static TestCluster) -> PgBoard {
    let cluster = shared_test_cluster;
    ensure_template(cluster).expect("template setup");
    let db_name = format!("board_{}", uuid::Uuid::new_v4().simple());
    cluster
        .create_database_from_template(db_name.as_str(), TEMPLATE_DB)
        .expect("database from template");
    let guard = CleanupGuard {
        cluster,
        db_name: db_name.clone(),
    };
    let manager = ConnectionManager::<PgConnection>::new(cluster.connection().database_url(&db_name));
    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .expect("connection pool");
    PgBoard {
        store: PostgresOrderStore::new(pool),
        rt: test_runtime(),
        owner: OwnerId::new(),
        cluster,
        db_name,
        _guard: guard,
    }
}

impl PgBoard {
    /// Runs raw SQL against this test's database.
    pub fn execute(&self, sql: &str) {
        let url = self.cluster.connection().database_url(&self.db_name);
        let mut conn = PgConnection::establish(&url).expect("admin connection");
        conn.batch_execute(sql).expect("raw SQL");
    }

    /// Inserts a column for `owner`.
    pub fn column_for(&self, owner: OwnerId, name: &str, order: i32) -> Column {
        let column = Column::new(owner, name, order, &DefaultClock).expect("valid column");
        self.rt
            .block_on(self.store.insert_column(&column))
            .expect("column insert");
        column
    }

    /// Inserts a column for the default owner.
    pub fn column(&self, name: &str, order: i32) -> Column {
        self.column_for(self.owner, name, order)
    }

    /// Inserts a task for the default owner.
    pub fn task(&self, draft: TaskDraft) -> Task {
        let task = Task::new(self.owner, draft, &DefaultClock).expect("valid task");
        self.rt
            .block_on(self.store.insert_task(&task))
            .expect("task insert");
        task
    }

    /// Stored `(column, order)` of one of the default owner's tasks.
    pub fn placement(&self, task: &Task) -> (ColumnId, i32) {
        let stored = self
            .rt
            .block_on(self.store.find_task(self.owner, task.id()))
            .expect("task lookup")
            .expect("task should exist");
        (stored.column_id(), stored.order())
    }

    /// Stored order of a column owned by `owner`.
    pub fn column_order(&self, owner: OwnerId, column: &Column) -> i32 {
        self.rt
            .block_on(self.store.find_column(owner, column.id()))
            .expect("column lookup")
            .expect("column should exist")
            .order()
    }
}
