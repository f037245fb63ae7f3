//! Shared helpers for in-memory integration tests.

use std::sync::Arc;

use kanban_order::{
    board::{
        adapters::memory::InMemoryOrderStore,
        domain::{Board, Column, ColumnId, OwnerId, Task, TaskDraft, TaskId},
        services::OrderCoordinator,
    },
    client::{
        adapters::LocalGateway,
        services::{ReconcileConfig, SyncReconciler},
        state::ClientOrderState,
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Coordinator over the in-memory store.
pub type TestCoordinator = OrderCoordinator<InMemoryOrderStore, DefaultClock>;

/// Gateway over the in-memory store.
pub type TestGateway = LocalGateway<InMemoryOrderStore, DefaultClock>;

/// Store plus a coordinator sharing it.
pub struct Backend {
    pub store: Arc<InMemoryOrderStore>,
    pub coordinator: TestCoordinator,
}

/// Provides a fresh store and coordinator for each test.
#[fixture]
pub fn backend() -> Backend {
    let store = Arc::new(InMemoryOrderStore::new());
    let coordinator = OrderCoordinator::new(Arc::clone(&store), Arc::new(DefaultClock));
    Backend { store, coordinator }
}

impl Backend {
    /// Gateway acting as `owner`.
    pub fn gateway(&self, owner: OwnerId) -> TestGateway {
        LocalGateway::new(
            OrderCoordinator::new(Arc::clone(&self.store), Arc::new(DefaultClock)),
            owner,
        )
    }

    /// Reconciler acting as `owner`.
    pub fn reconciler(&self, owner: OwnerId, config: ReconcileConfig) -> SyncReconciler<TestGateway> {
        SyncReconciler::new(self.gateway(owner), config)
    }

    /// Creates one column per name, ordered as listed.
    pub async fn columns(&self, owner: OwnerId, names: &[&str]) -> Vec<ColumnId> {
        let mut ids = Vec::new();
        for (order, name) in (0..).zip(names) {
            let column = self
                .coordinator
                .create_column(owner, *name, order)
                .await
                .expect("column creation should succeed");
            ids.push(column.id());
        }
        ids
    }

    /// Creates one task per title in `column_id`, ordered as listed.
    pub async fn tasks(&self, owner: OwnerId, column_id: ColumnId, titles: &[&str]) -> Vec<TaskId> {
        let mut ids = Vec::new();
        for (order, title) in (0..).zip(titles) {
            let task = self
                .coordinator
                .create_task(owner, TaskDraft::new(column_id, *title, order))
                .await
                .expect("task creation should succeed");
            ids.push(task.id());
        }
        ids
    }

    /// Authoritative board for `owner`.
    pub async fn board(&self, owner: OwnerId) -> Board {
        self.coordinator
            .board(owner)
            .await
            .expect("board read should succeed")
    }

    /// Client mirror seeded from the store.
    pub async fn client(&self, owner: OwnerId) -> ClientOrderState {
        ClientOrderState::from_board(self.board(owner).await)
    }
}

/// Stored `(column, order)` of a task.
pub fn stored_placement(board: &Board, id: TaskId) -> (ColumnId, i32) {
    board
        .tasks
        .iter()
        .find(|task| task.id() == id)
        .map(|task| (task.column_id(), task.order()))
        .expect("task should be stored")
}

/// Column ids in display order.
pub fn column_ids(board: &Board) -> Vec<ColumnId> {
    board.columns.iter().map(Column::id).collect()
}

/// Task ids of a column in display order.
pub fn task_ids(board: &Board, column_id: ColumnId) -> Vec<TaskId> {
    board.tasks_in(column_id).map(Task::id).collect()
}
