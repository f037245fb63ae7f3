//! Shared world state for board ordering BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use eyre::eyre;
use kanban_order::{
    board::{
        adapters::memory::InMemoryOrderStore,
        domain::{Board, ColumnId, OwnerId, TaskId},
        services::OrderCoordinator,
    },
    client::{
        adapters::LocalGateway,
        drag::DragSession,
        services::{ReconcileConfig, SyncError, SyncOutcome, SyncReconciler},
        state::ClientOrderState,
    },
};
use mockable::DefaultClock;
use rstest::fixture;

/// Coordinator type used by the BDD world.
pub type TestCoordinator = OrderCoordinator<InMemoryOrderStore, DefaultClock>;

/// Scenario world for board ordering behaviour tests.
pub struct BoardWorld {
    pub store: Arc<InMemoryOrderStore>,
    pub coordinator: TestCoordinator,
    pub owner: OwnerId,
    pub columns: HashMap<String, ColumnId>,
    pub tasks: HashMap<String, TaskId>,
    pub state: ClientOrderState,
    pub session: DragSession,
    pub reconciler: SyncReconciler<LocalGateway<InMemoryOrderStore, DefaultClock>>,
    pub last_sync: Option<Result<SyncOutcome, SyncError>>,
}

impl BoardWorld {
    /// Creates a world with an empty board.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryOrderStore::new());
        let coordinator = OrderCoordinator::new(Arc::clone(&store), Arc::new(DefaultClock));
        let owner = OwnerId::new();
        let gateway = LocalGateway::new(
            OrderCoordinator::new(Arc::clone(&store), Arc::new(DefaultClock)),
            owner,
        );

        Self {
            store,
            coordinator,
            owner,
            columns: HashMap::new(),
            tasks: HashMap::new(),
            state: ClientOrderState::default(),
            session: DragSession::default(),
            reconciler: SyncReconciler::new(gateway, ReconcileConfig::default()),
            last_sync: None,
        }
    }

    /// Looks up a named column.
    pub fn column(&self, name: &str) -> Result<ColumnId, eyre::Report> {
        self.columns
            .get(name)
            .copied()
            .ok_or_else(|| eyre!("unknown column {name}"))
    }

    /// Looks up a named task.
    pub fn task(&self, name: &str) -> Result<TaskId, eyre::Report> {
        self.tasks
            .get(name)
            .copied()
            .ok_or_else(|| eyre!("unknown task {name}"))
    }

    /// Reads the authoritative board.
    pub fn stored_board(&self) -> Result<Board, eyre::Report> {
        Ok(run_async(self.coordinator.board(self.owner))?)
    }

    /// Seeds the client mirror from the store.
    pub fn load_client(&mut self) -> Result<(), eyre::Report> {
        self.state = ClientOrderState::from_board(self.stored_board()?);
        Ok(())
    }

    /// Resolves column ids back to their scenario names.
    pub fn column_names(&self, ids: &[ColumnId]) -> Vec<String> {
        ids.iter().map(|id| name_of(&self.columns, *id)).collect()
    }

    /// Resolves task ids back to their scenario names.
    pub fn task_names(&self, ids: &[TaskId]) -> Vec<String> {
        ids.iter().map(|id| name_of(&self.tasks, *id)).collect()
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn name_of<T: PartialEq>(names: &HashMap<String, T>, wanted: T) -> String {
    names
        .iter()
        .find(|(_, id)| **id == wanted)
        .map_or_else(|| "?".to_owned(), |(name, _)| name.clone())
}

/// Splits a comma separated list of names.
pub fn names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
