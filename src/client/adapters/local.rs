//! Gateway that calls an in-process coordinator for a fixed owner.

use crate::board::domain::{Board, OwnerId, Task, TaskId};
use crate::board::ports::OrderStore;
use crate::board::services::{
    MoveTaskRequest, OrderCoordinator, OrderingError, ReorderColumnsRequest, ReorderTasksRequest,
};
use crate::client::ports::{GatewayError, GatewayResult, OrderGateway};
use async_trait::async_trait;
use mockable::Clock;

impl From<OrderingError> for GatewayError {
    fn from(err: OrderingError) -> Self {
        Self::Rejected {
            status: err.status_code(),
            message: err.to_string(),
        }
    }
}

/// [`OrderGateway`] bound to one authenticated owner.
#[derive(Clone)]
pub struct LocalGateway<S, C>
where
    S: OrderStore,
    C: Clock + Send + Sync,
{
    coordinator: OrderCoordinator<S, C>,
    owner: OwnerId,
}

impl<S, C> LocalGateway<S, C>
where
    S: OrderStore,
    C: Clock + Send + Sync,
{
    /// Creates a gateway acting as `owner`.
    #[must_use]
    pub const fn new(coordinator: OrderCoordinator<S, C>, owner: OwnerId) -> Self {
        Self { coordinator, owner }
    }

    /// Owner the gateway acts for.
    #[must_use]
    pub const fn owner(&self) -> OwnerId {
        self.owner
    }
}

#[async_trait]
impl<S, C> OrderGateway for LocalGateway<S, C>
where
    S: OrderStore,
    C: Clock + Send + Sync,
{
    async fn reorder_columns(&self, request: &ReorderColumnsRequest) -> GatewayResult<()> {
        Ok(self.coordinator.reorder_columns(self.owner, request).await?)
    }

    async fn reorder_tasks(&self, request: &ReorderTasksRequest) -> GatewayResult<()> {
        Ok(self.coordinator.reorder_tasks(self.owner, request).await?)
    }

    async fn move_task(&self, task_id: TaskId, request: MoveTaskRequest) -> GatewayResult<Task> {
        Ok(self.coordinator.move_task(self.owner, task_id, request).await?)
    }

    async fn fetch_board(&self) -> GatewayResult<Board> {
        Ok(self.coordinator.board(self.owner).await?)
    }
}
