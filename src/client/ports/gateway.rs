//! Port through which the client reaches the authoritative board.

use crate::board::domain::{Board, Task, TaskId};
use crate::board::services::{MoveTaskRequest, ReorderColumnsRequest, ReorderTasksRequest};
use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by a gateway.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The server answered with a non-success status.
    #[error("request rejected with status {status}: {message}")]
    Rejected {
        /// HTTP-style status code.
        status: u16,
        /// Server-provided reason.
        message: String,
    },

    /// The server could not be reached.
    #[error("board service unavailable: {0}")]
    Unavailable(String),
}

/// Result type for gateway calls.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Authenticated calls to the ordering service on behalf of one owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Persists a full column sequence.
    async fn reorder_columns(&self, request: &ReorderColumnsRequest) -> GatewayResult<()>;

    /// Persists a batch of task orders.
    async fn reorder_tasks(&self, request: &ReorderTasksRequest) -> GatewayResult<()>;

    /// Moves one task and returns its persisted state.
    async fn move_task(&self, task_id: TaskId, request: MoveTaskRequest) -> GatewayResult<Task>;

    /// Fetches the canonical board.
    async fn fetch_board(&self) -> GatewayResult<Board>;
}
