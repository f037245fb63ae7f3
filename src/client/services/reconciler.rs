//! Persists a committed drag and reconciles the mirror with the outcome.

use crate::board::services::{MoveTaskRequest, ReorderColumnsRequest, ReorderTasksRequest};
use crate::client::domain::DragIntent;
use crate::client::drag::{DragError, DragPhase, DragSession, PendingCommit};
use crate::client::ports::{GatewayError, OrderGateway};
use crate::client::state::ClientOrderState;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// What to do with the mirror after the server accepts an intent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessPolicy {
    /// Trust the speculative state.
    #[default]
    KeepSpeculative,
    /// Replace the mirror with a freshly fetched board.
    RefreshFromServer,
}

/// What to do with the mirror after the server rejects an intent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Restore the snapshot.
    #[default]
    Rollback,
    /// Restore the snapshot, then refetch the board.
    RollbackAndRefresh,
}

/// Reconciliation behaviour loaded from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ReconcileConfig {
    /// Policy applied on success.
    pub on_success: SuccessPolicy,
    /// Policy applied on failure.
    pub on_failure: FailurePolicy,
}

impl ReconcileConfig {
    /// Parses a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the parse error for malformed input.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// How a successful dispatch left the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The speculative state was kept.
    Kept,
    /// The mirror was replaced with the server's board.
    Refreshed,
    /// The refetch after success failed; the speculative state was kept.
    RefreshFailed,
}

/// Dispatch failures.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The session had no outstanding commit.
    #[error(transparent)]
    Session(#[from] DragError),

    /// The server rejected the intent; the mirror was rolled back.
    #[error("changes could not be saved: {source}")]
    RolledBack {
        /// Gateway failure that caused the rollback.
        source: GatewayError,
        /// Whether the board was refetched afterwards.
        refreshed: bool,
    },
}

/// Sends each committed intent exactly once and settles the session.
pub struct SyncReconciler<G: OrderGateway> {
    gateway: G,
    config: ReconcileConfig,
}

impl<G: OrderGateway> SyncReconciler<G> {
    /// Creates a reconciler.
    #[must_use]
    pub const fn new(gateway: G, config: ReconcileConfig) -> Self {
        Self { gateway, config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> ReconcileConfig {
        self.config
    }

    /// Persists `pending`, then keeps, refreshes or rolls back the mirror
    /// according to the configured policies. The session is settled back to
    /// idle whatever the result.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Session`] when `session` is not committing, in
    /// which case nothing is sent, or [`SyncError::RolledBack`] when the
    /// server refused the intent. A rollback also records a user-visible
    /// error on `state`; a later successful dispatch clears it.
    pub async fn dispatch(
        &self,
        session: &mut DragSession,
        state: &mut ClientOrderState,
        pending: PendingCommit,
    ) -> Result<SyncOutcome, SyncError> {
        if *session.phase() != DragPhase::Committing {
            return Err(DragError::NotCommitting.into());
        }
        let (intent, snapshot) = pending.into_parts();
        let result = self.send(&intent).await;
        session.settle()?;

        match result {
            Ok(()) => {
                debug!(?intent, "drag persisted");
                state.clear_error();
                Ok(self.after_success(state).await)
            }
            Err(err) => {
                warn!(?intent, error = %err, "drag rejected, rolling back");
                state.restore(snapshot);
                state.set_error(format!("Changes could not be saved: {err}"));
                let refreshed = match self.config.on_failure {
                    FailurePolicy::Rollback => false,
                    FailurePolicy::RollbackAndRefresh => self.refresh(state).await,
                };
                Err(SyncError::RolledBack {
                    source: err,
                    refreshed,
                })
            }
        }
    }

    async fn send(&self, intent: &DragIntent) -> Result<(), GatewayError> {
        match intent {
            DragIntent::ReorderColumns { ordered_ids } => {
                let request = ReorderColumnsRequest::new(ordered_ids.iter().copied());
                self.gateway.reorder_columns(&request).await
            }
            DragIntent::ReorderTasks { entries } => {
                let request = ReorderTasksRequest::new(entries.iter().copied());
                self.gateway.reorder_tasks(&request).await
            }
            DragIntent::MoveTask {
                task_id,
                column_id,
                order,
            } => {
                let request = MoveTaskRequest::new(*column_id, *order);
                self.gateway.move_task(*task_id, request).await.map(|_| ())
            }
        }
    }

    async fn after_success(&self, state: &mut ClientOrderState) -> SyncOutcome {
        match self.config.on_success {
            SuccessPolicy::KeepSpeculative => SyncOutcome::Kept,
            SuccessPolicy::RefreshFromServer => {
                if self.refresh(state).await {
                    SyncOutcome::Refreshed
                } else {
                    SyncOutcome::RefreshFailed
                }
            }
        }
    }

    async fn refresh(&self, state: &mut ClientOrderState) -> bool {
        match self.gateway.fetch_board().await {
            Ok(board) => {
                state.replace(board);
                true
            }
            Err(err) => {
                warn!(error = %err, "board refresh failed");
                false
            }
        }
    }
}
