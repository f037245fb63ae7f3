//! Owner isolation through the client gateway.

use super::helpers::{Backend, backend, stored_placement};
use kanban_order::board::domain::OwnerId;
use kanban_order::board::services::MoveTaskRequest;
use kanban_order::client::ports::{GatewayError, OrderGateway};
use rstest::rstest;

#[rstest]
#[tokio::test]
async fn move_into_foreign_column_is_forbidden(backend: Backend) {
    let owner = OwnerId::new();
    let stranger = OwnerId::new();
    let own = backend.columns(owner, &["Mine"]).await;
    let foreign = backend.columns(stranger, &["Theirs"]).await;
    let task = backend.tasks(owner, own[0], &["T"]).await;
    let gateway = backend.gateway(owner);

    let err = gateway
        .move_task(task[0], MoveTaskRequest::new(foreign[0], 0))
        .await
        .expect_err("foreign column");

    assert!(matches!(err, GatewayError::Rejected { status: 403, .. }));
    assert_eq!(stored_placement(&backend.board(owner).await, task[0]), (own[0], 0));
}

#[rstest]
#[tokio::test]
async fn foreign_task_reads_as_missing(backend: Backend) {
    let owner = OwnerId::new();
    let stranger = OwnerId::new();
    let own = backend.columns(owner, &["Mine"]).await;
    let theirs = backend.columns(stranger, &["Theirs"]).await;
    let task = backend.tasks(stranger, theirs[0], &["T"]).await;
    let gateway = backend.gateway(owner);

    let err = gateway
        .move_task(task[0], MoveTaskRequest::new(own[0], 0))
        .await
        .expect_err("foreign task");

    assert!(matches!(err, GatewayError::Rejected { status: 404, .. }));
}

#[rstest]
#[tokio::test]
async fn fetched_board_only_holds_own_entities(backend: Backend) {
    let owner = OwnerId::new();
    let stranger = OwnerId::new();
    backend.columns(owner, &["A", "B"]).await;
    backend.columns(stranger, &["X"]).await;
    let gateway = backend.gateway(owner);

    let board = gateway.fetch_board().await.expect("board read");

    assert_eq!(board.columns.len(), 2);
    assert!(board.columns.iter().all(|column| column.owner_id() == owner));
}
