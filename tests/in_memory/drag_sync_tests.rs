//! Pointer gestures persisted through the local gateway.

use super::helpers::{Backend, backend, column_ids, stored_placement, task_ids};
use kanban_order::board::{adapters::memory::FaultPoint, domain::OwnerId};
use kanban_order::client::{
    domain::{DragEntity, DropTarget, Droppable, Point, Rect},
    drag::{DragConfig, DragPhase, DragSession, DropOutcome},
    services::{FailurePolicy, ReconcileConfig, SuccessPolicy, SyncError, SyncOutcome},
};
use rstest::rstest;

const COLUMN_WIDTH: i32 = 280;
const COLUMN_GAP: i32 = 20;
const CARD_HEIGHT: i32 = 60;

fn column_left(index: i32) -> i32 {
    index * (COLUMN_WIDTH + COLUMN_GAP)
}

#[rstest]
#[tokio::test]
async fn pointer_drag_reorders_columns_end_to_end(backend: Backend) {
    let owner = OwnerId::new();
    let ids = backend.columns(owner, &["A", "B", "C"]).await;
    let mut state = backend.client(owner).await;
    let mut session = DragSession::new(DragConfig::default());
    let droppables: Vec<Droppable> = (0..)
        .zip(&ids)
        .map(|(index, id)| {
            Droppable::new(
                DropTarget::Column(*id),
                Rect::new(column_left(index), 0, COLUMN_WIDTH, 40),
            )
        })
        .collect();
    let header = Rect::new(column_left(2), 0, COLUMN_WIDTH, 40);
    let grab = Point::new(column_left(2) + 10, 20);
    let reconciler = backend.reconciler(owner, ReconcileConfig::default());

    session
        .pointer_down(DragEntity::Column(ids[2]), grab, header)
        .expect("idle session");
    session
        .pointer_move(&mut state, Point::new(grab.x - 30, 20), &droppables)
        .expect("drag starts");
    let outcome = session
        .pointer_up(&mut state, Point::new(10, 20), &droppables)
        .expect("drop resolves");
    let DropOutcome::Commit(pending) = outcome else {
        panic!("expected a commit");
    };
    let synced = reconciler
        .dispatch(&mut session, &mut state, pending)
        .await
        .expect("server accepts");

    assert_eq!(synced, SyncOutcome::Kept);
    let expected = vec![ids[2], ids[0], ids[1]];
    assert_eq!(column_ids(&backend.board(owner).await), expected);
    assert_eq!(state.column_ids(), expected);
    assert_eq!(*session.phase(), DragPhase::Idle);
}

#[rstest]
#[tokio::test]
async fn card_dragged_into_other_column_is_appended(backend: Backend) {
    let owner = OwnerId::new();
    let columns = backend.columns(owner, &["A", "B"]).await;
    let moved = backend.tasks(owner, columns[0], &["T"]).await;
    let siblings = backend.tasks(owner, columns[1], &["P", "Q"]).await;
    let mut state = backend.client(owner).await;
    let mut session = DragSession::default();
    let body = Rect::new(column_left(1), 0, COLUMN_WIDTH, 900);
    let droppables = vec![
        Droppable::new(DropTarget::Column(columns[0]), Rect::new(0, 0, COLUMN_WIDTH, 900)),
        Droppable::new(DropTarget::Column(columns[1]), body),
        Droppable::new(
            DropTarget::Task(siblings[0]),
            Rect::new(column_left(1), 0, COLUMN_WIDTH, CARD_HEIGHT),
        ),
        Droppable::new(
            DropTarget::Task(siblings[1]),
            Rect::new(column_left(1), CARD_HEIGHT, COLUMN_WIDTH, CARD_HEIGHT),
        ),
    ];
    let card = Rect::new(0, 0, COLUMN_WIDTH, CARD_HEIGHT);
    let reconciler = backend.reconciler(owner, ReconcileConfig::default());

    session
        .pointer_down(DragEntity::Task(moved[0]), Point::new(20, 20), card)
        .expect("idle session");
    let below_cards = Point::new(column_left(1) + 20, 20 + 4 * CARD_HEIGHT);
    session
        .pointer_move(&mut state, below_cards, &droppables)
        .expect("drag starts");
    let outcome = session
        .pointer_up(&mut state, below_cards, &droppables)
        .expect("drop resolves");
    let DropOutcome::Commit(pending) = outcome else {
        panic!("expected a commit");
    };
    reconciler
        .dispatch(&mut session, &mut state, pending)
        .await
        .expect("server accepts");

    let board = backend.board(owner).await;
    assert_eq!(stored_placement(&board, moved[0]), (columns[1], 2));
    assert_eq!(stored_placement(&board, siblings[0]), (columns[1], 0));
    assert_eq!(stored_placement(&board, siblings[1]), (columns[1], 1));
    assert!(task_ids(&board, columns[0]).is_empty());
}

#[rstest]
#[tokio::test]
async fn storage_failure_rolls_back_and_refreshes(backend: Backend) {
    let owner = OwnerId::new();
    let columns = backend.columns(owner, &["A", "B"]).await;
    let moved = backend.tasks(owner, columns[0], &["T"]).await;
    let mut state = backend.client(owner).await;
    let before = state.clone();
    let mut session = DragSession::default();
    let config = ReconcileConfig {
        on_success: SuccessPolicy::RefreshFromServer,
        on_failure: FailurePolicy::RollbackAndRefresh,
    };
    let reconciler = backend.reconciler(owner, config);
    backend.store.inject_fault(FaultPoint::MoveTask);

    session
        .start(&state, DragEntity::Task(moved[0]))
        .expect("idle session");
    session
        .over(&mut state, Some(DropTarget::Column(columns[1])))
        .expect("hover handled");
    let Ok(DropOutcome::Commit(pending)) =
        session.end(&mut state, Some(DropTarget::Column(columns[1])))
    else {
        panic!("expected a commit");
    };
    let err = reconciler
        .dispatch(&mut session, &mut state, pending)
        .await
        .expect_err("store fails");

    assert!(matches!(err, SyncError::RolledBack { refreshed: true, .. }));
    assert_eq!(state.tasks(), before.tasks());
    assert!(state.error().is_some());
    assert_eq!(stored_placement(&backend.board(owner).await, moved[0]), (columns[0], 0));
}
