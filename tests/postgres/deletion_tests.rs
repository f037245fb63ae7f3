//! Column deletion tests against `PostgreSQL`.

use super::helpers::{PgBoard, REFUSE_COLUMN_DELETE_SQL, pg_board};
use kanban_order::board::{
    domain::{Column, OwnerId, Task, TaskDraft},
    ports::{OrderStore, OrderStoreError, TaskFilter},
};
use rstest::rstest;

#[rstest]
fn delete_column_removes_its_tasks_only(pg_board: PgBoard) {
    let board = pg_board;
    let a = board.column("A", 0);
    let b = board.column("B", 1);
    board.task(TaskDraft::new(a.id(), "T1", 0));
    board.task(TaskDraft::new(a.id(), "T2", 1));
    let p = board.task(TaskDraft::new(b.id(), "P", 0));

    let deleted = board
        .rt
        .block_on(board.store.delete_column(board.owner, a.id()))
        .expect("delete should succeed");

    assert!(deleted);
    let remaining = board
        .rt
        .block_on(board.store.list_tasks(board.owner, &TaskFilter::default()))
        .expect("listing should succeed");
    assert_eq!(remaining.iter().map(Task::id).collect::<Vec<_>>(), vec![p.id()]);
    let columns = board
        .rt
        .block_on(board.store.list_columns(board.owner))
        .expect("listing should succeed");
    assert_eq!(columns.iter().map(Column::id).collect::<Vec<_>>(), vec![b.id()]);
}

#[rstest]
fn delete_foreign_column_changes_nothing(pg_board: PgBoard) {
    let board = pg_board;
    let a = board.column("A", 0);
    let t1 = board.task(TaskDraft::new(a.id(), "T1", 0));

    let deleted = board
        .rt
        .block_on(board.store.delete_column(OwnerId::new(), a.id()))
        .expect("delete should not fail");

    assert!(!deleted);
    assert_eq!(board.placement(&t1), (a.id(), 0));
}

#[rstest]
fn failed_column_delete_keeps_column_and_tasks(pg_board: PgBoard) {
    let board = pg_board;
    let a = board.column("A", 0);
    let t1 = board.task(TaskDraft::new(a.id(), "T1", 0));
    let t2 = board.task(TaskDraft::new(a.id(), "T2", 1));
    board.execute(REFUSE_COLUMN_DELETE_SQL);

    let result = board
        .rt
        .block_on(board.store.delete_column(board.owner, a.id()));

    assert!(matches!(result, Err(OrderStoreError::Persistence(_))));
    assert_eq!(board.column_order(board.owner, &a), 0);
    assert_eq!(board.placement(&t1), (a.id(), 0));
    assert_eq!(board.placement(&t2), (a.id(), 1));
}
