//! Given steps for board ordering BDD scenarios.

use super::world::{BoardWorld, names, run_async};
use kanban_order::board::{adapters::memory::FaultPoint, domain::TaskDraft};
use rstest_bdd_macros::given;

#[given(r#"a board with columns "{list}""#)]
fn board_with_columns(world: &mut BoardWorld, list: String) -> Result<(), eyre::Report> {
    for (order, name) in (0..).zip(names(&list)) {
        let column = run_async(world.coordinator.create_column(world.owner, name.clone(), order))?;
        world.columns.insert(name, column.id());
    }
    world.load_client()
}

#[given(r#"column "{column}" holds tasks "{list}""#)]
fn column_holds_tasks(
    world: &mut BoardWorld,
    column: String,
    list: String,
) -> Result<(), eyre::Report> {
    let column_id = world.column(&column)?;
    for (order, title) in (0..).zip(names(&list)) {
        let draft = TaskDraft::new(column_id, title.clone(), order);
        let task = run_async(world.coordinator.create_task(world.owner, draft))?;
        world.tasks.insert(title, task.id());
    }
    world.load_client()
}

#[given("the store fails the next task move")]
fn store_fails_next_move(world: &mut BoardWorld) {
    world.store.inject_fault(FaultPoint::MoveTask);
}
