//! When steps for board ordering BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::eyre;
use kanban_order::client::{
    domain::{DragEntity, DropTarget},
    drag::DropOutcome,
};
use rstest_bdd_macros::when;

fn drop_and_sync(
    world: &mut BoardWorld,
    entity: DragEntity,
    target: DropTarget,
) -> Result<(), eyre::Report> {
    world.session.start(&world.state, entity)?;
    world.session.over(&mut world.state, Some(target))?;
    let DropOutcome::Commit(pending) = world.session.end(&mut world.state, Some(target))? else {
        return Err(eyre!("drop was cancelled"));
    };
    let result = run_async(
        world
            .reconciler
            .dispatch(&mut world.session, &mut world.state, pending),
    );
    world.last_sync = Some(result);
    Ok(())
}

#[when(r#"column "{active}" is dragged onto column "{over}""#)]
fn drag_column(world: &mut BoardWorld, active: String, over: String) -> Result<(), eyre::Report> {
    let entity = DragEntity::Column(world.column(&active)?);
    let target = DropTarget::Column(world.column(&over)?);
    drop_and_sync(world, entity, target)
}

#[when(r#"task "{task}" is dragged onto column "{column}""#)]
fn drag_task_onto_column(
    world: &mut BoardWorld,
    task: String,
    column: String,
) -> Result<(), eyre::Report> {
    let entity = DragEntity::Task(world.task(&task)?);
    let target = DropTarget::Column(world.column(&column)?);
    drop_and_sync(world, entity, target)
}

#[when(r#"task "{task}" is dragged onto task "{over}""#)]
fn drag_task_onto_task(world: &mut BoardWorld, task: String, over: String) -> Result<(), eyre::Report> {
    let entity = DragEntity::Task(world.task(&task)?);
    let target = DropTarget::Task(world.task(&over)?);
    drop_and_sync(world, entity, target)
}
