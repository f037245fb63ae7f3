//! Drag gesture state machine.
//!
//! A session moves `Idle -> Dragging -> Committing -> Idle`. While dragging
//! a task across columns the mirror is updated speculatively so the card
//! follows the pointer; the first snapshot taken is kept for rollback. A
//! drop either commits exactly one [`DragIntent`] or cancels and reverts.

use super::collision::CollisionStrategy;
use super::sensor::{DragConfig, PointerSensor, SensorSignal};
use crate::board::domain::{ColumnId, Task, TaskId, position_to_order};
use crate::client::domain::{
    DragEntity, DragIntent, DropTarget, Droppable, Point, Rect, Snapshot,
};
use crate::client::state::{ClientOrderState, ClientStateError};
use thiserror::Error;
use tracing::debug;

/// Errors raised by invalid session transitions.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DragError {
    /// A new gesture started while another is active or committing.
    #[error("a drag gesture is already in progress")]
    SessionBusy,

    /// A drag event arrived while no gesture is active.
    #[error("no drag gesture is active")]
    NotDragging,

    /// A commit was settled while none is outstanding.
    #[error("no drag commit is outstanding")]
    NotCommitting,

    /// The dragged entity is not in the mirror.
    #[error(transparent)]
    State(#[from] ClientStateError),
}

/// Gesture in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDrag {
    entity: DragEntity,
    origin_column: Option<ColumnId>,
    snapshot: Option<Snapshot>,
}

impl ActiveDrag {
    /// Entity being dragged.
    #[must_use]
    pub const fn entity(&self) -> DragEntity {
        self.entity
    }

    /// Column a dragged task started in; `None` for column drags.
    #[must_use]
    pub const fn origin_column(&self) -> Option<ColumnId> {
        self.origin_column
    }
}

/// Session lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragPhase {
    /// No gesture.
    #[default]
    Idle,
    /// A gesture is active.
    Dragging(ActiveDrag),
    /// A drop produced an intent that has not been settled yet.
    Committing,
}

/// Intent to persist plus the snapshot that undoes its speculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommit {
    intent: DragIntent,
    snapshot: Snapshot,
}

impl PendingCommit {
    /// The persistence call to make.
    #[must_use]
    pub const fn intent(&self) -> &DragIntent {
        &self.intent
    }

    /// State captured before the first speculative change of the gesture.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Splits the commit into its intent and snapshot.
    #[must_use]
    pub fn into_parts(self) -> (DragIntent, Snapshot) {
        (self.intent, self.snapshot)
    }
}

/// Result of a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Nothing to persist; any speculation has been reverted.
    Cancelled,
    /// One intent must be persisted.
    Commit(PendingCommit),
}

type Resolved = Option<(DragIntent, Snapshot)>;

/// Turns pointer events into at most one committed intent per gesture.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    phase: DragPhase,
    sensor: PointerSensor,
}

impl DragSession {
    /// Creates an idle session.
    #[must_use]
    pub const fn new(config: DragConfig) -> Self {
        Self {
            phase: DragPhase::Idle,
            sensor: PointerSensor::new(config),
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> &DragPhase {
        &self.phase
    }

    /// Begins dragging `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::SessionBusy`] unless idle, or
    /// [`DragError::State`] when the entity is not on the board.
    pub fn start(&mut self, state: &ClientOrderState, entity: DragEntity) -> Result<(), DragError> {
        if self.phase != DragPhase::Idle {
            return Err(DragError::SessionBusy);
        }
        let origin_column = match entity {
            DragEntity::Column(column_id) => {
                state
                    .column(column_id)
                    .ok_or(ClientStateError::UnknownColumn(column_id))?;
                None
            }
            DragEntity::Task(task_id) => Some(
                state
                    .task(task_id)
                    .map(Task::column_id)
                    .ok_or(ClientStateError::UnknownTask(task_id))?,
            ),
        };
        debug!(?entity, "drag started");
        self.phase = DragPhase::Dragging(ActiveDrag {
            entity,
            origin_column,
            snapshot: None,
        });
        Ok(())
    }

    /// Handles the pointer hovering `target`.
    ///
    /// A task hovering another column is moved there speculatively; column
    /// drags only reorder on drop.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NotDragging`] outside a gesture.
    pub fn over(
        &mut self,
        state: &mut ClientOrderState,
        target: Option<DropTarget>,
    ) -> Result<(), DragError> {
        let DragPhase::Dragging(active) = &mut self.phase else {
            return Err(DragError::NotDragging);
        };
        let (DragEntity::Task(task_id), Some(hovered)) = (active.entity, target) else {
            return Ok(());
        };
        let current = current_column(state, task_id)?;
        let Some((column_id, slot)) = hover_slot(state, task_id, hovered) else {
            return Ok(());
        };
        if column_id == current {
            return Ok(());
        }
        let snapshot = state.move_task_speculative(task_id, column_id, slot)?;
        active.snapshot.get_or_insert(snapshot);
        Ok(())
    }

    /// Handles the drop on `target`.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NotDragging`] outside a gesture, or
    /// [`DragError::State`] when the dragged entity vanished from the
    /// mirror; the session is idle again in that case.
    pub fn end(
        &mut self,
        state: &mut ClientOrderState,
        target: Option<DropTarget>,
    ) -> Result<DropOutcome, DragError> {
        let active = match std::mem::take(&mut self.phase) {
            DragPhase::Dragging(active) => active,
            other => {
                self.phase = other;
                return Err(DragError::NotDragging);
            }
        };
        let resolved = match active.entity {
            DragEntity::Column(column_id) => resolve_column_drop(state, column_id, target),
            DragEntity::Task(task_id) => {
                resolve_task_drop(state, task_id, active.origin_column, target)
            }
        };
        match resolved {
            Ok(Some((intent, latest))) => {
                let snapshot = active.snapshot.unwrap_or(latest);
                debug!(?intent, "drag committed");
                self.phase = DragPhase::Committing;
                Ok(DropOutcome::Commit(PendingCommit { intent, snapshot }))
            }
            Ok(None) => {
                revert(state, active.snapshot);
                debug!(entity = ?active.entity, "drag cancelled");
                Ok(DropOutcome::Cancelled)
            }
            Err(err) => {
                revert(state, active.snapshot);
                Err(err)
            }
        }
    }

    /// Returns a committing session to idle once its intent is resolved.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::NotCommitting`] when no commit is outstanding.
    pub fn settle(&mut self) -> Result<(), DragError> {
        if self.phase != DragPhase::Committing {
            return Err(DragError::NotCommitting);
        }
        self.phase = DragPhase::Idle;
        Ok(())
    }

    /// Records a press on a draggable; the drag starts once the pointer has
    /// travelled the activation distance.
    ///
    /// # Errors
    ///
    /// Returns [`DragError::SessionBusy`] unless idle.
    pub fn pointer_down(&mut self, entity: DragEntity, at: Point, rect: Rect) -> Result<(), DragError> {
        if self.phase != DragPhase::Idle {
            return Err(DragError::SessionBusy);
        }
        self.sensor.press(entity, at, rect);
        Ok(())
    }

    /// Feeds a pointer move, starting the gesture or resolving the hovered
    /// target from `droppables`.
    ///
    /// # Errors
    ///
    /// Returns [`DragError`] when the gesture cannot start.
    pub fn pointer_move(
        &mut self,
        state: &mut ClientOrderState,
        at: Point,
        droppables: &[Droppable],
    ) -> Result<(), DragError> {
        match self.sensor.track(at) {
            SensorSignal::Idle => Ok(()),
            SensorSignal::Activated(entity, rect) => {
                if let Err(err) = self.start(state, entity) {
                    self.sensor.reset();
                    return Err(err);
                }
                self.hover(state, rect, droppables)
            }
            SensorSignal::Moved(rect) => self.hover(state, rect, droppables),
        }
    }

    /// Releases the pointer. A press that never activated is a click and
    /// cancels without touching the mirror.
    ///
    /// # Errors
    ///
    /// Returns [`DragError`] when the drop cannot be resolved.
    pub fn pointer_up(
        &mut self,
        state: &mut ClientOrderState,
        at: Point,
        droppables: &[Droppable],
    ) -> Result<DropOutcome, DragError> {
        let Some(rect) = self.sensor.release(at) else {
            return Ok(DropOutcome::Cancelled);
        };
        let target = self.detect(rect, droppables)?;
        self.end(state, target)
    }

    fn hover(
        &mut self,
        state: &mut ClientOrderState,
        rect: Rect,
        droppables: &[Droppable],
    ) -> Result<(), DragError> {
        let target = self.detect(rect, droppables)?;
        self.over(state, target)
    }

    fn detect(&self, rect: Rect, droppables: &[Droppable]) -> Result<Option<DropTarget>, DragError> {
        let DragPhase::Dragging(active) = &self.phase else {
            return Err(DragError::NotDragging);
        };
        Ok(CollisionStrategy::for_kind(active.entity.kind()).detect(rect, droppables))
    }
}

fn revert(state: &mut ClientOrderState, snapshot: Option<Snapshot>) {
    if let Some(prior) = snapshot {
        state.restore(prior);
    }
}

fn current_column(state: &ClientOrderState, task_id: TaskId) -> Result<ColumnId, DragError> {
    state
        .task(task_id)
        .map(Task::column_id)
        .ok_or(DragError::State(ClientStateError::UnknownTask(task_id)))
}

fn slot_of(ids: &[TaskId], wanted: TaskId) -> Option<i32> {
    ids.iter()
        .position(|id| *id == wanted)
        .map(position_to_order)
}

fn ids_without(state: &ClientOrderState, column_id: ColumnId, task_id: TaskId) -> Vec<TaskId> {
    state
        .task_ids_in(column_id)
        .into_iter()
        .filter(|id| *id != task_id)
        .collect()
}

/// Column and insertion slot for a task hovering `hovered` from elsewhere.
fn hover_slot(
    state: &ClientOrderState,
    task_id: TaskId,
    hovered: DropTarget,
) -> Option<(ColumnId, i32)> {
    match hovered {
        DropTarget::Task(over) if over == task_id => None,
        DropTarget::Task(over) => {
            let column_id = state.task(over)?.column_id();
            let slot = slot_of(&ids_without(state, column_id, task_id), over)?;
            Some((column_id, slot))
        }
        DropTarget::Column(column_id) => {
            state.column(column_id)?;
            let count = ids_without(state, column_id, task_id).len();
            Some((column_id, position_to_order(count)))
        }
    }
}

fn resolve_column_drop(
    state: &mut ClientOrderState,
    column_id: ColumnId,
    target: Option<DropTarget>,
) -> Result<Resolved, DragError> {
    let candidate = match target {
        Some(DropTarget::Column(over)) => Some(over),
        Some(DropTarget::Task(over)) => state.task(over).map(Task::column_id),
        None => None,
    };
    let Some(over) = candidate.filter(|over| *over != column_id) else {
        return Ok(None);
    };
    if state.column(over).is_none() {
        return Ok(None);
    }
    let snapshot = state.move_column_speculative(column_id, over)?;
    let intent = DragIntent::ReorderColumns {
        ordered_ids: state.column_ids(),
    };
    Ok(Some((intent, snapshot)))
}

fn resolve_task_drop(
    state: &mut ClientOrderState,
    task_id: TaskId,
    origin_column: Option<ColumnId>,
    target: Option<DropTarget>,
) -> Result<Resolved, DragError> {
    let current = current_column(state, task_id)?;
    let origin = origin_column.unwrap_or(current);

    let placement = match target {
        None => None,
        Some(DropTarget::Task(over)) if over == task_id => {
            if current == origin {
                None
            } else {
                slot_of(&state.task_ids_in(current), task_id).map(|slot| (current, slot))
            }
        }
        Some(DropTarget::Task(over)) => state.task(over).map(Task::column_id).and_then(|column_id| {
            // Within the origin column the card takes the hovered card's
            // slot; elsewhere it is inserted before the hovered card.
            let siblings = if column_id == origin {
                state.task_ids_in(column_id)
            } else {
                ids_without(state, column_id, task_id)
            };
            slot_of(&siblings, over).map(|slot| (column_id, slot))
        }),
        Some(DropTarget::Column(column_id)) if column_id == origin => None,
        Some(DropTarget::Column(column_id)) => state.column(column_id).map(|_| {
            let count = ids_without(state, column_id, task_id).len();
            (column_id, position_to_order(count))
        }),
    };
    let Some((column_id, slot)) = placement else {
        return Ok(None);
    };
    let snapshot = state.move_task_speculative(task_id, column_id, slot)?;
    let intent = if column_id == origin {
        DragIntent::ReorderTasks {
            entries: state.order_entries(column_id),
        }
    } else {
        DragIntent::MoveTask {
            task_id,
            column_id,
            order: slot,
        }
    };
    Ok(Some((intent, snapshot)))
}
