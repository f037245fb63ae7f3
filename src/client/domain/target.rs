//! Tagged references to draggable entities and drop targets.

use crate::board::domain::{ColumnId, TaskId};
use serde::{Deserialize, Serialize};

/// Kind of entity being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragKind {
    /// A whole column.
    Column,
    /// A single task card.
    Task,
}

/// Entity picked up by a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum DragEntity {
    /// A column, dragged by its header.
    Column(ColumnId),
    /// A task card.
    Task(TaskId),
}

impl DragEntity {
    /// Returns the entity kind.
    #[must_use]
    pub const fn kind(self) -> DragKind {
        match self {
            Self::Column(_) => DragKind::Column,
            Self::Task(_) => DragKind::Task,
        }
    }
}

/// Droppable area under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum DropTarget {
    /// A column header or its body drop zone.
    Column(ColumnId),
    /// A task card.
    Task(TaskId),
}
