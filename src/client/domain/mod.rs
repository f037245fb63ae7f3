//! Client-side value types for drag gestures and speculation.

mod geometry;
mod intent;
mod snapshot;
mod target;

pub use geometry::{Droppable, Point, Rect};
pub use intent::DragIntent;
pub use snapshot::Snapshot;
pub use target::{DragEntity, DragKind, DropTarget};
