//! Pointer-driven drag gestures: activation, collision and the session
//! state machine.

mod collision;
mod sensor;
mod session;

pub use collision::{CollisionStrategy, closest_center, rect_intersection};
pub use sensor::{DragConfig, PointerSensor, SensorSignal};
pub use session::{ActiveDrag, DragError, DragPhase, DragSession, DropOutcome, PendingCommit};
