//! Collision strategies that decide which droppable a dragged rect is over.
//!
//! Columns use closest-centre so a wide column body never swallows the
//! header of its neighbour. Tasks use rectangle intersection so cards hit
//! both sibling cards and empty column bodies. All arithmetic is integral:
//! centres are compared doubled and ratios by cross-multiplication.

use crate::client::domain::{DragKind, DropTarget, Droppable, Rect};

/// Strategy applied for one kind of dragged entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionStrategy {
    /// Nearest column centre wins.
    ClosestCenter,
    /// Largest overlap relative to the combined area wins.
    RectIntersection,
}

impl CollisionStrategy {
    /// Returns the strategy used when dragging `kind`.
    #[must_use]
    pub const fn for_kind(kind: DragKind) -> Self {
        match kind {
            DragKind::Column => Self::ClosestCenter,
            DragKind::Task => Self::RectIntersection,
        }
    }

    /// Resolves the target under `active`.
    #[must_use]
    pub fn detect(self, active: Rect, droppables: &[Droppable]) -> Option<DropTarget> {
        match self {
            Self::ClosestCenter => closest_center(active, droppables),
            Self::RectIntersection => rect_intersection(active, droppables),
        }
    }
}

/// Column droppable whose centre is nearest the dragged rect's centre.
///
/// Task droppables are ignored. Ties keep the first registered droppable.
#[must_use]
pub fn closest_center(active: Rect, droppables: &[Droppable]) -> Option<DropTarget> {
    let (ax, ay) = active.doubled_center();
    droppables
        .iter()
        .filter(|droppable| matches!(droppable.target, DropTarget::Column(_)))
        .map(|droppable| {
            let (cx, cy) = droppable.rect.doubled_center();
            let dx = i128::from(cx) - i128::from(ax);
            let dy = i128::from(cy) - i128::from(ay);
            (dx * dx + dy * dy, droppable.target)
        })
        .fold(None, |best: Option<(i128, DropTarget)>, candidate| match best {
            Some(current) if current.0 <= candidate.0 => Some(current),
            _ => Some(candidate),
        })
        .map(|(_, target)| target)
}

/// Droppable with the greatest intersection-over-union with `active`.
///
/// Droppables that do not overlap are never chosen. Ties keep the first
/// registered droppable.
#[must_use]
pub fn rect_intersection(active: Rect, droppables: &[Droppable]) -> Option<DropTarget> {
    droppables
        .iter()
        .filter_map(|droppable| {
            let shared = active.intersection_area(droppable.rect);
            if shared == 0 {
                return None;
            }
            let union =
                i128::from(active.area()) + i128::from(droppable.rect.area()) - i128::from(shared);
            Some((
                Ratio {
                    shared: i128::from(shared),
                    union,
                },
                droppable.target,
            ))
        })
        .fold(None, |best: Option<(Ratio, DropTarget)>, candidate| match best {
            Some(current) if !candidate.0.exceeds(current.0) => Some(current),
            _ => Some(candidate),
        })
        .map(|(_, target)| target)
}

/// Overlap over union. `shared` stays below 2^62 and `union` below 2^63, so
/// the cross products fit in `i128`.
#[derive(Debug, Clone, Copy)]
struct Ratio {
    shared: i128,
    union: i128,
}

impl Ratio {
    const fn exceeds(self, other: Self) -> bool {
        self.shared * other.union > other.shared * self.union
    }
}
