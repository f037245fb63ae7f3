//! Integer pixel geometry for pointer-driven collision detection.

use super::DropTarget;
use serde::{Deserialize, Serialize};

/// Pointer position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared distance to `other`, exact for every pair of `i32` points.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> i128 {
        let dx = i128::from(other.x) - i128::from(self.x);
        let dy = i128::from(other.y) - i128::from(self.y);
        dx * dx + dy * dy
    }
}

/// Axis-aligned rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Width, never negative.
    pub width: i32,
    /// Height, never negative.
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle; negative sizes are clamped to zero.
    #[must_use]
    pub fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width: width.max(0),
            height: height.max(0),
        }
    }

    fn right(self) -> i64 {
        i64::from(self.left) + i64::from(self.width)
    }

    fn bottom(self) -> i64 {
        i64::from(self.top) + i64::from(self.height)
    }

    /// Area in square pixels.
    #[must_use]
    pub fn area(self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    /// Centre with both coordinates doubled, so it stays integral.
    #[must_use]
    pub fn doubled_center(self) -> (i64, i64) {
        (
            2 * i64::from(self.left) + i64::from(self.width),
            2 * i64::from(self.top) + i64::from(self.height),
        )
    }

    /// Area shared with `other`; zero when they do not overlap.
    #[must_use]
    pub fn intersection_area(self, other: Self) -> i64 {
        let left = i64::from(self.left).max(i64::from(other.left));
        let top = i64::from(self.top).max(i64::from(other.top));
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return 0;
        }
        (right - left) * (bottom - top)
    }

    /// Returns the rectangle moved by `(dx, dy)`.
    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            left: self.left.saturating_add(dx),
            top: self.top.saturating_add(dy),
            width: self.width,
            height: self.height,
        }
    }
}

/// A registered drop area and the target it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Droppable {
    /// Target reported when this area is hit.
    pub target: DropTarget,
    /// Area on screen.
    pub rect: Rect,
}

impl Droppable {
    /// Creates a droppable.
    #[must_use]
    pub const fn new(target: DropTarget, rect: Rect) -> Self {
        Self { target, rect }
    }
}
