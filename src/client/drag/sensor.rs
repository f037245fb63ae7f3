//! Pointer activation: a press only becomes a drag after enough travel.

use crate::client::domain::{DragEntity, Point, Rect};
use serde::{Deserialize, Serialize};

/// Gesture tuning loaded from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DragConfig {
    /// Pointer travel in pixels before a press starts a drag.
    pub activation_distance: u32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activation_distance: 10,
        }
    }
}

impl DragConfig {
    /// Parses a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns the parse error for malformed input.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Press {
    entity: DragEntity,
    origin: Point,
    rect: Rect,
    activated: bool,
}

/// What the sensor makes of a pointer move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorSignal {
    /// Nothing is pressed, or the press has not travelled far enough.
    Idle,
    /// The press just crossed the activation distance.
    Activated(DragEntity, Rect),
    /// An active drag moved; carries the translated rect.
    Moved(Rect),
}

/// Tracks one pointer press on a draggable.
#[derive(Debug, Clone, Default)]
pub struct PointerSensor {
    config: DragConfig,
    press: Option<Press>,
}

impl PointerSensor {
    /// Creates a sensor.
    #[must_use]
    pub const fn new(config: DragConfig) -> Self {
        Self {
            config,
            press: None,
        }
    }

    /// Records a press on `entity` whose rendered rect is `rect`.
    pub const fn press(&mut self, entity: DragEntity, at: Point, rect: Rect) {
        self.press = Some(Press {
            entity,
            origin: at,
            rect,
            activated: false,
        });
    }

    /// Feeds a pointer move.
    pub fn track(&mut self, at: Point) -> SensorSignal {
        let threshold = i128::from(self.config.activation_distance);
        let Some(press) = self.press.as_mut() else {
            return SensorSignal::Idle;
        };
        let rect = translate(press.rect, press.origin, at);
        if press.activated {
            return SensorSignal::Moved(rect);
        }
        if press.origin.distance_squared(at) < threshold * threshold {
            return SensorSignal::Idle;
        }
        press.activated = true;
        SensorSignal::Activated(press.entity, rect)
    }

    /// Ends the press. Returns the dragged rect at `at` when the press had
    /// activated, `None` for a plain click.
    pub fn release(&mut self, at: Point) -> Option<Rect> {
        self.press
            .take()
            .filter(|press| press.activated)
            .map(|press| translate(press.rect, press.origin, at))
    }

    /// Drops any press without reporting it.
    pub const fn reset(&mut self) {
        self.press = None;
    }
}

const fn translate(rect: Rect, origin: Point, at: Point) -> Rect {
    rect.translated(at.x.saturating_sub(origin.x), at.y.saturating_sub(origin.y))
}
