//! Input model: pointer samples, modifier keys, discrete intents, and the
//! gesture state machine.
//!
//! Hosts convert platform events into these types at the boundary and never
//! pass platform event objects further in. `InputState` is the active gesture
//! tracked between pointer-down and pointer-up (or touch start and end),
//! carrying the context needed to compute deltas and to commit on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::doc::ObjectId;
use crate::gesture::PinchBaseline;
use crate::viewport::Point;

/// One pointer or touch position in container-relative CSS pixels.
///
/// `id` is the platform pointer / touch identifier. Mouse input uses a
/// single constant id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub id: i64,
}

impl PointerSample {
    #[must_use]
    pub fn new(x: f64, y: f64, id: i64) -> Self {
        Self { x, y, id }
    }

    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Shift key is held.
    #[serde(default)]
    pub shift: bool,
    /// Ctrl key is held.
    #[serde(default)]
    pub ctrl: bool,
    /// Alt / Option key is held.
    #[serde(default)]
    pub alt: bool,
    /// Meta / Command key is held.
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or pen contact).
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    #[serde(default)]
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    #[serde(default)]
    pub dy: f64,
}

/// Which transform a discrete wheel tick adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WheelMode {
    Rotate,
    Scale,
}

/// Direction of a button-driven nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Clockwise for rotation, larger for scale.
    Increase,
    /// Counter-clockwise for rotation, smaller for scale.
    Decrease,
}

impl Direction {
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Increase => 1.0,
            Self::Decrease => -1.0,
        }
    }
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the currently selected sticker, if any.
    pub selected_id: Option<ObjectId>,
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to compute deltas and
/// commit on release. Only one gesture is live at a time.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A sticker is following one pointer.
    Dragging {
        /// Id of the sticker being dragged.
        id: ObjectId,
        /// Pointer that started the drag; samples from other pointers are ignored.
        pointer_id: i64,
        /// Pixel position of the pointer at the previous event.
        last_px: Point,
    },
    /// A sticker is being scaled and rotated by two touches.
    Pinching {
        /// Id of the sticker being transformed.
        id: ObjectId,
        /// The two touches driving the pinch as of the last frame, in the
        /// order the baseline measures them.
        fingers: (PointerSample, PointerSample),
        /// Geometry and transform captured when the second finger landed.
        baseline: PinchBaseline,
    },
}

impl InputState {
    /// Id of the sticker the active gesture targets.
    #[must_use]
    pub fn target(&self) -> Option<ObjectId> {
        match self {
            Self::Idle => None,
            Self::Dragging { id, .. } | Self::Pinching { id, .. } => Some(*id),
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
