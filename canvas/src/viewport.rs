#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_VIEWPORT_PX;

/// A point in either pixel or percent space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn sub(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }

    /// Midpoint between `self` and `other`.
    #[must_use]
    pub fn midpoint(self, other: Point) -> Point {
        Point { x: (self.x + other.x) * 0.5, y: (self.y + other.y) * 0.5 }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Size of the journal canvas in CSS pixels.
///
/// Sticker positions are stored as percent of this box so a page looks the
/// same at any resolution. Pointer input arrives in container-relative pixels
/// and is converted here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: DEFAULT_VIEWPORT_PX, height: DEFAULT_VIEWPORT_PX }
    }
}

impl Viewport {
    /// Build a viewport, or `None` if either side is not a positive finite number.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Option<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        (valid(width) && valid(height)).then_some(Self { width, height })
    }

    /// Convert a container-relative pixel point to percent units.
    #[must_use]
    pub fn px_to_pct(&self, px: Point) -> Point {
        Point { x: px.x * 100.0 / self.width, y: px.y * 100.0 / self.height }
    }

    /// Convert a percent-space point to container-relative pixels.
    #[must_use]
    pub fn pct_to_px(&self, pct: Point) -> Point {
        Point { x: pct.x * self.width / 100.0, y: pct.y * self.height / 100.0 }
    }

    /// Convert a pixel delta to a percent delta. Same math as a point; kept
    /// separate so call sites say which one they mean.
    #[must_use]
    pub fn delta_px_to_pct(&self, dx: f64, dy: f64) -> (f64, f64) {
        (dx * 100.0 / self.width, dy * 100.0 / self.height)
    }
}
