//! Two-finger pinch/rotate math.
//!
//! A pinch captures a baseline when the second finger lands: inter-touch
//! distance, inter-touch angle, and the sticker's scale and rotation at that
//! moment. Every later frame is computed from that baseline alone, so the
//! result for a given finger layout does not depend on the frames in between.
//!
//! Touches are put into a canonical order (by pointer id, then position)
//! when the pinch starts, so swapping A and B in the input changes nothing.
//! After that the order is carried frame to frame by [`follow_pair`]: by id
//! when the fingers have distinct ids, otherwise by nearest previous
//! position, so the angle never flips by 180° mid-gesture.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::angle::{clamp_scale, normalize_degrees_360, vector_angle_deg};
use crate::consts::MIN_PINCH_DISTANCE_PX;
use crate::input::PointerSample;
use crate::viewport::Point;

/// Distance, angle, and midpoint of a pair of touches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPair {
    /// Pixel distance between the touches.
    pub distance: f64,
    /// Angle of the first-to-second vector in degrees (screen orientation).
    pub angle_deg: f64,
    /// Pixel midpoint between the touches.
    pub midpoint: Point,
}

/// Order two touches so the result is independent of list order.
#[must_use]
pub fn canonical_pair(a: PointerSample, b: PointerSample) -> (PointerSample, PointerSample) {
    if (b.id, b.x, b.y) < (a.id, a.x, a.y) { (b, a) } else { (a, b) }
}

/// Order the current samples `a` and `b` to line up with `prev`, the ordered
/// fingers of the previous frame.
#[must_use]
pub fn follow_pair(
    prev: (PointerSample, PointerSample),
    a: PointerSample,
    b: PointerSample,
) -> (PointerSample, PointerSample) {
    let (first, second) = prev;
    if first.id != second.id {
        if (a.id, b.id) == (first.id, second.id) {
            return (a, b);
        }
        if (a.id, b.id) == (second.id, first.id) {
            return (b, a);
        }
    }
    let travel = |p: PointerSample, q: PointerSample| (p.x - q.x).powi(2) + (p.y - q.y).powi(2);
    let straight = travel(a, first) + travel(b, second);
    let crossed = travel(b, first) + travel(a, second);
    if crossed < straight { (b, a) } else { (a, b) }
}

/// Geometry of two touches, or `None` when they are too close together to
/// define a distance ratio or an angle.
#[must_use]
pub fn pair_geometry(a: PointerSample, b: PointerSample) -> Option<TouchPair> {
    let (first, second) = canonical_pair(a, b);
    ordered_geometry(first, second)
}

/// Geometry of `first` to `second`, keeping the order given.
#[must_use]
pub fn ordered_geometry(first: PointerSample, second: PointerSample) -> Option<TouchPair> {
    let dx = second.x - first.x;
    let dy = second.y - first.y;
    let distance = dx.hypot(dy);
    if !distance.is_finite() || distance < MIN_PINCH_DISTANCE_PX {
        return None;
    }
    let angle_deg = vector_angle_deg(dx, dy)?;
    Some(TouchPair { distance, angle_deg, midpoint: first.point().midpoint(second.point()) })
}

/// Live transform produced by one pinch frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchUpdate {
    pub scale: f64,
    pub rotation: f64,
}

/// State captured at the start of a pinch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchBaseline {
    /// Inter-touch distance at gesture start; `0` when the start was degenerate.
    pub distance: f64,
    /// Inter-touch angle at gesture start.
    pub angle_deg: f64,
    /// Sticker scale at gesture start.
    pub scale: f64,
    /// Sticker rotation at gesture start.
    pub rotation: f64,
}

impl PinchBaseline {
    /// Capture a baseline. Degenerate touch geometry yields a baseline that
    /// [`Self::is_degenerate`] reports, so the caller can re-capture on the
    /// first usable frame.
    #[must_use]
    pub fn capture(a: PointerSample, b: PointerSample, scale: f64, rotation: f64) -> Self {
        match pair_geometry(a, b) {
            Some(pair) => Self { distance: pair.distance, angle_deg: pair.angle_deg, scale, rotation },
            None => Self { distance: 0.0, angle_deg: 0.0, scale, rotation },
        }
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !self.distance.is_finite() || self.distance < MIN_PINCH_DISTANCE_PX
    }

    /// Scale and rotation for the current touches, clamped to
    /// `[scale_min, scale_max]` and `[0, 360)`. `None` means skip this frame.
    ///
    /// `first` and `second` must be in the order the baseline was captured
    /// in: canonical at the start, then as [`follow_pair`] carries it.
    #[must_use]
    pub fn apply(
        &self,
        first: PointerSample,
        second: PointerSample,
        scale_min: f64,
        scale_max: f64,
    ) -> Option<PinchUpdate> {
        if self.is_degenerate() {
            return None;
        }
        let pair = ordered_geometry(first, second)?;
        let ratio = pair.distance / self.distance;
        if !ratio.is_finite() {
            return None;
        }
        let scale = clamp_scale(self.scale * ratio, scale_min, scale_max);
        let rotation = normalize_degrees_360(self.rotation + (pair.angle_deg - self.angle_deg));
        (scale.is_finite() && rotation.is_finite()).then_some(PinchUpdate { scale, rotation })
    }
}
