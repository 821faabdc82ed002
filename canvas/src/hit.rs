#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{EditorState, ObjectId, StickerObject};
use crate::viewport::{Point, Viewport};

/// Side length of a sticker on screen, in pixels.
#[must_use]
pub fn sticker_size_px(sticker: &StickerObject, base_px: f64) -> f64 {
    base_px * sticker.scale / 100.0
}

/// Whether `px` (container pixels) falls inside the sticker's rotated square.
#[must_use]
pub fn sticker_contains(sticker: &StickerObject, px: Point, viewport: &Viewport, base_px: f64) -> bool {
    let center = viewport.pct_to_px(sticker.position);
    let half = sticker_size_px(sticker, base_px) * 0.5;
    let d = px.sub(center);

    // Undo the sticker's clockwise rotation to land in its local frame.
    let (sin, cos) = (-sticker.rotation).to_radians().sin_cos();
    let local_x = d.x * cos - d.y * sin;
    let local_y = d.x * sin + d.y * cos;
    local_x.abs() <= half && local_y.abs() <= half
}

/// Test which sticker (if any) is under `px`, topmost first.
#[must_use]
pub fn hit_test(px: Point, state: &EditorState, viewport: &Viewport, base_px: f64) -> Option<ObjectId> {
    if !px.is_finite() {
        return None;
    }
    state
        .stickers
        .iter()
        .rev()
        .find(|s| sticker_contains(s, px, viewport, base_px))
        .map(|s| s.id)
}
