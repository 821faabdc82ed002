//! Scene output: a draw list the host renderer consumes.
//!
//! The engine never draws. This module turns the live page into pixel-space
//! items in draw order (bottom first) that a DOM, canvas, or immediate-mode
//! renderer can paint directly, plus the page text. Export uses the same list
//! with selection decoration switched off.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::doc::{EditorState, ObjectId};
use crate::hit::sticker_size_px;
use crate::viewport::{Point, Viewport};

/// One sticker as the renderer should paint it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneItem {
    pub id: ObjectId,
    pub symbol: String,
    /// Center in container pixels.
    pub center_px: Point,
    /// Side length in container pixels.
    pub size_px: f64,
    /// Percent of native size.
    pub scale: f64,
    /// Clockwise rotation in degrees.
    pub rotation: f64,
    /// Whether to draw the selection outline and handles.
    pub selected: bool,
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub width_px: f64,
    pub height_px: f64,
    pub text: String,
    pub items: Vec<SceneItem>,
}

/// Build the draw list for `state`.
#[must_use]
pub fn build_scene(state: &EditorState, selected: Option<ObjectId>, viewport: &Viewport, base_px: f64) -> Scene {
    let items = state
        .stickers
        .iter()
        .map(|s| SceneItem {
            id: s.id,
            symbol: s.symbol.clone(),
            center_px: viewport.pct_to_px(s.position),
            size_px: sticker_size_px(s, base_px),
            scale: s.scale,
            rotation: s.rotation,
            selected: selected == Some(s.id),
        })
        .collect();
    Scene { width_px: viewport.width, height_px: viewport.height, text: state.text.clone(), items }
}
