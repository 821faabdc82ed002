//! Document model: stickers, the editor snapshot, and id generation.
//!
//! A journal page is free-form `text` plus an ordered list of stickers. The
//! order of `stickers` is the draw order (last is on top). `EditorState` is
//! both the live page the engine mutates mid-gesture and the unit stored in
//! history and handed to persistence, so it stays a plain serializable value.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::angle::{clamp_scale, normalize_degrees_360};
use crate::viewport::Point;

/// Unique identifier for a sticker.
pub type ObjectId = Uuid;

/// Mint a fresh sticker id: a millisecond timestamp followed by random bits.
#[must_use]
pub fn new_object_id() -> ObjectId {
    Uuid::now_v7()
}

/// A decorative object freely placed on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickerObject {
    /// Unique identifier for this sticker.
    pub id: ObjectId,
    /// Opaque visual token (emoji, glyph, or icon reference).
    pub symbol: String,
    /// Center of the sticker in percent of the canvas.
    pub position: Point,
    /// Percent of native size.
    pub scale: f64,
    /// Clockwise rotation in degrees, `[0, 360)`.
    pub rotation: f64,
}

impl StickerObject {
    /// Bring `scale` and `rotation` back inside their bounds. Non-finite
    /// values fall back to `fallback_scale` / `0`.
    pub fn sanitize(&mut self, scale_min: f64, scale_max: f64, fallback_scale: f64) {
        self.scale = if self.scale.is_finite() {
            clamp_scale(self.scale, scale_min, scale_max)
        } else {
            clamp_scale(fallback_scale, scale_min, scale_max)
        };
        self.rotation = if self.rotation.is_finite() { normalize_degrees_360(self.rotation) } else { 0.0 };
        if !self.position.is_finite() {
            self.position = Point::new(50.0, 50.0);
        }
    }
}

/// One page snapshot: text and stickers, versioned together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub stickers: Vec<StickerObject>,
}

impl EditorState {
    /// Return a reference to a sticker by id.
    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&StickerObject> {
        self.stickers.iter().find(|s| &s.id == id)
    }

    /// Return a mutable reference to a sticker by id.
    pub fn get_mut(&mut self, id: &ObjectId) -> Option<&mut StickerObject> {
        self.stickers.iter_mut().find(|s| &s.id == id)
    }

    /// Remove a sticker by id, returning it if it was present.
    pub fn remove(&mut self, id: &ObjectId) -> Option<StickerObject> {
        let idx = self.stickers.iter().position(|s| &s.id == id)?;
        Some(self.stickers.remove(idx))
    }

    /// Move a sticker to the top of the draw order. Returns false if it is
    /// missing or already on top.
    pub fn bring_to_front(&mut self, id: &ObjectId) -> bool {
        let Some(idx) = self.stickers.iter().position(|s| &s.id == id) else {
            return false;
        };
        if idx + 1 == self.stickers.len() {
            return false;
        }
        let sticker = self.stickers.remove(idx);
        self.stickers.push(sticker);
        true
    }

    /// Number of stickers on the page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    /// Returns `true` if the page has no stickers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }
}
