//! Shared numeric constants for the canvas crate.

// ── Transform bounds ────────────────────────────────────────────

/// Smallest committed sticker scale, in percent of native size.
pub const SCALE_MIN: f64 = 50.0;

/// Largest committed sticker scale, in percent of native size.
pub const SCALE_MAX: f64 = 300.0;

/// Scale assigned to newly added stickers.
pub const SCALE_DEFAULT: f64 = 100.0;

/// Degrees per wheel tick or rotate button press.
pub const ROTATE_STEP_DEG: f64 = 5.0;

/// Scale percentage points per wheel tick or scale button press.
pub const SCALE_STEP: f64 = 5.0;

// ── History ─────────────────────────────────────────────────────

/// Maximum number of snapshots kept for undo/redo.
pub const HISTORY_CAP: usize = 20;

// ── Placement ───────────────────────────────────────────────────

/// Lower edge of the region new stickers are dropped into, in percent.
pub const SPAWN_MIN_PCT: f64 = 20.0;

/// Upper edge of the region new stickers are dropped into, in percent.
pub const SPAWN_MAX_PCT: f64 = 80.0;

// ── Geometry ────────────────────────────────────────────────────

/// Side of a sticker's hit square at 100% scale, in CSS pixels.
pub const STICKER_BASE_PX: f64 = 48.0;

/// Pinch distances below this many pixels are treated as degenerate.
pub const MIN_PINCH_DISTANCE_PX: f64 = 1e-3;

/// Viewport side used until the host reports a real size (1px == 1%).
pub const DEFAULT_VIEWPORT_PX: f64 = 100.0;
