//! Tunable limits for an editor session.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    HISTORY_CAP, ROTATE_STEP_DEG, SCALE_DEFAULT, SCALE_MAX, SCALE_MIN, SCALE_STEP, SPAWN_MAX_PCT, SPAWN_MIN_PCT,
    STICKER_BASE_PX,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub scale_min: f64,
    pub scale_max: f64,
    pub scale_default: f64,
    pub rotate_step_deg: f64,
    pub scale_step: f64,
    pub history_cap: usize,
    pub spawn_min_pct: f64,
    pub spawn_max_pct: f64,
    pub sticker_base_px: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            scale_min: SCALE_MIN,
            scale_max: SCALE_MAX,
            scale_default: SCALE_DEFAULT,
            rotate_step_deg: ROTATE_STEP_DEG,
            scale_step: SCALE_STEP,
            history_cap: HISTORY_CAP,
            spawn_min_pct: SPAWN_MIN_PCT,
            spawn_max_pct: SPAWN_MAX_PCT,
            sticker_base_px: STICKER_BASE_PX,
        }
    }
}

impl EditorConfig {
    /// Repair values that would break clamping or placement: non-finite
    /// numbers fall back to defaults, inverted ranges are swapped, and the
    /// spawn range is kept on the page (`[0, 100]`).
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let finite_or = |v: f64, d: f64| if v.is_finite() { v } else { d };

        self.scale_min = finite_or(self.scale_min, defaults.scale_min);
        self.scale_max = finite_or(self.scale_max, defaults.scale_max);
        if self.scale_min > self.scale_max {
            std::mem::swap(&mut self.scale_min, &mut self.scale_max);
        }
        self.scale_default = finite_or(self.scale_default, defaults.scale_default).clamp(self.scale_min, self.scale_max);

        self.rotate_step_deg = finite_or(self.rotate_step_deg, defaults.rotate_step_deg).abs();
        self.scale_step = finite_or(self.scale_step, defaults.scale_step).abs();
        self.history_cap = self.history_cap.max(1);

        self.spawn_min_pct = finite_or(self.spawn_min_pct, defaults.spawn_min_pct).clamp(0.0, 100.0);
        self.spawn_max_pct = finite_or(self.spawn_max_pct, defaults.spawn_max_pct).clamp(0.0, 100.0);
        if self.spawn_min_pct > self.spawn_max_pct {
            std::mem::swap(&mut self.spawn_min_pct, &mut self.spawn_max_pct);
        }

        let base = finite_or(self.sticker_base_px, defaults.sticker_base_px);
        self.sticker_base_px = if base > 0.0 { base } else { defaults.sticker_base_px };
        self
    }
}
