//! Editor engine: owns the live page, its history, and the gesture state
//! machine, and turns input into page edits.
//!
//! Two layers of entry points:
//!
//! - Intent-level operations (`begin_drag`, `update_pinch`, `wheel_adjust`,
//!   `add_object`, `undo`, ...) that a host calls when it already knows which
//!   sticker is meant.
//! - Raw event routers (`on_pointer_down`, `on_touch_move`, `on_wheel`,
//!   `on_key_down`, ...) that hit-test and dispatch to the operations above.
//!
//! Continuous gestures mutate the live page on every frame and commit once on
//! release. Discrete edits commit immediately. A commit whose page equals the
//! history head is skipped, so taps and clamped-out nudges add no entries.
//! While a gesture is in flight, discrete edits and undo/redo are ignored so
//! that one history entry never mixes two actions.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::angle::{clamp_scale, normalize_degrees_360, step_sign};
use crate::config::EditorConfig;
use crate::doc::{EditorState, ObjectId, StickerObject, new_object_id};
use crate::gesture::{PinchBaseline, canonical_pair, follow_pair};
use crate::history::History;
use crate::hit::hit_test;
use crate::input::{Button, Direction, InputState, Key, Modifiers, PointerSample, UiState, WheelDelta, WheelMode};
use crate::render::{Scene, build_scene};
use crate::viewport::{Point, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from engine operations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The live page or selection changed; redraw from [`EngineCore::scene`].
    RenderNeeded,
    /// A new history entry was recorded. Hand the page to persistence.
    Committed(EditorState),
    /// Undo or redo moved to another history entry. The live page is now the
    /// carried one; persist it as well.
    Restored(EditorState),
    /// The selected sticker changed.
    SelectionChanged(Option<ObjectId>),
    /// `undo` was requested at the oldest entry.
    NothingToUndo,
    /// `redo` was requested at the newest entry.
    NothingToRedo,
}

/// One editor session: live page, history, selection, and active gesture.
pub struct EngineCore {
    pub doc: EditorState,
    pub history: History,
    pub ui: UiState,
    pub input: InputState,
    pub viewport: Viewport,
    pub config: EditorConfig,
    rng: StdRng,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_config(EditorConfig::default(), EditorState::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session seeded with `seed` (usually the last persisted page).
    #[must_use]
    pub fn with_config(config: EditorConfig, seed: EditorState) -> Self {
        let config = config.sanitized();
        let doc = sanitize_state(seed, &config);
        Self {
            history: History::new(doc.clone(), config.history_cap),
            doc,
            ui: UiState::default(),
            input: InputState::default(),
            viewport: Viewport::default(),
            config,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Use a fixed seed for sticker placement.
    #[must_use]
    pub fn with_placement_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    // --- Data inputs ---

    /// Replace the page and restart history from it.
    pub fn load_snapshot(&mut self, state: EditorState) -> Vec<Action> {
        self.doc = sanitize_state(state, &self.config);
        self.history = History::new(self.doc.clone(), self.config.history_cap);
        self.input = InputState::Idle;
        let mut actions = Vec::new();
        actions.extend(self.set_selection(None));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Update the canvas size in CSS pixels. Degenerate sizes are ignored.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        let Some(viewport) = Viewport::new(width, height) else {
            debug!(width, height, "ignoring degenerate viewport");
            return Vec::new();
        };
        if viewport == self.viewport {
            return Vec::new();
        }
        self.viewport = viewport;
        vec![Action::RenderNeeded]
    }

    /// Select a sticker, or clear the selection with `None`.
    pub fn select(&mut self, id: Option<ObjectId>) -> Vec<Action> {
        if let Some(id) = id {
            if self.doc.get(&id).is_none() {
                debug!(%id, "select: unknown sticker");
                return Vec::new();
            }
        }
        self.set_selection(id).map_or_else(Vec::new, |a| vec![a, Action::RenderNeeded])
    }

    // --- Drag ---

    /// Start dragging `id` from `sample`. Selects it; the transform is unchanged.
    pub fn begin_drag(&mut self, id: ObjectId, sample: PointerSample) -> Vec<Action> {
        if !self.input.is_idle() {
            debug!(%id, "begin_drag: another gesture is active");
            return Vec::new();
        }
        if self.doc.get(&id).is_none() {
            debug!(%id, "begin_drag: unknown sticker");
            return Vec::new();
        }
        let last_px = sample.point();
        if !last_px.is_finite() {
            return Vec::new();
        }
        self.input = InputState::Dragging { id, pointer_id: sample.id, last_px };
        let mut actions: Vec<Action> = self.set_selection(Some(id)).into_iter().collect();
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Move the dragged sticker by the pointer delta since the last sample.
    pub fn update_drag(&mut self, sample: PointerSample) -> Vec<Action> {
        let InputState::Dragging { id, pointer_id, last_px } = &mut self.input else {
            return Vec::new();
        };
        if sample.id != *pointer_id {
            return Vec::new();
        }
        let current = sample.point();
        if !current.is_finite() {
            return Vec::new();
        }
        let delta = current.sub(*last_px);
        *last_px = current;
        let id = *id;

        let (dx, dy) = self.viewport.delta_px_to_pct(delta.x, delta.y);
        if (dx == 0.0 && dy == 0.0) || !dx.is_finite() || !dy.is_finite() {
            return Vec::new();
        }
        let Some(sticker) = self.doc.get_mut(&id) else {
            return Vec::new();
        };
        sticker.position.x += dx;
        sticker.position.y += dy;
        vec![Action::RenderNeeded]
    }

    /// Finish the drag and record it.
    pub fn end_drag(&mut self) -> Vec<Action> {
        if !matches!(self.input, InputState::Dragging { .. }) {
            return Vec::new();
        }
        self.input = InputState::Idle;
        self.commit()
    }

    // --- Pinch ---

    /// Start a two-finger scale/rotate of `id`, capturing the baseline.
    pub fn begin_pinch(&mut self, id: ObjectId, a: PointerSample, b: PointerSample) -> Vec<Action> {
        if !self.input.is_idle() {
            debug!(%id, "begin_pinch: another gesture is active");
            return Vec::new();
        }
        let Some(sticker) = self.doc.get(&id) else {
            debug!(%id, "begin_pinch: unknown sticker");
            return Vec::new();
        };
        let baseline = PinchBaseline::capture(a, b, sticker.scale, sticker.rotation);
        self.input = InputState::Pinching { id, fingers: canonical_pair(a, b), baseline };
        let mut actions: Vec<Action> = self.set_selection(Some(id)).into_iter().collect();
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Recompute scale and rotation from the baseline and the current touches.
    ///
    /// `a` and `b` may arrive in either order; they are matched to the
    /// previous frame's fingers first.
    pub fn update_pinch(&mut self, a: PointerSample, b: PointerSample) -> Vec<Action> {
        let InputState::Pinching { id, fingers, baseline } = &mut self.input else {
            return Vec::new();
        };
        let Some(sticker) = self.doc.get_mut(id) else {
            return Vec::new();
        };
        let (first, second) = follow_pair(*fingers, a, b);
        if first.point().is_finite() && second.point().is_finite() {
            *fingers = (first, second);
        }
        if baseline.is_degenerate() {
            // The fingers started on the same spot; anchor on the first usable frame.
            *baseline = PinchBaseline::capture(first, second, sticker.scale, sticker.rotation);
            *fingers = canonical_pair(first, second);
            return Vec::new();
        }
        let Some(update) = baseline.apply(first, second, self.config.scale_min, self.config.scale_max) else {
            debug!("skipping degenerate pinch frame");
            return Vec::new();
        };
        sticker.scale = update.scale;
        sticker.rotation = update.rotation;
        vec![Action::RenderNeeded]
    }

    /// Finish the pinch and record it.
    pub fn end_pinch(&mut self) -> Vec<Action> {
        if !matches!(self.input, InputState::Pinching { .. }) {
            return Vec::new();
        }
        self.input = InputState::Idle;
        self.commit()
    }

    /// Abandon the active gesture and put the live page back to the last
    /// recorded state. Nothing is committed.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        if self.input.is_idle() {
            return Vec::new();
        }
        self.input = InputState::Idle;
        match self.history.current() {
            Some(head) if head != &self.doc => {
                self.doc = head.clone();
                vec![Action::RenderNeeded]
            }
            _ => Vec::new(),
        }
    }

    // --- Discrete edits ---

    /// One wheel tick: rotate or scale by a fixed step in the direction of
    /// `delta`'s sign (positive = clockwise / larger). Records immediately.
    pub fn wheel_adjust(&mut self, id: ObjectId, delta: f64, mode: WheelMode) -> Vec<Action> {
        let sign = step_sign(delta);
        if sign == 0.0 {
            return Vec::new();
        }
        let step = match mode {
            WheelMode::Rotate => self.config.rotate_step_deg,
            WheelMode::Scale => self.config.scale_step,
        };
        self.adjust_transform(id, mode, sign * step)
    }

    /// Button-driven rotation by `step_degrees`. Records immediately.
    pub fn nudge_rotate(&mut self, id: ObjectId, direction: Direction, step_degrees: f64) -> Vec<Action> {
        self.adjust_transform(id, WheelMode::Rotate, direction.sign() * step_degrees.abs())
    }

    /// Button-driven scaling by `step_amount` percentage points. Records immediately.
    pub fn nudge_scale(&mut self, id: ObjectId, direction: Direction, step_amount: f64) -> Vec<Action> {
        self.adjust_transform(id, WheelMode::Scale, direction.sign() * step_amount.abs())
    }

    /// Remove a sticker. Clears the selection if it pointed at it.
    pub fn delete_object(&mut self, id: ObjectId) -> Vec<Action> {
        if !self.discrete_edit_allowed("delete_object") {
            return Vec::new();
        }
        if self.doc.remove(&id).is_none() {
            debug!(%id, "delete_object: unknown sticker");
            return Vec::new();
        }
        let mut actions = Vec::new();
        if self.ui.selected_id == Some(id) {
            actions.extend(self.set_selection(None));
        }
        actions.push(Action::RenderNeeded);
        actions.extend(self.commit());
        actions
    }

    /// Drop a new sticker somewhere in the central region and select it.
    pub fn add_object(&mut self, symbol: impl Into<String>) -> Vec<Action> {
        if !self.discrete_edit_allowed("add_object") {
            return Vec::new();
        }
        let (lo, hi) = (self.config.spawn_min_pct, self.config.spawn_max_pct);
        let position = Point::new(self.rng.random_range(lo..=hi), self.rng.random_range(lo..=hi));
        let sticker = StickerObject {
            id: new_object_id(),
            symbol: symbol.into(),
            position,
            scale: self.config.scale_default,
            rotation: 0.0,
        };
        let id = sticker.id;
        self.doc.stickers.push(sticker);

        let mut actions: Vec<Action> = self.set_selection(Some(id)).into_iter().collect();
        actions.push(Action::RenderNeeded);
        actions.extend(self.commit());
        actions
    }

    /// Replace the page text. Records one entry per call that changes it.
    pub fn set_text(&mut self, text: impl Into<String>) -> Vec<Action> {
        if !self.discrete_edit_allowed("set_text") {
            return Vec::new();
        }
        let text = text.into();
        if text == self.doc.text {
            return Vec::new();
        }
        self.doc.text = text;
        let mut actions = vec![Action::RenderNeeded];
        actions.extend(self.commit());
        actions
    }

    /// Move a sticker to the top of the draw order.
    pub fn bring_to_front(&mut self, id: ObjectId) -> Vec<Action> {
        if !self.discrete_edit_allowed("bring_to_front") {
            return Vec::new();
        }
        if !self.doc.bring_to_front(&id) {
            return Vec::new();
        }
        let mut actions = vec![Action::RenderNeeded];
        actions.extend(self.commit());
        actions
    }

    // --- History ---

    /// Step back one entry and replace the live page with it.
    pub fn undo(&mut self) -> Vec<Action> {
        if !self.discrete_edit_allowed("undo") {
            return Vec::new();
        }
        match self.history.undo().cloned() {
            Some(state) => {
                self.doc = state;
                self.after_history_move()
            }
            None => vec![Action::NothingToUndo],
        }
    }

    /// Step forward one entry and replace the live page with it.
    pub fn redo(&mut self) -> Vec<Action> {
        if !self.discrete_edit_allowed("redo") {
            return Vec::new();
        }
        match self.history.redo().cloned() {
            Some(state) => {
                self.doc = state;
                self.after_history_move()
            }
            None => vec![Action::NothingToRedo],
        }
    }

    // --- Raw input ---

    /// Primary press on a sticker starts a drag; on empty canvas it clears the selection.
    pub fn on_pointer_down(&mut self, sample: PointerSample, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if button != Button::Primary || !self.input.is_idle() {
            return Vec::new();
        }
        match self.hit(sample.point()) {
            Some(id) => self.begin_drag(id, sample),
            None => self.select(None),
        }
    }

    pub fn on_pointer_move(&mut self, sample: PointerSample) -> Vec<Action> {
        self.update_drag(sample)
    }

    pub fn on_pointer_up(&mut self, sample: PointerSample) -> Vec<Action> {
        match self.input {
            InputState::Dragging { pointer_id, .. } if pointer_id == sample.id => self.end_drag(),
            _ => Vec::new(),
        }
    }

    /// `touches` is every finger currently on the surface.
    ///
    /// One finger behaves like a pointer press. A second finger ends any drag
    /// and pinches the sticker between the fingers, or the selected one.
    pub fn on_touch_start(&mut self, touches: &[PointerSample]) -> Vec<Action> {
        match touches {
            [] => Vec::new(),
            [only] => self.on_pointer_down(*only, Button::Primary, Modifiers::default()),
            [a, b, ..] => {
                let mut actions = Vec::new();
                let target = match &self.input {
                    InputState::Pinching { .. } => return actions,
                    InputState::Dragging { id, .. } => Some(*id),
                    InputState::Idle => self.hit(a.point().midpoint(b.point())).or(self.ui.selected_id),
                };
                actions.extend(self.end_drag());
                if let Some(id) = target {
                    actions.extend(self.begin_pinch(id, *a, *b));
                }
                actions
            }
        }
    }

    /// `touches` is every finger currently on the surface.
    pub fn on_touch_move(&mut self, touches: &[PointerSample]) -> Vec<Action> {
        match self.input {
            InputState::Dragging { pointer_id, .. } => match touches.iter().find(|t| t.id == pointer_id) {
                Some(t) => self.update_drag(*t),
                None => Vec::new(),
            },
            InputState::Pinching { fingers: (first, second), .. } => {
                // Ids only pick the fingers out of the list when they tell them apart.
                let find = |id: i64| touches.iter().find(|t| t.id == id).copied();
                let by_id = if first.id == second.id { None } else { find(first.id).zip(find(second.id)) };
                match (by_id, touches) {
                    (Some((a, b)), _) | (None, &[a, b, ..]) => self.update_pinch(a, b),
                    _ => Vec::new(),
                }
            }
            InputState::Idle => Vec::new(),
        }
    }

    /// `remaining` is every finger still on the surface after the lift.
    ///
    /// A pinch ends as soon as either of its fingers lifts, or fewer than two
    /// touches remain; the remaining finger does not resume a drag.
    pub fn on_touch_end(&mut self, remaining: &[PointerSample]) -> Vec<Action> {
        let still_down = |id: i64| remaining.iter().any(|t| t.id == id);
        match self.input {
            InputState::Dragging { pointer_id, .. } if !still_down(pointer_id) => self.end_drag(),
            InputState::Pinching { fingers: (first, second), .. }
                if remaining.len() < 2 || !(still_down(first.id) && still_down(second.id)) =>
            {
                self.end_pinch()
            }
            _ => Vec::new(),
        }
    }

    /// Shift+wheel rotates and Ctrl/Cmd+wheel scales the sticker under the
    /// pointer. A plain wheel is left to the host.
    pub fn on_wheel(&mut self, sample: PointerSample, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        let mode = if modifiers.shift {
            WheelMode::Rotate
        } else if modifiers.command() {
            WheelMode::Scale
        } else {
            return Vec::new();
        };
        let Some(id) = self.hit(sample.point()) else {
            return Vec::new();
        };
        // Browsers report shift+wheel on the horizontal axis.
        let amount = if delta.dy == 0.0 { delta.dx } else { delta.dy };
        // Scrolling up (negative) grows / rotates clockwise.
        self.wheel_adjust(id, -amount, mode)
    }

    /// Keyboard shortcuts against the selection and history.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        let selected = self.ui.selected_id;
        let rotate_step = self.config.rotate_step_deg;
        let scale_step = self.config.scale_step;
        match (key.0.as_str(), selected) {
            ("Escape", _) if !self.input.is_idle() => self.cancel_gesture(),
            ("Escape", _) => self.select(None),
            ("z" | "Z", _) if modifiers.command() && modifiers.shift => self.redo(),
            ("z" | "Z", _) if modifiers.command() => self.undo(),
            ("y" | "Y", _) if modifiers.command() => self.redo(),
            ("Delete" | "Backspace", Some(id)) => self.delete_object(id),
            ("[", Some(id)) => self.nudge_rotate(id, Direction::Decrease, rotate_step),
            ("]", Some(id)) => self.nudge_rotate(id, Direction::Increase, rotate_step),
            ("-", Some(id)) => self.nudge_scale(id, Direction::Decrease, scale_step),
            ("+" | "=", Some(id)) => self.nudge_scale(id, Direction::Increase, scale_step),
            _ => Vec::new(),
        }
    }

    // --- Queries ---

    /// The currently selected sticker, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.ui.selected_id
    }

    /// Look up a sticker on the live page.
    #[must_use]
    pub fn object(&self, id: &ObjectId) -> Option<&StickerObject> {
        self.doc.get(id)
    }

    /// The live page, including uncommitted gesture changes.
    #[must_use]
    pub fn state(&self) -> &EditorState {
        &self.doc
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn is_gesture_active(&self) -> bool {
        !self.input.is_idle()
    }

    /// Draw list for the renderer, with selection decoration.
    #[must_use]
    pub fn scene(&self) -> Scene {
        build_scene(&self.doc, self.ui.selected_id, &self.viewport, self.config.sticker_base_px)
    }

    /// Run `f` against a scene with no selection decoration (for image
    /// export), then restore the selection.
    pub fn with_export_view<R>(&mut self, f: impl FnOnce(&Scene) -> R) -> R {
        let saved = self.ui.selected_id.take();
        let scene = self.scene();
        let out = f(&scene);
        self.ui.selected_id = saved;
        out
    }

    // --- Internals ---

    fn hit(&self, px: Point) -> Option<ObjectId> {
        hit_test(px, &self.doc, &self.viewport, self.config.sticker_base_px)
    }

    fn set_selection(&mut self, id: Option<ObjectId>) -> Option<Action> {
        if self.ui.selected_id == id {
            return None;
        }
        self.ui.selected_id = id;
        Some(Action::SelectionChanged(id))
    }

    fn discrete_edit_allowed(&self, op: &str) -> bool {
        if self.input.is_idle() {
            return true;
        }
        debug!(op, "ignored while a gesture is active");
        false
    }

    fn adjust_transform(&mut self, id: ObjectId, mode: WheelMode, amount: f64) -> Vec<Action> {
        if !self.discrete_edit_allowed("adjust_transform") || !amount.is_finite() {
            return Vec::new();
        }
        let (scale_min, scale_max) = (self.config.scale_min, self.config.scale_max);
        let Some(sticker) = self.doc.get_mut(&id) else {
            debug!(%id, "adjust_transform: unknown sticker");
            return Vec::new();
        };
        match mode {
            WheelMode::Rotate => sticker.rotation = normalize_degrees_360(sticker.rotation + amount),
            WheelMode::Scale => sticker.scale = clamp_scale(sticker.scale + amount, scale_min, scale_max),
        }
        let committed = self.commit();
        if committed.is_empty() {
            return committed;
        }
        let mut actions = vec![Action::RenderNeeded];
        actions.extend(committed);
        actions
    }

    /// Record the live page unless it equals the history head.
    fn commit(&mut self) -> Vec<Action> {
        if self.history.current() == Some(&self.doc) {
            debug!("commit skipped: page unchanged");
            return Vec::new();
        }
        self.history.commit(self.doc.clone());
        debug!(cursor = self.history.cursor(), len = self.history.len(), "committed page");
        vec![Action::Committed(self.doc.clone())]
    }

    fn after_history_move(&mut self) -> Vec<Action> {
        let mut actions = vec![Action::Restored(self.doc.clone())];
        if let Some(id) = self.ui.selected_id {
            if self.doc.get(&id).is_none() {
                actions.extend(self.set_selection(None));
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }
}

fn sanitize_state(mut state: EditorState, config: &EditorConfig) -> EditorState {
    for sticker in &mut state.stickers {
        sticker.sanitize(config.scale_min, config.scale_max, config.scale_default);
    }
    state
}
