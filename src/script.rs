//! Scripted input replay.
//!
//! A script is JSON lines, one input event per line, tagged by `type`:
//!
//! ```text
//! {"type":"add","symbol":"🌼"}
//! {"type":"pointer_down","x":50,"y":50}
//! {"type":"pointer_move","x":60,"y":45,"at_ms":16}
//! {"type":"pointer_up","x":60,"y":45,"at_ms":32}
//! {"type":"undo","at_ms":2000}
//! ```
//!
//! `at_ms` is an optional timestamp on a virtual clock that starts at zero.
//! It never runs backwards and drives the autosave debounce, so a replay
//! writes the same snapshots no matter how fast it is fed. Blank lines and
//! lines starting with `#` are skipped.

use std::time::{Duration, Instant};

use canvas::input::{Button, Direction, Key, Modifiers, WheelDelta};
use canvas::persist::{Autosave, PersistError, SnapshotStore, load_state, save_state};
use canvas::{Action, EditorState, EngineCore, ObjectId, PointerSample};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: {source}")]
    Parse { line: usize, source: serde_json::Error },
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// One scripted input event.
///
/// Events that target a sticker take an optional `id`; without one they act
/// on the current selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        id: i64,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        id: i64,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        id: i64,
    },
    TouchStart {
        touches: Vec<PointerSample>,
    },
    TouchMove {
        touches: Vec<PointerSample>,
    },
    TouchEnd {
        #[serde(default)]
        remaining: Vec<PointerSample>,
    },
    Wheel {
        x: f64,
        y: f64,
        #[serde(default)]
        dx: f64,
        #[serde(default)]
        dy: f64,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Add {
        symbol: String,
    },
    Delete {
        #[serde(default)]
        id: Option<ObjectId>,
    },
    Select {
        #[serde(default)]
        id: Option<ObjectId>,
    },
    Text {
        text: String,
    },
    NudgeRotate {
        #[serde(default)]
        id: Option<ObjectId>,
        direction: Direction,
        #[serde(default)]
        step: Option<f64>,
    },
    NudgeScale {
        #[serde(default)]
        id: Option<ObjectId>,
        direction: Direction,
        #[serde(default)]
        step: Option<f64>,
    },
    Front {
        #[serde(default)]
        id: Option<ObjectId>,
    },
    Undo,
    Redo,
    Viewport {
        width: f64,
        height: f64,
    },
}

/// A parsed script line: the event plus its optional timestamp.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptStep {
    #[serde(default)]
    pub at_ms: Option<u64>,
    #[serde(flatten)]
    pub event: ReplayEvent,
}

/// Parse one script line. Blank and `#` comment lines yield `None`.
///
/// # Errors
///
/// Returns [`ScriptError::Parse`] with the 1-based `line_no` if the line is
/// not a known event.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<ScriptStep>, ScriptError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some).map_err(|source| ScriptError::Parse { line: line_no, source })
}

impl ReplayEvent {
    /// Feed the event to `engine`.
    pub fn apply(self, engine: &mut EngineCore) -> Vec<Action> {
        match self {
            Self::PointerDown { x, y, id, button, modifiers } => {
                engine.on_pointer_down(PointerSample::new(x, y, id), button, modifiers)
            }
            Self::PointerMove { x, y, id } => engine.on_pointer_move(PointerSample::new(x, y, id)),
            Self::PointerUp { x, y, id } => engine.on_pointer_up(PointerSample::new(x, y, id)),
            Self::TouchStart { touches } => engine.on_touch_start(&touches),
            Self::TouchMove { touches } => engine.on_touch_move(&touches),
            Self::TouchEnd { remaining } => engine.on_touch_end(&remaining),
            Self::Wheel { x, y, dx, dy, modifiers } => {
                engine.on_wheel(PointerSample::new(x, y, 0), WheelDelta { dx, dy }, modifiers)
            }
            Self::Key { key, modifiers } => engine.on_key_down(&Key(key), modifiers),
            Self::Add { symbol } => engine.add_object(symbol),
            Self::Delete { id } => with_target(engine, id, EngineCore::delete_object),
            Self::Select { id } => engine.select(id),
            Self::Text { text } => engine.set_text(text),
            Self::NudgeRotate { id, direction, step } => {
                let step = step.unwrap_or(engine.config.rotate_step_deg);
                with_target(engine, id, |e, id| e.nudge_rotate(id, direction, step))
            }
            Self::NudgeScale { id, direction, step } => {
                let step = step.unwrap_or(engine.config.scale_step);
                with_target(engine, id, |e, id| e.nudge_scale(id, direction, step))
            }
            Self::Front { id } => with_target(engine, id, EngineCore::bring_to_front),
            Self::Undo => engine.undo(),
            Self::Redo => engine.redo(),
            Self::Viewport { width, height } => engine.set_viewport(width, height),
        }
    }
}

fn with_target(
    engine: &mut EngineCore,
    id: Option<ObjectId>,
    op: impl FnOnce(&mut EngineCore, ObjectId) -> Vec<Action>,
) -> Vec<Action> {
    match id.or(engine.selection()) {
        Some(id) => op(engine, id),
        None => {
            debug!("no sticker given and nothing selected");
            Vec::new()
        }
    }
}

/// Counters reported after a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub events: usize,
    pub commits: usize,
    pub saves: usize,
    pub rejected: usize,
}

/// An engine seeded from a store, writing commits back through a debounced
/// autosave.
pub struct Session<'a, S: SnapshotStore + ?Sized> {
    engine: EngineCore,
    store: &'a mut S,
    key: String,
    autosave: Autosave,
    origin: Instant,
    clock_ms: u64,
    stats: ReplayStats,
}

impl<'a, S: SnapshotStore + ?Sized> Session<'a, S> {
    /// Load the page under `key` (or an empty one) and start a session on it.
    pub fn open(store: &'a mut S, key: &str, config: &AppConfig) -> Self {
        let seed = load_state(&*store, key);
        info!(key, stickers = seed.len(), "session opened");
        let engine = EngineCore::with_config(config.editor.clone(), seed);
        Self {
            engine,
            store,
            key: key.to_owned(),
            autosave: Autosave::new(config.autosave_delay),
            origin: Instant::now(),
            clock_ms: 0,
            stats: ReplayStats::default(),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &EngineCore {
        &self.engine
    }

    #[must_use]
    pub fn stats(&self) -> ReplayStats {
        self.stats
    }

    /// Apply one step, writing any save that fell due before it.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if a due save fails.
    pub fn apply(&mut self, step: ScriptStep) -> Result<(), PersistError> {
        if let Some(at) = step.at_ms {
            self.clock_ms = self.clock_ms.max(at);
        }
        let now = self.origin + Duration::from_millis(self.clock_ms);
        self.save_due(now)?;

        self.stats.events += 1;
        for action in step.event.apply(&mut self.engine) {
            match action {
                Action::Committed(page) => {
                    self.stats.commits += 1;
                    self.autosave.record(page, now);
                }
                Action::Restored(page) => self.autosave.record(page, now),
                Action::NothingToUndo => {
                    self.stats.rejected += 1;
                    debug!("nothing to undo");
                }
                Action::NothingToRedo => {
                    self.stats.rejected += 1;
                    debug!("nothing to redo");
                }
                Action::RenderNeeded | Action::SelectionChanged(_) => {}
            }
        }
        Ok(())
    }

    /// Parse and apply one raw script line.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError`] if the line does not parse or a save fails.
    pub fn apply_line(&mut self, line: &str, line_no: usize) -> Result<(), ScriptError> {
        if let Some(step) = parse_line(line, line_no)? {
            self.apply(step)?;
        }
        Ok(())
    }

    /// Write any pending page and return the final page. A gesture still in
    /// flight is cancelled, not committed.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the final save fails.
    pub fn finish(mut self) -> Result<(EditorState, ReplayStats), PersistError> {
        if self.engine.is_gesture_active() {
            warn!("script ended mid-gesture; dropping the uncommitted change");
            self.engine.cancel_gesture();
        }
        if let Some(page) = self.autosave.flush() {
            self.write(&page)?;
        }
        info!(events = self.stats.events, commits = self.stats.commits, saves = self.stats.saves, "replay finished");
        Ok((self.engine.state().clone(), self.stats))
    }

    fn save_due(&mut self, now: Instant) -> Result<(), PersistError> {
        if let Some(page) = self.autosave.take_due(now) {
            self.write(&page)?;
        }
        Ok(())
    }

    fn write(&mut self, page: &EditorState) -> Result<(), PersistError> {
        save_state(&mut *self.store, &self.key, page)?;
        self.stats.saves += 1;
        debug!(key = %self.key, clock_ms = self.clock_ms, "page saved");
        Ok(())
    }
}

#[cfg(test)]
#[path = "script_test.rs"]
mod tests;
