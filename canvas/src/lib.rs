//! Gesture and history engine for the journal sticker canvas.
//!
//! The crate owns the interaction logic of the journal page: turning pointer,
//! touch, wheel, and keyboard input into moves, scales, and rotations of
//! freely placed stickers, and keeping a bounded undo/redo history of those
//! edits. It draws nothing and stores nothing; the host renders from
//! [`render::Scene`] and persists the pages carried by
//! [`engine::Action::Committed`] and [`engine::Action::Restored`] (undo and
//! redo) through a [`persist::SnapshotStore`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Session state, intent-level operations, and raw event routing |
//! | [`doc`] | Sticker and page types |
//! | [`history`] | Bounded linear undo/redo stack |
//! | [`gesture`] | Two-finger pinch/rotate math |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing against rotated stickers |
//! | [`viewport`] | Pixel ↔ percent coordinate conversion |
//! | [`angle`] | Degree normalization and scale clamping |
//! | [`render`] | Draw list for the host renderer and image export |
//! | [`persist`] | Snapshot store seam, load fallback, and debounced autosave |
//! | [`config`] | Per-session limits |
//! | [`consts`] | Shared numeric constants (scale bounds, steps, history cap, etc.) |

pub mod angle;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod gesture;
pub mod history;
pub mod hit;
pub mod input;
pub mod persist;
pub mod render;
pub mod viewport;

pub use config::EditorConfig;
pub use doc::{EditorState, ObjectId, StickerObject};
pub use engine::{Action, EngineCore};
pub use input::PointerSample;
