//! Persistence seam: the engine hands pages out as JSON blobs and takes them
//! back on mount.
//!
//! DESIGN
//! ======
//! The engine never talks to storage itself. A host implements
//! [`SnapshotStore`] over whatever key-value backend it has (browser storage,
//! a file, an account-scoped remote store). [`Autosave`] debounces writes:
//! every commit records the latest page and pushes the deadline out, and the
//! host polls `take_due` from its event loop. Gesture handling never waits on
//! a write.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::doc::EditorState;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("snapshot store failed: {0}")]
    Backend(String),
    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A key-value store of serialized pages.
pub trait SnapshotStore {
    /// Return the blob stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Backend`] if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Store `blob` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Backend`] if the backend cannot be written.
    fn save(&mut self, key: &str, blob: &str) -> Result<(), PersistError>;

    /// Delete the value under `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Backend`] if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), PersistError>;
}

/// In-process store, for guest sessions and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_owned(), blob.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Load the page stored under `key`.
///
/// Missing, unreadable, or corrupt data yields an empty page so the editor
/// still opens; the cause is logged.
pub fn load_state<S: SnapshotStore + ?Sized>(store: &S, key: &str) -> EditorState {
    let blob = match store.load(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => return EditorState::default(),
        Err(e) => {
            warn!(error = %e, key, "snapshot load failed; starting with an empty page");
            return EditorState::default();
        }
    };
    match serde_json::from_str::<EditorState>(&blob) {
        Ok(state) => state,
        Err(e) => {
            warn!(error = %e, key, "corrupt snapshot; starting with an empty page");
            EditorState::default()
        }
    }
}

/// Serialize `state` and store it under `key`.
///
/// # Errors
///
/// Returns [`PersistError::Encode`] if serialization fails, or whatever the
/// store reports on write.
pub fn save_state<S: SnapshotStore + ?Sized>(store: &mut S, key: &str, state: &EditorState) -> Result<(), PersistError> {
    let blob = serde_json::to_string(state)?;
    store.save(key, &blob)
}

/// Trailing-edge debounce for page writes.
#[derive(Debug, Clone)]
pub struct Autosave {
    delay: Duration,
    pending: Option<EditorState>,
    last_change: Option<Instant>,
}

impl Autosave {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None, last_change: None }
    }

    /// Remember `state` as the page to write and restart the delay.
    pub fn record(&mut self, state: EditorState, now: Instant) {
        self.pending = Some(state);
        self.last_change = Some(now);
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether the delay has elapsed since the last recorded change.
    #[must_use]
    pub fn due(&self, now: Instant) -> bool {
        match (&self.pending, self.last_change) {
            (Some(_), Some(at)) => now.saturating_duration_since(at) >= self.delay,
            _ => false,
        }
    }

    /// Take the pending page if its delay has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Option<EditorState> {
        if !self.due(now) {
            return None;
        }
        self.flush()
    }

    /// Take the pending page regardless of the delay (e.g. on unmount).
    pub fn flush(&mut self) -> Option<EditorState> {
        self.last_change = None;
        self.pending.take()
    }
}
