//! File-backed snapshot store: one JSON document per key in a directory.
//!
//! Writes go to a uniquely named temp file in the same directory and are then
//! renamed over the target, so a crash mid-write leaves the previous page
//! intact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use canvas::persist::{PersistError, SnapshotStore};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys map to `<dir>/<key>.json`. Only ASCII letters, digits, `-` and
    /// `_` are accepted.
    fn path_for(&self, key: &str) -> Result<PathBuf, PersistError> {
        let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PersistError::Backend(format!("invalid store key {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn backend(action: &str, path: &Path, error: &io::Error) -> PersistError {
    PersistError::Backend(format!("{action} {}: {error}", path.display()))
}

impl SnapshotStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(backend("read", &path, &e)),
        }
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<(), PersistError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| backend("create", &self.dir, &e))?;

        let tmp = self.dir.join(format!(".{key}.{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, blob).map_err(|e| backend("write", &tmp, &e))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                warn!(error = %cleanup, path = %tmp.display(), "failed to remove temp snapshot");
            }
            return Err(backend("rename", &path, &e));
        }
        debug!(path = %path.display(), bytes = blob.len(), "snapshot written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(backend("remove", &path, &e)),
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
