//! File-backed session storage: one `<key>.json` per key under a directory.

#[cfg(test)]
#[path = "file_store_test.rs"]
mod file_store_test;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use appt_client::util::storage::{SessionStorage, StorageError};

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn io_error(err: &std::io::Error) -> StorageError {
    StorageError::Io(err.to_string())
}

impl SessionStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&e)),
        }
    }

    /// Write to a sibling temp file, then rename over the target so readers
    /// never see a partial record.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| io_error(&e))?;
        let target = self.path(key);
        let tmp = target.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|e| io_error(&e))?;
        std::fs::rename(&tmp, &target).map_err(|e| io_error(&e))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&e)),
        }
    }
}
