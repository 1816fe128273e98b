use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::app_dirs::AppDirs;
use crate::run::Run;

/// Failures raised by the run repository. None are fatal to the process;
/// callers decide how each one is surfaced.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read the run log: {0}")]
    Read(#[source] io::Error),
    #[error("the run log is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("could not write the run log: {0}")]
    Write(#[source] io::Error),
}

/// Persistence contract for the run collection.
///
/// `append` and `remove` are provided in terms of `load_all`/`save_all`,
/// so every backend gets the same read-modify-write semantics. Persisted
/// order is insertion order; display order is the caller's concern.
pub trait RunStore {
    fn load_all(&self) -> Result<Vec<Run>, StoreError>;
    fn save_all(&self, runs: &[Run]) -> Result<(), StoreError>;

    fn append(&self, run: Run) -> Result<(), StoreError> {
        let mut runs = self.load_all()?;
        runs.push(run);
        self.save_all(&runs)
    }

    /// Removing an id that is not present leaves the collection unchanged
    /// and still succeeds.
    fn remove(&self, id: &str) -> Result<(), StoreError> {
        let mut runs = self.load_all()?;
        runs.retain(|run| run.id != id);
        self.save_all(&runs)
    }
}

/// File-backed store holding the whole collection as one JSON document.
#[derive(Debug, Clone)]
pub struct FileRunStore {
    path: PathBuf,
}

impl FileRunStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::runs_path().unwrap_or_else(|| PathBuf::from("stride_runs.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileRunStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStore for FileRunStore {
    fn load_all(&self) -> Result<Vec<Run>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no run log yet, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::Read(e)),
        };
        serde_json::from_slice(&bytes).map_err(StoreError::Corrupt)
    }

    fn save_all(&self, runs: &[Run]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(StoreError::Write)?;
        }
        let data = serde_json::to_vec_pretty(runs)
            .map_err(|e| StoreError::Write(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        fs::write(&self.path, data).map_err(StoreError::Write)
    }
}

/// In-memory store for unit tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryRunStore {
    runs: RefCell<Vec<Run>>,
}

impl MemoryRunStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runs(runs: Vec<Run>) -> Self {
        Self {
            runs: RefCell::new(runs),
        }
    }
}

impl RunStore for MemoryRunStore {
    fn load_all(&self) -> Result<Vec<Run>, StoreError> {
        Ok(self.runs.borrow().clone())
    }

    fn save_all(&self, runs: &[Run]) -> Result<(), StoreError> {
        *self.runs.borrow_mut() = runs.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    fn sample_runs() -> Vec<Run> {
        vec![
            Run::new("1", 5.2, 1800.0),
            Run::new("2", 10.0, 3000.0),
        ]
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let store = FileRunStore::with_path(dir.path().join("runs.json"));
        assert_eq!(store.load_all().unwrap(), vec![]);
    }

    #[test]
    fn roundtrip_preserves_records() {
        let dir = tempdir().unwrap();
        let store = FileRunStore::with_path(dir.path().join("runs.json"));
        store.save_all(&sample_runs()).unwrap();
        assert_eq!(store.load_all().unwrap(), sample_runs());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = FileRunStore::with_path(dir.path().join("state").join("runs.json"));
        store.save_all(&sample_runs()).unwrap();
        assert_eq!(store.load_all().unwrap().len(), 2);
    }

    #[test]
    fn corrupt_file_is_an_error_not_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("runs.json");
        fs::write(&path, b"{not json").unwrap();
        let store = FileRunStore::with_path(&path);
        assert_matches!(store.load_all(), Err(StoreError::Corrupt(_)));
    }

    #[test]
    fn append_keeps_existing_records() {
        let dir = tempdir().unwrap();
        let store = FileRunStore::with_path(dir.path().join("runs.json"));
        store.save_all(&sample_runs()).unwrap();
        store.append(Run::new("3", 21.1, 6300.0)).unwrap();

        let runs = store.load_all().unwrap();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[2].id, "3");
    }

    #[test]
    fn append_refuses_to_clobber_a_corrupt_log() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("runs.json");
        fs::write(&path, b"{not json").unwrap();
        let store = FileRunStore::with_path(&path);
        assert_matches!(store.append(Run::new("1", 5.0, 1500.0)), Err(StoreError::Corrupt(_)));
        // the broken content is still there for the user to recover
        assert_eq!(fs::read(&path).unwrap(), b"{not json");
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = FileRunStore::with_path(dir.path().join("runs.json"));
        store.save_all(&sample_runs()).unwrap();

        store.remove("1").unwrap();
        let after_first = store.load_all().unwrap();
        assert_eq!(after_first.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["2"]);

        store.remove("1").unwrap();
        assert_eq!(store.load_all().unwrap(), after_first);
    }

    #[test]
    fn remove_unknown_id_succeeds() {
        let dir = tempdir().unwrap();
        let store = FileRunStore::with_path(dir.path().join("runs.json"));
        store.save_all(&sample_runs()).unwrap();
        store.remove("nope").unwrap();
        assert_eq!(store.load_all().unwrap(), sample_runs());
    }

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryRunStore::new();
        store.append(Run::new("1", 5.0, 1500.0)).unwrap();
        store.append(Run::new("2", 8.0, 2500.0)).unwrap();
        store.remove("1").unwrap();

        let runs = store.load_all().unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].id, "2");
    }
}
