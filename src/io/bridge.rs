use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Error type for storage bridge operations
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Synchronous key-value storage. `get` returns the stored string for a
/// key, or `None` when nothing has been stored under it; `set` fully
/// replaces the value. There is no partial write visible to callers.
pub trait StorageBridge {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), BridgeError>;
}

/// In-memory bridge for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryBridge {
    values: HashMap<String, String>,
}

impl MemoryBridge {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBridge for MemoryBridge {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BridgeError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-per-key bridge rooted at a data directory: the key `tasks` lives in
/// `<dir>/tasks.json`. Writes go through a temp file in the same directory
/// and are renamed into place, so readers never see a partial value.
#[derive(Debug)]
pub struct DirBridge {
    dir: PathBuf,
}

impl DirBridge {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirBridge { dir: dir.into() }
    }

    /// The file backing a given key.
    pub fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBridge for DirBridge {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BridgeError> {
        let path = self.key_path(key);
        atomic_write(&path, value.as_bytes()).map_err(|e| BridgeError::WriteError {
            path,
            source: e,
        })
    }
}

fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
