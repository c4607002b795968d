use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::stroke_log::{ParseError, StrokeLog};

/// Slot the drawing is saved under
pub const DEFAULT_STORAGE_KEY: &str = "savedCanvas";

/// Errors that can occur during canvas persistence operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize stroke log: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Saved canvas is malformed: {0}")]
    InvalidState(#[from] ParseError),

    #[error("Failed to access storage: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// A string key/value store, the shape of browser local storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()>;

    /// Removing a missing key is not an error
    fn remove(&mut self, key: &str) -> PersistenceResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> PersistenceResult<()> {
        (**self).remove(key)
    }
}

/// Process-local store, used by tests and as a fallback when no other backend works
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PersistenceResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        // Create storage directory if it doesn't exist
        fs::create_dir_all(&self.dir)?;

        // Write next to the target and rename so a crash never leaves half a file
        let tmp = self.dir.join(format!("{}.{}.tmp", key, uuid::Uuid::new_v4()));
        fs::write(&tmp, value)?;
        if let Err(err) = fs::rename(&tmp, self.path_for(key)) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PersistenceResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// The browser's `window.localStorage`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new() -> PersistenceResult<Self> {
        let storage = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or_else(|| PersistenceError::Unavailable("localStorage is not accessible".to_owned()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|err| PersistenceError::Unavailable(format!("{:?}", err)))
    }

    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| PersistenceError::Unavailable(format!("{:?}", err)))
    }

    fn remove(&mut self, key: &str) -> PersistenceResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|err| PersistenceError::Unavailable(format!("{:?}", err)))
    }
}

/// Saves and restores the stroke log in a single named slot
#[derive(Debug, Clone)]
pub struct CanvasStorage<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CanvasStorage<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn save(&mut self, log: &StrokeLog) -> PersistenceResult<()> {
        let json = log.serialize()?;
        self.store.set(&self.key, &json)?;
        log::info!("Saved {} stroke log entries under {:?}", log.len(), self.key);
        Ok(())
    }

    /// `Ok(None)` when nothing has been saved
    pub fn load(&self) -> PersistenceResult<Option<StrokeLog>> {
        let Some(json) = self.store.get(&self.key)? else {
            log::debug!("No saved canvas under {:?}", self.key);
            return Ok(None);
        };
        if json.trim().is_empty() {
            return Ok(None);
        }
        let log = StrokeLog::deserialize(&json)?;
        log::info!("Loaded {} stroke log entries from {:?}", log.len(), self.key);
        Ok(Some(log))
    }

    pub fn clear(&mut self) -> PersistenceResult<()> {
        self.store.remove(&self.key)?;
        log::info!("Removed saved canvas {:?}", self.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{StrokeEntry, StrokePoint};
    use egui::{Color32, Pos2};

    fn sample_log() -> StrokeLog {
        StrokeLog::from_entries(vec![
            StrokeEntry::Point(StrokePoint::new(Pos2::new(1.0, 2.0), 10.0, Color32::BLACK, false)),
            StrokeEntry::Point(StrokePoint::new(Pos2::new(3.0, 4.0), 10.0, Color32::BLACK, false)),
            StrokeEntry::Gap,
        ])
    }

    #[test]
    fn load_without_save_is_none() {
        let storage = CanvasStorage::new(MemoryStore::new());
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut storage = CanvasStorage::new(MemoryStore::new());
        let log = sample_log();
        storage.save(&log).unwrap();
        assert_eq!(storage.load().unwrap(), Some(log));
    }

    #[test]
    fn clear_removes_the_slot() {
        let mut storage = CanvasStorage::new(MemoryStore::new());
        storage.save(&sample_log()).unwrap();
        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
        // Clearing twice is fine
        storage.clear().unwrap();
    }

    #[test]
    fn corrupt_slot_is_a_parse_error() {
        let mut store = MemoryStore::new();
        store.set(DEFAULT_STORAGE_KEY, "[{\"x\": 1").unwrap();
        let storage = CanvasStorage::new(store);
        assert!(matches!(storage.load(), Err(PersistenceError::InvalidState(_))));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn file_store_round_trips() {
        let dir = std::env::temp_dir().join(format!("sketch_paint_{}", uuid::Uuid::new_v4()));
        let mut storage = CanvasStorage::new(FileStore::new(&dir));

        assert!(storage.load().unwrap().is_none());
        storage.save(&sample_log()).unwrap();
        assert!(dir.join("savedCanvas.json").exists());
        assert_eq!(storage.load().unwrap(), Some(sample_log()));

        storage.clear().unwrap();
        assert!(!dir.join("savedCanvas.json").exists());

        let _ = fs::remove_dir_all(&dir);
    }
}
