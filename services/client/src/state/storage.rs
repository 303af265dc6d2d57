//! services/client/src/state/storage.rs
//!
//! `StateStorage` implementations: one JSON file per key, or an in-memory map.

use pairpad_core::ports::{PortError, PortResult, StateStorage};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Keeps each snapshot in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StateStorage for JsonFileStorage {
    fn load(&self, key: &str) -> PortResult<Option<Value>> {
        let path = self.path(key);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PortError::Unexpected(e.to_string())),
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Ignoring unreadable snapshot {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    fn save(&self, key: &str, value: &Value) -> PortResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| PortError::Unexpected(e.to_string()))?;
        let body =
            serde_json::to_string_pretty(value).map_err(|e| PortError::Unexpected(e.to_string()))?;
        let path = self.path(key);
        debug!("Writing snapshot {}", path.display());
        std::fs::write(path, body).map_err(|e| PortError::Unexpected(e.to_string()))
    }

    fn remove(&self, key: &str) -> PortResult<()> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PortError::Unexpected(e.to_string())),
        }
    }
}

/// Keeps snapshots for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStorage for MemoryStorage {
    fn load(&self, key: &str) -> PortResult<Option<Value>> {
        Ok(self
            .values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned())
    }

    fn save(&self, key: &str, value: &Value) -> PortResult<()> {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&self, key: &str) -> PortResult<()> {
        self.values
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn file_storage_keeps_one_file_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("state"));

        assert_eq!(storage.load("auth-storage").unwrap(), None);
        storage.save("auth-storage", &json!({"is_authenticated": true})).unwrap();
        storage.save("onboarding-storage", &json!({"progress": null})).unwrap();

        assert!(dir.path().join("state/auth-storage.json").exists());
        assert_eq!(
            storage.load("auth-storage").unwrap(),
            Some(json!({"is_authenticated": true}))
        );

        storage.remove("auth-storage").unwrap();
        storage.remove("auth-storage").unwrap();
        assert_eq!(storage.load("auth-storage").unwrap(), None);
        assert!(storage.load("onboarding-storage").unwrap().is_some());
    }

    #[test]
    fn unreadable_snapshot_loads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("auth-storage.json"), "{oops").unwrap();
        let storage = JsonFileStorage::new(dir.path());
        assert_eq!(storage.load("auth-storage").unwrap(), None);
    }
}
