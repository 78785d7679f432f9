//! JSON file-backed storage (persists across restarts).

use risk_types::{Storage, StorageError};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Storage kept as a single JSON object on disk.
///
/// Every mutation rewrites the whole file through a temporary sibling and a rename.
/// A missing file reads as an empty object.
pub struct JsonFileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStorage {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StorageError::Format(format!(
                "{} does not hold a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(StorageError::Format(e.to_string())),
        }
    }

    fn save(&self, map: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(map)
            .map_err(|e| StorageError::Format(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, format!("{}\n", body))?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn mutate(&self, f: impl FnOnce(&mut Map<String, Value>)) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut map = self.load()?;
        f(&mut map);
        self.save(&map)?;
        tracing::debug!(path = %self.path.display(), keys = map.len(), "storage saved");
        Ok(())
    }
}

impl Storage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.load()?;
        Ok(match map.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.mutate(|map| {
            map.insert(key.to_string(), Value::String(value.to_string()));
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.load()?.get(key).is_none() {
            return Ok(());
        }
        self.mutate(|map| {
            map.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persists_between_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let first = JsonFileStorage::new(&path);
        assert!(first.get("theme").unwrap().is_none());
        first.set("theme", "dark").unwrap();
        first.set("access_token", "tok-1").unwrap();

        let second = JsonFileStorage::new(&path);
        assert_eq!(second.get("theme").unwrap().as_deref(), Some("dark"));
        second.remove("access_token").unwrap();
        second.remove("access_token").unwrap();

        assert!(first.get("access_token").unwrap().is_none());
        assert_eq!(first.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn rejects_non_object_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        let storage = JsonFileStorage::new(&path);
        assert!(matches!(
            storage.get("theme"),
            Err(StorageError::Format(_))
        ));
    }

    #[test]
    fn remove_on_missing_file_does_not_create_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let storage = JsonFileStorage::new(&path);
        storage.remove("access_token").unwrap();
        assert!(!path.exists());
    }
}
