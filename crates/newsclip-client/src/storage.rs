//! Key-value persistence port.
//!
//! The narrow seam behind which platform storage lives. Adapters: an
//! in-memory map for tests and a single-file JSON store for native targets.

use crate::error::ClientError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Get/set/remove by key; values are opaque strings.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    async fn get(&self, key: &str) -> Result<Option<String>, ClientError>;

    /// Write a value
    async fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;

    /// Delete a value
    async fn remove(&self, key: &str) -> Result<(), ClientError>;
}

/// In-memory adapter
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), ClientError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

/// File adapter: one JSON object on disk, rewritten on every set/remove.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file (created on first write)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<HashMap<String, String>, ClientError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let value: Value = serde_json::from_str(&contents)
                    .map_err(|e| ClientError::Storage(e.to_string()))?;
                let map = value
                    .as_object()
                    .ok_or_else(|| ClientError::Storage("store file is not an object".to_string()))?
                    .iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect();
                Ok(map)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(ClientError::Storage(e.to_string())),
        }
    }

    fn write_all(&self, values: &HashMap<String, String>) -> Result<(), ClientError> {
        let json = serde_json::to_string_pretty(values)
            .map_err(|e| ClientError::Storage(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| ClientError::Storage(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.read_all()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }

    async fn remove(&self, key: &str) -> Result<(), ClientError> {
        let mut values = self.read_all()?;
        values.remove(key);
        self.write_all(&values)
    }
}
