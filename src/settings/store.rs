//! Settings store backends and change notifications

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::StoreError;

/// Raw values as persisted by the settings UI, keyed like the extension storage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSettings {
    /// Newline-separated domain substrings, free text
    pub url_list: Option<String>,
    /// Time limit as `HH:MM:SS`
    pub time_limit: Option<String>,
    pub is_enabled: Option<bool>,
}

/// Storage area a change notification originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreArea {
    Sync,
    Local,
    Managed,
}

/// A change notification from the settings store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreChange {
    pub keys: Vec<String>,
    pub area: StoreArea,
}

impl StoreChange {
    /// A sync-area change touching every settings key
    pub fn sync_all() -> Self {
        Self {
            keys: vec![
                "urlList".to_string(),
                "timeLimit".to_string(),
                "isEnabled".to_string(),
            ],
            area: StoreArea::Sync,
        }
    }
}

/// Read access to the settings store
pub trait ConfigStore: Send {
    fn read(&self) -> Result<StoredSettings, StoreError>;
}

/// Settings persisted as a JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonFileStore {
    /// A missing file reads as an empty store so defaults apply
    fn read(&self) -> Result<StoredSettings, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Settings file {} not found, using defaults", self.path.display());
                return Ok(StoredSettings::default());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&contents)?)
    }
}

/// In-memory store shared between a writer and the page, used by tests and embedders
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<Option<StoredSettings>>>,
}

impl MemoryStore {
    pub fn new(settings: StoredSettings) -> Self {
        Self {
            values: Arc::new(Mutex::new(Some(settings))),
        }
    }

    /// Replace the stored values
    pub fn set(&self, settings: StoredSettings) {
        if let Ok(mut values) = self.values.lock() {
            *values = Some(settings);
        }
    }

    /// Make subsequent reads fail until the next `set`
    pub fn set_unavailable(&self) {
        if let Ok(mut values) = self.values.lock() {
            *values = None;
        }
    }
}

impl ConfigStore for MemoryStore {
    fn read(&self) -> Result<StoredSettings, StoreError> {
        let values = self
            .values
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("Failed to lock store: {}", e)))?;

        values
            .clone()
            .ok_or_else(|| StoreError::Unavailable("store is offline".to_string()))
    }
}
