//! Page configuration loaded from the settings store
//!
//! The store is written by the settings UI; the timer core only reads it and
//! reloads everything on each change notification.

pub mod store;

pub use store::{ConfigStore, JsonFileStore, MemoryStore, StoreArea, StoreChange, StoredSettings};

use serde::Serialize;

use crate::{
    errors::StoreError,
    utils::parse_time_limit,
    watchlist::parse_url_list,
};

/// Time limit applied when the store has none
pub const DEFAULT_TIME_LIMIT: &str = "00:30:00";

/// Effective page configuration, fully replaced on every reload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    pub enabled: bool,
    /// Time limit as stored, `HH:MM:SS`
    pub time_limit: String,
    /// Time limit in seconds, 0 when the stored value is malformed
    pub limit_seconds: u64,
    pub watchlist: Vec<String>,
}

impl Settings {
    /// Build settings from raw stored values, applying defaults
    pub fn from_stored(stored: &StoredSettings) -> Self {
        let time_limit = stored
            .time_limit
            .clone()
            .unwrap_or_else(|| DEFAULT_TIME_LIMIT.to_string());

        Self {
            enabled: stored.is_enabled.unwrap_or(true),
            limit_seconds: parse_time_limit(&time_limit),
            time_limit,
            watchlist: parse_url_list(stored.url_list.as_deref()),
        }
    }

    /// Read the store and build settings
    pub fn load(store: &dyn ConfigStore) -> Result<Self, StoreError> {
        let stored = store.read()?;
        Ok(Self::from_stored(&stored))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_stored(&StoredSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_uses_defaults() {
        let settings = Settings::default();
        assert!(settings.enabled);
        assert_eq!(settings.time_limit, "00:30:00");
        assert_eq!(settings.limit_seconds, 1800);
        assert!(settings.watchlist.is_empty());
    }

    #[test]
    fn stored_values_replace_defaults() {
        let store = MemoryStore::new(StoredSettings {
            url_list: Some("example.com\n  \nnews.site".to_string()),
            time_limit: Some("01:00:05".to_string()),
            is_enabled: Some(false),
        });

        let settings = Settings::load(&store).unwrap();
        assert!(!settings.enabled);
        assert_eq!(settings.limit_seconds, 3605);
        assert_eq!(settings.watchlist, vec!["example.com", "news.site"]);
    }

    #[test]
    fn malformed_limit_becomes_zero() {
        let settings = Settings::from_stored(&StoredSettings {
            time_limit: Some("half an hour".to_string()),
            ..Default::default()
        });
        assert_eq!(settings.limit_seconds, 0);
    }
}
