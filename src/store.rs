//! Key-value persistence: the store contract, two backends, and the record load/save helpers.

use crate::models::{Match, SessionState, Settings};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const STATE_KEY: &str = "loba-counter-state";
pub const SETTINGS_KEY: &str = "loba-counter-settings";
pub const HISTORY_KEY: &str = "loba-counter-history";

/// Errors a store write can hit.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "Storage I/O error: {}", e),
            StoreError::Serialize(e) => write!(f, "Could not serialize record: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialize(e)
    }
}

/// String key-value store with no transactions and no schema.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store (tests, or running without a data directory).
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Clone, Debug)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
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

impl KeyValueStore for DirStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Read and parse a record. Missing or malformed data yields `None`.
fn load_record<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed {}: {}", key, e);
            None
        }
    }
}

fn save_record<T: Serialize>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

pub fn load_session(store: &dyn KeyValueStore) -> SessionState {
    load_record(store, STATE_KEY).unwrap_or_default()
}

pub fn load_settings(store: &dyn KeyValueStore) -> Settings {
    load_record(store, SETTINGS_KEY).unwrap_or_default()
}

/// Anything other than a JSON array of matches loads as an empty history.
pub fn load_history(store: &dyn KeyValueStore) -> Vec<Match> {
    load_record(store, HISTORY_KEY).unwrap_or_default()
}

pub fn save_session(store: &mut dyn KeyValueStore, session: &SessionState) -> Result<(), StoreError> {
    save_record(store, STATE_KEY, session)
}

pub fn save_settings(store: &mut dyn KeyValueStore, settings: &Settings) -> Result<(), StoreError> {
    save_record(store, SETTINGS_KEY, settings)
}

pub fn save_history(store: &mut dyn KeyValueStore, history: &[Match]) -> Result<(), StoreError> {
    save_record(store, HISTORY_KEY, &history)
}
