//! Durable key-value state storage.
//!
//! The store is a capability the controller holds, not something it owns:
//! `load` on startup, incremental `persist` after each mutation. The
//! bundled implementation keeps everything in a single JSON object on
//! disk; keys outside the focus-state schema (UI-only preferences owned
//! by the surfaces) are preserved untouched across writes.

use serde_json::{Map, Value};
use std::future::Future;
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::state::StatePatch;

/// Durable storage for the persisted focus-state keys.
pub trait StateStore {
    /// Load whatever is persisted. Missing keys stay `None` in the patch
    /// and fall back to defaults at the controller.
    fn load(&self) -> impl Future<Output = Result<StatePatch, StorageError>> + Send;

    /// Persist only the fields present in `patch`.
    fn persist(&self, patch: &StatePatch)
        -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Returns `~/.config/focusgate[-dev]/` based on FOCUSGATE_ENV.
///
/// Set FOCUSGATE_ENV=dev to use the development data directory, or
/// FOCUSGATE_DATA_DIR to override the location entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = if let Ok(dir) = std::env::var("FOCUSGATE_DATA_DIR") {
        PathBuf::from(dir)
    } else {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");
        let env = std::env::var("FOCUSGATE_ENV").unwrap_or_else(|_| "production".to_string());
        if env == "dev" {
            base_dir.join("focusgate-dev")
        } else {
            base_dir.join("focusgate")
        }
    };
    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}

/// JSON-file-backed [`StateStore`].
#[derive(Debug, Clone)]
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    /// Store backed by `state.json` in the default data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::at(data_dir()?.join("state.json")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> Result<Map<String, Value>, StorageError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = std::fs::read_to_string(&self.path).map_err(|e| StorageError::LoadFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(StorageError::LoadFailed {
                path: self.path.clone(),
                message: format!("expected a JSON object, found {other}"),
            }),
            Err(e) => Err(StorageError::LoadFailed {
                path: self.path.clone(),
                message: e.to_string(),
            }),
        }
    }

    fn write_object(&self, map: &Map<String, Value>) -> Result<(), StorageError> {
        let persist_err = |message: String| StorageError::PersistFailed {
            path: self.path.clone(),
            message,
        };
        let body =
            serde_json::to_string_pretty(&Value::Object(map.clone())).map_err(|e| persist_err(e.to_string()))?;
        // Write to a sibling temp file and rename so readers never see a
        // half-written state file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body).map_err(|e| persist_err(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| persist_err(e.to_string()))?;
        Ok(())
    }
}

impl StateStore for JsonStateStore {
    async fn load(&self) -> Result<StatePatch, StorageError> {
        let map = self.read_object()?;
        serde_json::from_value(Value::Object(map)).map_err(|e| StorageError::LoadFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    async fn persist(&self, patch: &StatePatch) -> Result<(), StorageError> {
        let mut map = self.read_object()?;
        let patch_value = serde_json::to_value(patch).map_err(|e| StorageError::PersistFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        if let Value::Object(fields) = patch_value {
            for (key, value) in fields {
                map.insert(key, value);
            }
        }
        self.write_object(&map)
    }
}

/// In-memory [`StateStore`] for tests.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    contents: std::sync::Mutex<StatePatch>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the store, as if a previous run had persisted `patch`.
    pub fn seeded(patch: StatePatch) -> Self {
        Self {
            contents: std::sync::Mutex::new(patch),
        }
    }

    pub fn contents(&self) -> StatePatch {
        self.contents.lock().unwrap().clone()
    }
}

impl StateStore for MemoryStateStore {
    async fn load(&self) -> Result<StatePatch, StorageError> {
        Ok(self.contents.lock().unwrap().clone())
    }

    async fn persist(&self, patch: &StatePatch) -> Result<(), StorageError> {
        let mut stored = self.contents.lock().unwrap();
        merge_patch(&mut stored, patch);
        Ok(())
    }
}

fn merge_patch(into: &mut StatePatch, from: &StatePatch) {
    if from.is_active.is_some() {
        into.is_active = from.is_active;
    }
    if from.blocked_sites.is_some() {
        into.blocked_sites = from.blocked_sites.clone();
    }
    if from.schedule.is_some() {
        into.schedule = from.schedule.clone();
    }
    if from.streak_count.is_some() {
        into.streak_count = from.streak_count;
    }
    if from.best_streak.is_some() {
        into.best_streak = from.best_streak;
    }
    if from.last_focus_date.is_some() {
        into.last_focus_date = from.last_focus_date;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Schedule;
    use tempfile::tempdir;

    #[tokio::test]
    async fn load_from_missing_file_yields_empty_patch() {
        let dir = tempdir().unwrap();
        let store = JsonStateStore::at(dir.path().join("state.json"));
        let patch = store.load().await.unwrap();
        assert!(patch.is_empty());
    }

    #[tokio::test]
    async fn persist_then_load_round_trips_present_fields() {
        let dir = tempdir().unwrap();
        let store = JsonStateStore::at(dir.path().join("state.json"));

        let patch = StatePatch {
            is_active: Some(true),
            streak_count: Some(4),
            schedule: Some(Schedule::default()),
            ..Default::default()
        };
        store.persist(&patch).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.is_active, Some(true));
        assert_eq!(loaded.streak_count, Some(4));
        assert_eq!(loaded.schedule, Some(Schedule::default()));
        assert_eq!(loaded.blocked_sites, None);
    }

    #[tokio::test]
    async fn incremental_persist_leaves_other_keys_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        // A UI-only preference owned by the options surface.
        std::fs::write(&path, r#"{"showQuotes": true, "streakCount": 2}"#).unwrap();

        let store = JsonStateStore::at(&path);
        store
            .persist(&StatePatch {
                is_active: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["showQuotes"], serde_json::json!(true));
        assert_eq!(raw["streakCount"], serde_json::json!(2));
        assert_eq!(raw["isActive"], serde_json::json!(true));
    }

    #[tokio::test]
    async fn corrupt_file_reports_load_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonStateStore::at(&path);
        assert!(store.load().await.is_err());
    }

    #[tokio::test]
    async fn memory_store_merges_incremental_writes() {
        let store = MemoryStateStore::new();
        store
            .persist(&StatePatch {
                streak_count: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        store
            .persist(&StatePatch {
                is_active: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        let contents = store.contents();
        assert_eq!(contents.streak_count, Some(1));
        assert_eq!(contents.is_active, Some(true));
    }
}
