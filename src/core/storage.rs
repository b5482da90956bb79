use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::Result;
use crate::settings::Settings;

const DB_FILE: &str = "mediscribe.db";
const SETTINGS_PREFIX: &str = "settings.";
const DARK_MODE_KEY: &str = "mediscribe.dark_mode";

/// Minimal key-value interface standing in for the browser's localStorage.
/// Production code uses [`SqliteStore`]; tests inject [`MemoryStore`].
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

pub fn expand_tilde(path: &str) -> PathBuf {
    let stripped = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\"));

    if let Some(stripped) = stripped {
        let home = std::env::var_os("HOME")
            .or_else(|| std::env::var_os("USERPROFILE"))
            .or_else(|| {
                let drive = std::env::var_os("HOMEDRIVE");
                let path = std::env::var_os("HOMEPATH");
                match (drive, path) {
                    (Some(drive), Some(path)) => {
                        let mut combined = PathBuf::from(drive);
                        combined.push(path);
                        Some(combined.into_os_string())
                    }
                    _ => None,
                }
            });

        if let Some(home) = home {
            return PathBuf::from(home).join(stripped);
        }
    }

    PathBuf::from(path)
}

pub fn data_dir(settings: &Settings) -> PathBuf {
    expand_tilde(&settings.storage.data_dir)
}

pub fn db_path(settings: &Settings) -> PathBuf {
    data_dir(settings).join(DB_FILE)
}

/// Settings always live at the fixed default location, regardless of any
/// configured data dir. A relocated data dir is itself a setting; if it
/// moved with the data it points at, a restart could never find it again.
/// History and preferences follow the configured dir.
pub fn settings_db_path() -> PathBuf {
    db_path(&Settings::default())
}

pub fn open_settings_store() -> Result<SqliteStore> {
    SqliteStore::open(&settings_db_path())
}

fn ensure_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Durable store backed by a single `kv` table in sqlite. Mutations are
/// plain read-modify-write with no cross-process coordination; concurrent
/// writers are an accepted risk, as they were for the original client.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        ensure_dir(path)?;
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
      );",
        )?;
        Ok(Self { conn })
    }

    pub fn open_default(settings: &Settings) -> Result<Self> {
        Self::open(&db_path(settings))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
       ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// In-memory fake for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

fn settings_entries(settings: &Settings) -> Vec<(&'static str, Value)> {
    vec![
        ("api.base_url", json!(settings.api.base_url)),
        ("api.timeout_secs", json!(settings.api.timeout_secs)),
        ("upload.max_file_bytes", json!(settings.upload.max_file_bytes)),
        ("storage.data_dir", json!(settings.storage.data_dir)),
    ]
}

fn apply_setting(settings: &mut Settings, key: &str, value: Value) {
    match key {
        "api.base_url" => assign(&mut settings.api.base_url, value),
        "api.timeout_secs" => assign(&mut settings.api.timeout_secs, value),
        "upload.max_file_bytes" => assign(&mut settings.upload.max_file_bytes, value),
        "storage.data_dir" => assign(&mut settings.storage.data_dir, value),
        _ => {}
    }
}

fn assign<T: DeserializeOwned>(target: &mut T, value: Value) {
    if let Ok(parsed) = serde_json::from_value::<T>(value) {
        *target = parsed;
    }
}

/// Read persisted settings from `store`, falling back to defaults for keys
/// that are missing or fail to parse.
pub fn load_settings_from(store: &dyn KeyValueStore) -> Settings {
    let defaults = Settings::default();
    let mut settings = defaults.clone();
    for (key, _) in settings_entries(&defaults) {
        let stored = match store.get(&format!("{SETTINGS_PREFIX}{key}")) {
            Ok(Some(raw)) => raw,
            _ => continue,
        };
        if let Ok(parsed) = serde_json::from_str::<Value>(&stored) {
            apply_setting(&mut settings, key, parsed);
        }
    }
    settings
}

pub fn save_settings_to(store: &mut dyn KeyValueStore, settings: &Settings) -> Result<()> {
    for (key, value) in settings_entries(settings) {
        let encoded = serde_json::to_string(&value)?;
        store.set(&format!("{SETTINGS_PREFIX}{key}"), &encoded)?;
    }
    Ok(())
}

/// Load settings from the default store location. Any storage failure
/// degrades to defaults so a broken data dir never blocks the client.
pub fn load_settings() -> Settings {
    let store = match open_settings_store() {
        Ok(store) => store,
        Err(err) => {
            tracing::warn!("could not open settings store: {err}");
            return Settings::default();
        }
    };
    load_settings_from(&store)
}

pub fn dark_mode(store: &dyn KeyValueStore) -> bool {
    match store.get(DARK_MODE_KEY) {
        Ok(Some(raw)) => serde_json::from_str::<bool>(&raw).unwrap_or(false),
        _ => false,
    }
}

pub fn toggle_dark_mode(store: &mut dyn KeyValueStore) -> Result<bool> {
    let next = !dark_mode(store);
    store.set(DARK_MODE_KEY, &serde_json::to_string(&next)?)?;
    Ok(next)
}
