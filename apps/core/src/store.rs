use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection};
use serde_json::Value;

pub const USAGE_KEY: &str = "last-used";
pub const AGENTS_KEY: &str = "agents";

#[derive(Debug)]
pub enum StoreError {
    Backend(String),
    Serialize(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(error) => write!(f, "store backend error: {error}"),
            Self::Serialize(error) => write!(f, "store serialize error: {error}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Backend(value.to_string())
    }
}

pub type ChangeListener = Arc<dyn Fn(&str) + Send + Sync>;

/// External key-value persistence used for usage records and agents.
/// `on_change` listeners fire after every successful `set` of their key.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
    fn on_change(&self, key: &str, listener: ChangeListener);
}

#[derive(Default)]
struct Listeners {
    entries: Mutex<Vec<(String, ChangeListener)>>,
}

impl Listeners {
    fn add(&self, key: &str, listener: ChangeListener) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.push((key.to_string(), listener));
    }

    fn notify(&self, key: &str) {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        for (watched, listener) in entries.iter() {
            if watched == key {
                listener(key);
            }
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
    listeners: Listeners,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        {
            let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
            values.insert(key.to_string(), value);
        }
        self.listeners.notify(key);
        Ok(())
    }

    fn on_change(&self, key: &str, listener: ChangeListener) {
        self.listeners.add(key, listener);
    }
}

pub struct SqliteStore {
    db: Mutex<Connection>,
    listeners: Listeners,
}

impl SqliteStore {
    pub fn open_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|error| StoreError::Backend(error.to_string()))?;
        }
        Self::from_connection(Connection::open(path)?)
    }

    fn from_connection(db: Connection) -> Result<Self, StoreError> {
        db.execute(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )?;
        Ok(Self {
            db: Mutex::new(db),
            listeners: Listeners::default(),
        })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let db = self.db.lock().unwrap_or_else(|e| e.into_inner());
        let mut stmt = db.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        if let Some(row) = rows.next()? {
            let raw: String = row.get(0)?;
            let value = serde_json::from_str(&raw)
                .map_err(|error| StoreError::Serialize(error.to_string()))?;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&value)
            .map_err(|error| StoreError::Serialize(error.to_string()))?;
        {
            let db = self.db.lock().unwrap_or_else(|e| e.into_inner());
            db.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value=excluded.value",
                params![key, raw],
            )?;
        }
        self.listeners.notify(key);
        Ok(())
    }

    fn on_change(&self, key: &str, listener: ChangeListener) {
        self.listeners.add(key, listener);
    }
}
