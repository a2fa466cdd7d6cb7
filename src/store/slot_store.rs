//! Persistent Keyed Store
//!
//! Wraps named slots of JSON-serialized state: read-through initialization,
//! write-through persistence, and a key-scoped change broadcast so every
//! consumer of a slot observes updates. Storage failures never surface to
//! callers; reads fall back to the caller's initial value and writes keep the
//! in-memory state.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use rusqlite::params;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{broadcast, Mutex};
use tracing::warn;

use crate::domain::DomainResult;

use super::db::{self, SharedConnection};

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Change event scoped to one slot key
#[derive(Debug, Clone)]
pub struct SlotChange {
    pub key: String,
}

/// Handle to the keyed slot store.
///
/// Handles are cheap to clone; clones share the connection, the slot cache
/// and the change bus, so a write through one handle is observed by watchers
/// obtained from any other. Concurrent writers to the same key race: the last
/// write wins with a full-value overwrite, there is no merge.
#[derive(Clone)]
pub struct SlotStore {
    conn: SharedConnection,
    cache: Arc<Mutex<HashMap<String, serde_json::Value>>>,
    changes: broadcast::Sender<SlotChange>,
}

impl SlotStore {
    /// Open (or create) the store at the given path
    pub fn open(path: impl AsRef<Path>) -> DomainResult<Self> {
        Ok(Self::with_connection(db::open_slot_db(path.as_ref())?))
    }

    /// In-memory store with no on-disk backing
    pub fn open_in_memory() -> DomainResult<Self> {
        Ok(Self::with_connection(db::open_in_memory()?))
    }

    fn with_connection(conn: SharedConnection) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            conn,
            cache: Arc::new(Mutex::new(HashMap::new())),
            changes,
        }
    }

    /// Read the slot, falling back to `initial` when the slot is absent or
    /// its contents do not deserialize as `T`.
    pub async fn get<T>(&self, key: &str, initial: T) -> T
    where
        T: DeserializeOwned,
    {
        let cached = self.cache.lock().await.get(key).cloned();
        let value = match cached {
            Some(value) => value,
            None => {
                let Some(text) = self.read_slot(key).await else {
                    return initial;
                };
                match serde_json::from_str::<serde_json::Value>(&text) {
                    Ok(value) => {
                        self.cache
                            .lock()
                            .await
                            .insert(key.to_string(), value.clone());
                        value
                    }
                    Err(e) => {
                        warn!(key, error = %e, "slot contents are not valid JSON");
                        return initial;
                    }
                }
            }
        };
        match serde_json::from_value(value) {
            Ok(typed) => typed,
            Err(e) => {
                warn!(key, error = %e, "slot contents do not match the requested type");
                initial
            }
        }
    }

    /// Write the slot and notify every subscriber of `key`.
    ///
    /// The in-memory value updates and the change event fires even when the
    /// underlying write fails, so consumers converge on the written value
    /// until the next successful persist.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_value(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, error = %e, "failed to serialize slot value");
                return;
            }
        };
        self.cache
            .lock()
            .await
            .insert(key.to_string(), json.clone());
        self.write_slot(key, &json).await;
        self.notify(key);
    }

    /// Functional setter form: read (or default), transform, write.
    pub async fn update<T, F>(&self, key: &str, initial: T, f: F)
    where
        T: DeserializeOwned + Serialize,
        F: FnOnce(T) -> T,
    {
        let current = self.get(key, initial).await;
        let next = f(current);
        self.set(key, &next).await;
    }

    /// Delete the slot and notify subscribers
    pub async fn remove(&self, key: &str) {
        self.cache.lock().await.remove(key);
        {
            let conn = self.conn.lock().await;
            if let Err(e) = conn.execute("DELETE FROM slots WHERE key = ?1", params![key]) {
                warn!(key, error = %e, "failed to delete slot");
            }
        }
        self.notify(key);
    }

    /// Subscribe to changes of one key. The subscription lasts as long as
    /// the returned watcher; dropping it unsubscribes.
    pub fn subscribe(&self, key: &str) -> SlotWatcher {
        SlotWatcher {
            key: key.to_string(),
            rx: self.changes.subscribe(),
        }
    }

    fn notify(&self, key: &str) {
        // Send fails only when nobody is subscribed
        let _ = self.changes.send(SlotChange {
            key: key.to_string(),
        });
    }

    async fn read_slot(&self, key: &str) -> Option<String> {
        let conn = self.conn.lock().await;
        match conn.query_row(
            "SELECT value FROM slots WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        ) {
            Ok(text) => Some(text),
            Err(rusqlite::Error::QueryReturnedNoRows) => None,
            Err(e) => {
                warn!(key, error = %e, "failed to read slot");
                None
            }
        }
    }

    async fn write_slot(&self, key: &str, value: &serde_json::Value) {
        let text = value.to_string();
        let now = chrono::Local::now().timestamp_millis();
        let conn = self.conn.lock().await;
        if let Err(e) = conn.execute(
            "INSERT OR REPLACE INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, text, now],
        ) {
            warn!(key, error = %e, "failed to persist slot, keeping in-memory value");
        }
    }
}

/// Key-scoped subscription to slot changes
pub struct SlotWatcher {
    key: String,
    rx: broadcast::Receiver<SlotChange>,
}

impl SlotWatcher {
    /// Wait for the next change to the watched key. Returns `false` once the
    /// store has been dropped. A lagged receiver counts as changed, since the
    /// consumer re-reads the slot either way.
    pub async fn changed(&mut self) -> bool {
        loop {
            match self.rx.recv().await {
                Ok(change) if change.key == self.key => return true,
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(_)) => return true,
                Err(broadcast::error::RecvError::Closed) => return false,
            }
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}
