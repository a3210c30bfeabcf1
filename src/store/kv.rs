// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{Connection, OptionalExtension, params};
use tracing::warn;

/// Durable string-keyed store. Values are UTF-8 JSON text; callers own the
/// (de)serialization and the policy for handling failed reads and writes.
pub struct KvStore {
    conn: Connection,
}

impl KvStore {
    pub fn new(conn: Connection) -> Self {
        KvStore { conn }
    }

    pub fn get(&self, key: &str) -> rusqlite::Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()
    }

    pub fn set(&self, key: &str, value: &str) -> rusqlite::Result<()> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> rusqlite::Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key=?1", params![key])?;
        Ok(())
    }
}

/// Read and deserialize a JSON value. Absent keys, read failures, and corrupt
/// payloads all come back as `None`; the last two are logged. Persisted state
/// is never allowed to take the application down.
pub fn read_json<T: serde::de::DeserializeOwned>(kv: &KvStore, key: &str) -> Option<T> {
    let raw = match kv.get(key) {
        Ok(v) => v?,
        Err(e) => {
            warn!("Error reading '{}' from storage: {}", key, e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("Corrupt data under '{}', falling back to defaults: {}", key, e);
            None
        }
    }
}

/// Serialize and store a JSON value. Failures are logged and swallowed; the
/// caller's in-memory state stays authoritative until the next write.
pub fn write_json<T: serde::Serialize>(kv: &KvStore, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(s) => s,
        Err(e) => {
            warn!("Error serializing '{}': {}", key, e);
            return;
        }
    };
    if let Err(e) = kv.set(key, &raw) {
        warn!("Error saving '{}' to storage: {}", key, e);
    }
}
