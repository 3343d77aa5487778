// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::errors::MemoryError;
use crate::memory::MemoryRecord;

const CREATE_MEMORIES: &str = "CREATE TABLE IF NOT EXISTS memories (
    id TEXT PRIMARY KEY,
    user_id TEXT,
    prompt TEXT,
    expanded_prompt TEXT,
    image_path TEXT,
    model3d_path TEXT,
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
)";

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, prompt, expanded_prompt, image_path, model3d_path, timestamp FROM memories";

/// The `memories` table in a SQLite file.
///
/// The connection closes when the store is dropped.
pub struct MemoryStore {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl MemoryStore {
    /// Open (creating if needed) the database and its `memories` table
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MemoryError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| MemoryError::Directory {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path).map_err(|source| MemoryError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        conn.execute(CREATE_MEMORIES, [])?;

        Ok(Self {
            conn: Mutex::new(conn),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn insert(&self, record: &MemoryRecord) -> Result<(), MemoryError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO memories (id, user_id, prompt, expanded_prompt, image_path, model3d_path, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                record.id,
                record.user_id,
                record.prompt,
                record.expanded_prompt,
                record.image_path,
                record.model3d_path,
                record.timestamp,
            ],
        )?;
        Ok(())
    }

    pub async fn count(&self) -> Result<usize, MemoryError> {
        let conn = self.conn.lock().await;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM memories", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Most recent records first
    pub async fn recent(&self, limit: usize) -> Result<Vec<MemoryRecord>, MemoryError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY timestamp DESC, rowid DESC LIMIT ?1",
            SELECT_COLUMNS
        ))?;
        let records = stmt
            .query_map(params![limit as i64], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    pub async fn find(&self, id: &str) -> Result<Option<MemoryRecord>, MemoryError> {
        let conn = self.conn.lock().await;
        let record = conn
            .query_row(
                &format!("{} WHERE id = ?1", SELECT_COLUMNS),
                params![id],
                record_from_row,
            )
            .optional()?;
        Ok(record)
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<MemoryRecord> {
    Ok(MemoryRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        prompt: row.get(2)?,
        expanded_prompt: row.get(3)?,
        image_path: row.get(4)?,
        model3d_path: row.get(5)?,
        timestamp: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn record(prompt: &str) -> MemoryRecord {
        MemoryRecord::new("super-user", prompt, format!("{} expanded", prompt), "o.png", "m.glb")
    }

    #[tokio::test]
    async fn creates_table_and_round_trips_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::open(dir.path().join("memory.db")).unwrap();
        assert_eq!(store.count().await.unwrap(), 0);

        let stored = record("glowing dragon");
        store.insert(&stored).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        let found = store.find(&stored.id).await.unwrap().unwrap();
        assert_eq!(found.prompt, "glowing dragon");
        assert_eq!(found.expanded_prompt, "glowing dragon expanded");
        assert_eq!(found.timestamp, stored.timestamp);
        assert!(store.find("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn recent_is_newest_first_and_limited() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::open(dir.path().join("memory.db")).unwrap();

        let mut old = record("first");
        old.timestamp = Utc::now() - Duration::hours(1);
        store.insert(&old).await.unwrap();
        store.insert(&record("second")).await.unwrap();
        store.insert(&record("third")).await.unwrap();

        let recent = store.recent(2).await.unwrap();
        let prompts: Vec<&str> = recent.iter().map(|r| r.prompt.as_str()).collect();
        assert_eq!(prompts, vec!["third", "second"]);
    }

    #[tokio::test]
    async fn existing_database_is_reopened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("memory.db");

        let store = MemoryStore::open(&path).unwrap();
        store.insert(&record("kept")).await.unwrap();
        drop(store);

        let reopened = MemoryStore::open(&path).unwrap();
        assert_eq!(reopened.count().await.unwrap(), 1);
        assert_eq!(reopened.path(), path.as_path());
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::open(dir.path().join("memory.db")).unwrap();
        let stored = record("once");

        store.insert(&stored).await.unwrap();
        let err = store.insert(&stored).await.unwrap_err();

        assert!(matches!(err, MemoryError::Sqlite(_)));
    }
}
