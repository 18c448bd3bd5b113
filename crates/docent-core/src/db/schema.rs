//! Store schema and initialization

use crate::error::{DocentError, Result};
use rusqlite::{params, Connection, OpenFlags};
use std::path::{Path, PathBuf};

/// File name of the index inside the persist directory
pub const INDEX_FILE_NAME: &str = "index.sqlite";

/// Persisted embedding index
pub struct IndexStore {
    pub(crate) conn: Connection,
    path: Option<PathBuf>,
}

const SCHEMA_VERSION: i32 = 1;

const CREATE_TABLES: &str = r#"
-- Segments in insertion order
CREATE TABLE IF NOT EXISTS segments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source TEXT NOT NULL,
    page INTEGER NOT NULL,
    pos INTEGER NOT NULL,
    text TEXT NOT NULL,
    chunk_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- One embedding per segment
CREATE TABLE IF NOT EXISTS embeddings (
    segment_id INTEGER PRIMARY KEY REFERENCES segments(id),
    embedding BLOB NOT NULL
);

-- Model metadata for dimension validation
CREATE TABLE IF NOT EXISTS model_metadata (
    model TEXT PRIMARY KEY,
    dimensions INTEGER NOT NULL,
    created_at TEXT NOT NULL
);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY
);
"#;

impl IndexStore {
    /// Create a fresh store under `dir`, replacing any previous index file
    pub fn create(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| {
            DocentError::Storage(format!("cannot create directory {:?}: {}", dir, e))
        })?;

        let path = dir.join(INDEX_FILE_NAME);
        for suffix in ["", "-wal", "-shm"] {
            let mut name = path.clone().into_os_string();
            name.push(suffix);
            let file = PathBuf::from(name);
            if file.exists() {
                std::fs::remove_file(&file).map_err(|e| {
                    DocentError::Storage(format!("cannot replace {:?}: {}", file, e))
                })?;
            }
        }

        let conn = Connection::open(&path)?;
        let store = Self {
            conn,
            path: Some(path),
        };
        store.initialize()?;

        tracing::debug!("Created index store at {:?}", dir);
        Ok(store)
    }

    /// Open an existing store under `dir`
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let path = dir.join(INDEX_FILE_NAME);
        if !path.is_file() {
            return Err(DocentError::index_unavailable(dir, "no index file found"));
        }

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| DocentError::index_unavailable(dir, e.to_string()))?;

        let store = Self {
            conn,
            path: Some(path),
        };
        match store.schema_version() {
            Ok(Some(_)) => Ok(store),
            Ok(None) => Err(DocentError::index_unavailable(dir, "missing schema version")),
            Err(e) => Err(DocentError::index_unavailable(dir, e.to_string())),
        }
    }

    /// Open in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn, path: None };
        store.initialize()?;
        Ok(store)
    }

    /// Path of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;",
        )?;

        self.conn.execute_batch(CREATE_TABLES)?;

        self.conn.execute(
            "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;

        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> Result<Option<i32>> {
        let result = self.conn.query_row(
            "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        );
        match result {
            Ok(version) => Ok(Some(version)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
