//! Slot Database
//!
//! SQLite connection setup and migrations for the slot table. One row per
//! slot key, the value is a JSON document.

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

pub(crate) type SharedConnection = Arc<Mutex<Connection>>;

/// Open (or create) the slot database at the given path
pub(crate) fn open_slot_db(path: &Path) -> DomainResult<SharedConnection> {
    let conn = Connection::open(path).map_err(|e| DomainError::Internal(e.to_string()))?;
    run_migrations(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// In-memory database, used by tests
pub(crate) fn open_in_memory() -> DomainResult<SharedConnection> {
    let conn = Connection::open_in_memory().map_err(|e| DomainError::Internal(e.to_string()))?;
    run_migrations(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS slots (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    Ok(())
}
