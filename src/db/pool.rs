//! SQLite connection wrapper (lightweight for CLI usage).

use crate::errors::AppResult;
use rusqlite::{Connection, Result};
use std::io;
use std::path::Path;

/// Fail with `Database not found` instead of letting SQLite create the file.
pub fn require_existing(path: &Path) -> AppResult<()> {
    if !path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("Database not found: {}", path.display()),
        )
        .into());
    }
    Ok(())
}

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        Self::configure(conn)
    }

    /// Like [`DbPool::new`], for commands that only inspect an existing database.
    pub fn open_existing(path: &str) -> AppResult<Self> {
        require_existing(Path::new(path))?;
        Ok(Self::new(path)?)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::configure(conn)
    }

    // SQLite ignores REFERENCES clauses unless this is set per connection,
    // and it cannot be changed once a transaction is open.
    fn configure(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    pub fn foreign_keys_enabled(&self) -> Result<bool> {
        let on: i64 = self
            .conn
            .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?;
        Ok(on == 1)
    }
}
