//! SQLite persistence layer.
//!
//! RULE: Only the store modules talk to the database.
//! Engines and the facade call store methods — they never execute SQL.

use crate::error::PortalResult;
use rusqlite::Connection;

mod announcement;
mod complaint;

pub struct PortalStore {
    conn: Connection,
}

impl PortalStore {
    /// Open (or create) the portal database at `path`.
    pub fn open(path: &str) -> PortalResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: better concurrent read performance.
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> PortalResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> PortalResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_portal.sql"))?;
        Ok(())
    }
}

/// Turn an unrecognized enum label from a row into a rusqlite conversion
/// failure, so a corrupted column surfaces as a store error.
fn bad_label(idx: usize, label: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        idx,
        rusqlite::types::Type::Text,
        format!("unrecognized label: {label}").into(),
    )
}
