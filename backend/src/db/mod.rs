//! # Persistence
//!
//! SQLite storage for report templates and configuration settings, plus the
//! read-only data source report queries run against.
//!
//! A connection is opened per operation, as every handler does its own short
//! unit of work. Repository functions take a `&Connection` so tests can run
//! them against a throwaway database file.

pub mod settings;
pub mod templates;

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS templates (
    id           BLOB PRIMARY KEY,
    name         TEXT NOT NULL UNIQUE,
    description  TEXT,
    data         BLOB NOT NULL,
    checksum     TEXT NOT NULL,
    created_by   BLOB,
    created_date TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS configuration_settings (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
";

/// Handle on the service's own read-write database.
#[derive(Clone, Debug)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Database { path: path.into() }
    }

    pub fn connect(&self) -> rusqlite::Result<Connection> {
        Connection::open(&self.path)
    }

    /// Creates missing tables. Safe to call on every start.
    pub fn init_schema(&self) -> rusqlite::Result<()> {
        self.connect()?.execute_batch(SCHEMA)
    }
}

/// Handle on the database report definitions query.
///
/// Opened read-only so a template query can never modify the data it reports on.
#[derive(Clone, Debug)]
pub struct DataSource {
    path: PathBuf,
}

impl DataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DataSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connect(&self) -> rusqlite::Result<Connection> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
    }
}
