//! SQLite-backed store for imported tabular data.
//!
//! A [`Store`] is a path-holding context object; it keeps no open handles.
//! Every operation opens its own short-lived connection against the store
//! file and closes it on return, matching the tool's single-user,
//! per-request resource model. Concurrent writers are not guarded against.
//!
//! The store file holds three relations:
//!
//! - `records` - the working table all reads go through
//! - `records_orig` - a write-once duplicate of the import, reserved for
//!   future reset/diff features
//! - `views` - the named-view registry

pub mod import;
pub mod query;
pub mod views;

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::error::{StoreError, StoreResult};
use crate::models::Schema;

/// Working table all display queries read from.
pub const DATA_TABLE: &str = "records";
/// Untouched duplicate of the import.
pub const ORIG_TABLE: &str = "records_orig";
/// Named-view registry.
pub const VIEW_TABLE: &str = "views";

/// Context object for one store file.
///
/// Holds only the storage path; see the module docs for the connection
/// lifecycle.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Create a store handle for `path`. The file need not exist yet;
    /// importing creates it.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open a handle to an existing store, failing if the file is missing.
    ///
    /// Use this for the "load without re-import" flow where the caller
    /// expects previously imported data to be present.
    pub fn open_existing(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(StoreError::NotFound(path));
        }
        Ok(Self { path })
    }

    /// Path of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the store file if present.
    pub fn delete_if_exists(&self) -> StoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Deletion {
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// The live schema: column names of the working table, in order.
    ///
    /// Recovered from the single-row probe's result metadata, so it works
    /// on a freshly reopened store without any side table.
    pub fn schema(&self) -> StoreResult<Schema> {
        let conn = self.connect()?;
        schema_on(&conn)
    }

    pub(crate) fn connect(&self) -> StoreResult<Connection> {
        Connection::open(&self.path).map_err(StoreError::Sqlite)
    }
}

/// Read the working-table schema through an already open connection.
pub(crate) fn schema_on(conn: &Connection) -> StoreResult<Schema> {
    let stmt = conn.prepare(&query::probe_sql())?;
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .skip(2) // id, row_idx
        .map(String::from)
        .collect();
    Ok(Schema::from_columns(columns))
}
