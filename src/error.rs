//! Error types for the gridstore import and query pipeline.
//!
//! This module defines one error enum per component:
//!
//! - [`CsvError`] - CSV reading and decoding errors
//! - [`StoreError`] - storage initialization, loading, and query errors
//! - [`ViewError`] - view registry errors
//! - [`ImportError`] - top-level import orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Reading Errors
// =============================================================================

/// Errors while reading and decoding a CSV file.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Malformed CSV (unequal field counts, bad quoting, ...).
    #[error("Invalid CSV format: {0}")]
    Malformed(#[from] csv::Error),

    /// Failed to decode file content.
    #[error("Failed to decode content: {0}")]
    Encoding(String),

    /// Delimiter outside the ASCII range.
    #[error("Unsupported delimiter: {0:?}")]
    Delimiter(char),
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors from the SQLite store: initialization, record loading, and queries.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The CSV header row had zero columns.
    #[error("CSV header row has no columns")]
    EmptyHeader,

    /// Two header columns share the same name.
    #[error("Duplicate column name in header: '{0}'")]
    DuplicateColumn(String),

    /// Column name cannot be used as a SQL identifier.
    #[error("Invalid column name: {0:?}")]
    InvalidColumn(String),

    /// A data row's field count does not match the schema.
    #[error("Row {row} has {found} fields, expected {expected}")]
    RowArity {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Could not remove a pre-existing store file.
    #[error("Could not delete existing store {path}: {source}")]
    Deletion {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No store file at the given path.
    #[error("Store not found: {0}")]
    NotFound(PathBuf),

    /// Underlying SQLite failure.
    #[error("Storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

// =============================================================================
// View Registry Errors
// =============================================================================

/// Errors from the view registry.
#[derive(Debug, Error)]
pub enum ViewError {
    /// No view with the given name.
    #[error("View not found: '{0}'")]
    NotFound(String),

    /// View name is empty or whitespace.
    #[error("View name cannot be empty")]
    EmptyName,

    /// View has no columns.
    #[error("View must select at least one column")]
    EmptyColumns,

    /// View references a column that is not in the schema.
    #[error("Unknown column: '{0}'")]
    UnknownColumn(String),

    /// Failed to encode a column list.
    #[error("Could not encode column list: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Stored column list is not valid JSON.
    #[error("Corrupt column list for view '{name}': {source}")]
    Decode {
        name: String,
        source: serde_json::Error,
    },

    /// Storage failure during a registry operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<rusqlite::Error> for ViewError {
    fn from(err: rusqlite::Error) -> Self {
        ViewError::Store(StoreError::Sqlite(err))
    }
}

// =============================================================================
// Import Errors (top-level)
// =============================================================================

/// Top-level import orchestration errors.
///
/// This is the main error type returned by [`crate::import::import_csv`].
#[derive(Debug, Error)]
pub enum ImportError {
    /// CSV reading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Storage error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for view registry operations.
pub type ViewResult<T> = Result<T, ViewError>;

/// Result type for import operations.
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // StoreError -> ImportError
        let store_err = StoreError::EmptyHeader;
        let import_err: ImportError = store_err.into();
        assert!(import_err.to_string().contains("no columns"));

        // StoreError -> ViewError
        let store_err = StoreError::NotFound(PathBuf::from("missing.db"));
        let view_err: ViewError = store_err.into();
        assert!(view_err.to_string().contains("missing.db"));
    }

    #[test]
    fn test_row_arity_format() {
        let err = StoreError::RowArity {
            row: 3,
            expected: 4,
            found: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("Row 3"));
        assert!(msg.contains("2 fields"));
        assert!(msg.contains("expected 4"));
    }

    #[test]
    fn test_view_not_found_format() {
        let err = ViewError::NotFound("demographics".into());
        assert!(err.to_string().contains("'demographics'"));
    }
}
