//! Domain models for the gridstore core.
//!
//! This module contains the data structures passed between the parser, the
//! store, and the presentation layer:
//!
//! - [`Schema`] - ordered column names derived from a CSV header
//! - [`View`] - a named, ordered subset of schema columns
//! - [`TableData`] - query results materialized for tabular rendering
//! - [`ImportReport`] - summary of a completed import

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Schema
// =============================================================================

/// Ordered column names derived from the CSV header row.
///
/// Fixed for the lifetime of one import. All columns are text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    /// Build a schema from a CSV header row.
    ///
    /// Rejects an empty header, duplicate names, and names that cannot be
    /// used as SQL identifiers (empty or containing NUL).
    pub fn from_header(header: &[String]) -> StoreResult<Self> {
        if header.is_empty() {
            return Err(StoreError::EmptyHeader);
        }

        for (i, name) in header.iter().enumerate() {
            if name.is_empty() || name.contains('\0') {
                return Err(StoreError::InvalidColumn(name.clone()));
            }
            if header[..i].contains(name) {
                return Err(StoreError::DuplicateColumn(name.clone()));
            }
        }

        Ok(Self {
            columns: header.to_vec(),
        })
    }

    /// Build a schema from column names already known to be valid
    /// (e.g. recovered from an existing store's table metadata).
    pub(crate) fn from_columns(columns: Vec<String>) -> Self {
        Self { columns }
    }

    /// Column names, in header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Whether the schema contains a column with this exact name.
    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }
}

// =============================================================================
// View
// =============================================================================

/// A named, ordered subset of schema columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    /// User-supplied unique name.
    pub name: String,
    /// Selected columns, in display order.
    pub columns: Vec<String>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

// =============================================================================
// Table Data
// =============================================================================

/// Query results materialized for tabular rendering.
///
/// Every cell is already stringified; a presentation layer can render this
/// directly without knowing anything about the storage types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableData {
    /// Column headers, in result order.
    pub columns: Vec<String>,
    /// Data rows; each row has exactly `columns.len()` cells.
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Number of data rows (excluding the header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True if the result has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Import Report
// =============================================================================

/// Summary of a completed import, for user feedback.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    /// Detected or requested encoding of the input file.
    pub encoding: String,
    /// Detected or requested delimiter.
    pub delimiter: char,
    /// Column names derived from the header.
    pub columns: Vec<String>,
    /// Number of data rows loaded.
    pub rows: usize,
}
