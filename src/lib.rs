//! # Gridstore - CSV import into a local SQLite store with named views
//!
//! Gridstore imports a CSV file into a single-file SQLite store and lets a
//! caller define named "views" (ordered column subsets) over the imported
//! data. It is the data-access core of a local, single-user tabular viewer;
//! any presentation layer (CLI, GUI) sits on top of the typed API.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│   Store (SQLite file)    │
//! │  (auto-enc) │     │  (strict)   │     │ records / records_orig   │
//! └─────────────┘     └─────────────┘     │ views                    │
//!                                         └──────────────────────────┘
//!                                            │               │
//!                                     full scan /       view registry
//!                                     projection         (save/lookup)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gridstore::{import_csv, Store};
//!
//! let store = Store::new("data.db");
//! let report = import_csv("input.csv", &store, None)?;
//! println!("Loaded {} rows", report.rows);
//!
//! store.save_view("slim", &["name".into(), "city".into()])?;
//! let table = store.fetch_view("slim")?;
//! ```
//!
//! Every read or write opens its own short-lived connection; no handle is
//! held across calls. Concurrent writers are not supported.
//!
//! ## Modules
//!
//! - [`error`] - Per-component error types
//! - [`models`] - Domain types (Schema, View, TableData, ImportReport)
//! - [`parser`] - CSV reading with encoding/delimiter auto-detection
//! - [`store`] - SQLite store: import, queries, view registry
//! - [`import`] - One-call parse-and-load orchestration

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Storage
pub mod store;

// Orchestration
pub mod import;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CsvError, CsvResult, ImportError, ImportResult, StoreError, StoreResult, ViewError,
    ViewResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{ImportReport, Schema, TableData, View};

// =============================================================================
// Re-exports - Parser
// =============================================================================

pub use parser::{
    detect_delimiter, detect_encoding, parse_csv_file, parse_csv_file_with, parse_str, ParsedCsv,
};

// =============================================================================
// Re-exports - Store
// =============================================================================

pub use store::Store;

// =============================================================================
// Re-exports - Import
// =============================================================================

pub use import::import_csv;
