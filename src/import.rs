//! One-call import: parse a CSV file and load it into a store.

use std::path::Path;

use crate::error::ImportResult;
use crate::models::ImportReport;
use crate::parser::{parse_csv_file, parse_csv_file_with};
use crate::store::Store;

/// Parse `path` and replace `store`'s contents with it.
///
/// Passing a delimiter skips sniffing; encoding is always auto-detected.
/// Returns a summary the caller can show to the user.
pub fn import_csv(
    path: impl AsRef<Path>,
    store: &Store,
    delimiter: Option<char>,
) -> ImportResult<ImportReport> {
    let parsed = match delimiter {
        Some(d) => parse_csv_file_with(path, d)?,
        None => parse_csv_file(path)?,
    };

    let rows = store.import(&parsed)?;

    Ok(ImportReport {
        encoding: parsed.encoding,
        delimiter: parsed.delimiter,
        columns: parsed.headers,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CsvError, ImportError, StoreError};

    #[test]
    fn test_end_to_end_import() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("people.csv");
        std::fs::write(&csv_path, "name,age\nAlice,30\nBob,25\n").unwrap();

        let store = Store::new(dir.path().join("people.db"));
        let report = import_csv(&csv_path, &store, None).unwrap();

        assert_eq!(report.rows, 2);
        assert_eq!(report.columns, vec!["name", "age"]);
        assert_eq!(report.delimiter, ',');

        let data = store.fetch_all().unwrap();
        assert_eq!(data.columns, vec!["id", "name", "age"]);
        assert_eq!(data.rows[1], vec!["2", "Bob", "25"]);
    }

    #[test]
    fn test_missing_file_is_typed() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("x.db"));
        let err = import_csv(dir.path().join("absent.csv"), &store, None).unwrap_err();
        assert!(matches!(err, ImportError::Csv(CsvError::FileNotFound(_))));
    }

    #[test]
    fn test_header_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("empty.csv");
        std::fs::write(&csv_path, "a,b,c\n").unwrap();

        let store = Store::new(dir.path().join("empty.db"));
        let report = import_csv(&csv_path, &store, None).unwrap();
        assert_eq!(report.rows, 0);
        assert_eq!(report.columns.len(), 3);
    }

    #[test]
    fn test_blank_file_is_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("blank.csv");
        std::fs::write(&csv_path, "").unwrap();

        let store = Store::new(dir.path().join("blank.db"));
        let err = import_csv(&csv_path, &store, None).unwrap_err();
        assert!(matches!(err, ImportError::Store(StoreError::EmptyHeader)));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_explicit_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("pipes.csv");
        std::fs::write(&csv_path, "a|b\n1|2\n").unwrap();

        let store = Store::new(dir.path().join("pipes.db"));
        let report = import_csv(&csv_path, &store, Some('|')).unwrap();
        assert_eq!(report.delimiter, '|');
        assert_eq!(report.rows, 1);
    }
}
