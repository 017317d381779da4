//! Read-query construction and result materialization.
//!
//! All dynamic SQL in the crate is built here, against an identifier
//! quoting routine that escapes every schema-derived name. Three query
//! shapes exist: the full scan, the single-row probe used to enumerate
//! live columns, and the view projection.

use rusqlite::types::ValueRef;

use crate::error::{StoreError, StoreResult, ViewResult};
use crate::models::TableData;
use crate::store::{schema_on, Store, DATA_TABLE};

/// Quote a schema-derived name as a SQL identifier.
///
/// Doubles embedded quotes; rejects names that are empty or contain NUL,
/// which SQLite cannot represent in an identifier.
pub(crate) fn quote_ident(name: &str) -> StoreResult<String> {
    if name.is_empty() || name.contains('\0') {
        return Err(StoreError::InvalidColumn(name.to_string()));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

/// Single-row probe over the working table, used only for column metadata.
pub(crate) fn probe_sql() -> String {
    format!("SELECT * FROM {DATA_TABLE} LIMIT 1")
}

/// Full scan: every schema column plus the synthetic identifier, in
/// insertion order.
pub(crate) fn full_scan_sql(columns: &[String]) -> StoreResult<String> {
    let quoted = quote_all(columns)?;
    Ok(format!(
        "SELECT id, {} FROM {DATA_TABLE} ORDER BY id",
        quoted.join(", ")
    ))
}

/// Projection of the given columns, in the given order, over the working
/// table.
pub(crate) fn projection_sql(columns: &[String]) -> StoreResult<String> {
    let quoted = quote_all(columns)?;
    Ok(format!(
        "SELECT {} FROM {DATA_TABLE} ORDER BY id",
        quoted.join(", ")
    ))
}

fn quote_all(columns: &[String]) -> StoreResult<Vec<String>> {
    columns.iter().map(|c| quote_ident(c)).collect()
}

impl Store {
    /// Every record of the working table, with the synthetic identifier as
    /// the first column.
    pub fn fetch_all(&self) -> StoreResult<TableData> {
        let conn = self.connect()?;
        let schema = schema_on(&conn)?;
        let sql = full_scan_sql(schema.columns())?;

        let mut columns = Vec::with_capacity(schema.len() + 1);
        columns.push("id".to_string());
        columns.extend(schema.columns().iter().cloned());

        let mut stmt = conn.prepare(&sql)?;
        let rows = collect_rows(&mut stmt)?;
        Ok(TableData { columns, rows })
    }

    /// The records of the working table projected through a named view.
    pub fn fetch_view(&self, name: &str) -> ViewResult<TableData> {
        let columns = self.view_columns(name)?;
        let sql = projection_sql(&columns)?;

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = collect_rows(&mut stmt)?;
        Ok(TableData { columns, rows })
    }
}

fn collect_rows(stmt: &mut rusqlite::Statement<'_>) -> Result<Vec<Vec<String>>, rusqlite::Error> {
    let ncols = stmt.column_count();
    let mut out = Vec::new();
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut cells = Vec::with_capacity(ncols);
        for i in 0..ncols {
            cells.push(cell_to_string(row.get_ref(i)?));
        }
        out.push(cells);
    }
    Ok(out)
}

/// Render a storage value as display text. NULL becomes the empty string.
fn cell_to_string(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(r) => r.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
        ValueRef::Blob(b) => String::from_utf8_lossy(b).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_quote_ident_plain() {
        assert_eq!(quote_ident("name").unwrap(), "\"name\"");
    }

    #[test]
    fn test_quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("a\"b").unwrap(), "\"a\"\"b\"");
    }

    #[test]
    fn test_quote_ident_allows_spaces_and_commas() {
        assert_eq!(quote_ident("First Name").unwrap(), "\"First Name\"");
        assert_eq!(quote_ident("a,b").unwrap(), "\"a,b\"");
    }

    #[test]
    fn test_quote_ident_rejects_empty() {
        assert!(matches!(
            quote_ident(""),
            Err(StoreError::InvalidColumn(_))
        ));
    }

    #[test]
    fn test_quote_ident_rejects_nul() {
        assert!(matches!(
            quote_ident("a\0b"),
            Err(StoreError::InvalidColumn(_))
        ));
    }

    #[test]
    fn test_full_scan_shape() {
        let sql = full_scan_sql(&cols(&["a", "b"])).unwrap();
        assert_eq!(sql, "SELECT id, \"a\", \"b\" FROM records ORDER BY id");
    }

    #[test]
    fn test_projection_shape_preserves_order() {
        let sql = projection_sql(&cols(&["c", "a"])).unwrap();
        assert_eq!(sql, "SELECT \"c\", \"a\" FROM records ORDER BY id");
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(ValueRef::Null), "");
        assert_eq!(cell_to_string(ValueRef::Integer(42)), "42");
        assert_eq!(cell_to_string(ValueRef::Text(b"hi")), "hi");
    }
}
