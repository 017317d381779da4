//! Store initialization and record loading.
//!
//! An import is all-or-nothing: the header is validated before the old
//! store file is touched, every row's arity is checked up front, and table
//! creation plus both table loads run inside one transaction.

use rusqlite::{Connection, ToSql};

use crate::error::{StoreError, StoreResult};
use crate::models::Schema;
use crate::parser::ParsedCsv;
use crate::store::query::quote_ident;
use crate::store::{Store, DATA_TABLE, ORIG_TABLE, VIEW_TABLE};

impl Store {
    /// Replace the store's contents with the parsed CSV.
    ///
    /// Derives the schema from the header, deletes any pre-existing store
    /// file, recreates the three tables, and loads every data row into both
    /// the working and the original table, tagged with its zero-based
    /// source row index. Returns the number of rows loaded.
    pub fn import(&self, parsed: &ParsedCsv) -> StoreResult<usize> {
        let schema = Schema::from_header(&parsed.headers)?;

        // Arity must hold for every row before the old store file is
        // touched.
        for (i, row) in parsed.rows.iter().enumerate() {
            if row.len() != schema.len() {
                return Err(StoreError::RowArity {
                    row: i,
                    expected: schema.len(),
                    found: row.len(),
                });
            }
        }

        self.delete_if_exists()?;

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;

        create_tables(&tx, &schema)?;
        {
            let mut data_stmt = tx.prepare(&insert_sql(DATA_TABLE, &schema)?)?;
            let mut orig_stmt = tx.prepare(&insert_sql(ORIG_TABLE, &schema)?)?;

            for (i, row) in parsed.rows.iter().enumerate() {
                let row_idx = i as i64;
                let mut params: Vec<&dyn ToSql> = Vec::with_capacity(row.len() + 1);
                params.push(&row_idx);
                for field in row {
                    params.push(field);
                }
                data_stmt.execute(params.as_slice())?;
                orig_stmt.execute(params.as_slice())?;
            }
        }
        tx.commit()?;

        Ok(parsed.rows.len())
    }
}

fn create_tables(conn: &Connection, schema: &Schema) -> StoreResult<()> {
    let column_defs: Vec<String> = schema
        .columns()
        .iter()
        .map(|c| Ok(format!("{} TEXT", quote_ident(c)?)))
        .collect::<StoreResult<_>>()?;
    let body = format!(
        "(id INTEGER PRIMARY KEY, row_idx INTEGER NOT NULL, {})",
        column_defs.join(", ")
    );

    conn.execute(&format!("CREATE TABLE IF NOT EXISTS {DATA_TABLE} {body}"), [])?;
    conn.execute(&format!("CREATE TABLE IF NOT EXISTS {ORIG_TABLE} {body}"), [])?;
    conn.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {VIEW_TABLE} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                columns TEXT NOT NULL,
                created_at TEXT NOT NULL
            )"
        ),
        [],
    )?;
    Ok(())
}

fn insert_sql(table: &str, schema: &Schema) -> StoreResult<String> {
    let columns: Vec<String> = schema
        .columns()
        .iter()
        .map(|c| quote_ident(c))
        .collect::<StoreResult<_>>()?;
    let placeholders: Vec<String> = (1..=schema.len() + 1).map(|i| format!("?{i}")).collect();
    Ok(format!(
        "INSERT INTO {table} (row_idx, {}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    ))
}
