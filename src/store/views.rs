//! Named-view registry.
//!
//! A view is a name plus an ordered subset of schema columns. Column lists
//! are stored as a JSON array string so any column name round-trips, and
//! names are unique: saving an existing name replaces its column list.

use chrono::Utc;
use rusqlite::OptionalExtension;

use crate::error::{ViewError, ViewResult};
use crate::models::View;
use crate::store::{schema_on, Store, VIEW_TABLE};

impl Store {
    /// Persist a view, replacing any existing view of the same name.
    ///
    /// The name must be non-empty and every column must exist in the
    /// current schema.
    pub fn save_view(&self, name: &str, columns: &[String]) -> ViewResult<()> {
        if name.trim().is_empty() {
            return Err(ViewError::EmptyName);
        }
        if columns.is_empty() {
            return Err(ViewError::EmptyColumns);
        }

        let conn = self.connect()?;
        let schema = schema_on(&conn)?;
        for column in columns {
            if !schema.contains(column) {
                return Err(ViewError::UnknownColumn(column.clone()));
            }
        }

        let encoded = serde_json::to_string(columns)?;
        conn.execute(
            &format!(
                "INSERT INTO {VIEW_TABLE} (name, columns, created_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(name) DO UPDATE SET columns = excluded.columns"
            ),
            rusqlite::params![name, encoded, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// All views, ordered by name. Names are unique, so this is the full
    /// name-to-columns mapping.
    pub fn views(&self) -> ViewResult<Vec<View>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT name, columns, created_at FROM {VIEW_TABLE} ORDER BY name"
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut views = Vec::new();
        for row in rows {
            let (name, encoded, created_at) = row?;
            let columns = decode_columns(&name, &encoded)?;
            views.push(View {
                name,
                columns,
                created_at,
            });
        }
        Ok(views)
    }

    /// Just the view names, ordered.
    pub fn view_names(&self) -> ViewResult<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt =
            conn.prepare(&format!("SELECT name FROM {VIEW_TABLE} ORDER BY name"))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    /// The ordered column list of one view, by exact name.
    pub fn view_columns(&self, name: &str) -> ViewResult<Vec<String>> {
        let conn = self.connect()?;
        let encoded: Option<String> = conn
            .query_row(
                &format!("SELECT columns FROM {VIEW_TABLE} WHERE name = ?1"),
                [name],
                |row| row.get(0),
            )
            .optional()?;

        match encoded {
            Some(encoded) => decode_columns(name, &encoded),
            None => Err(ViewError::NotFound(name.to_string())),
        }
    }
}

fn decode_columns(name: &str, encoded: &str) -> ViewResult<Vec<String>> {
    serde_json::from_str(encoded).map_err(|source| ViewError::Decode {
        name: name.to_string(),
        source,
    })
}
