//! Database schema definitions.
//!
//! Two tables: `lists` and `people`. Everything is created with
//! `IF NOT EXISTS`, so applying the schema is idempotent.

use rusqlite::{Connection, Result};

/// The complete SQL schema for the debtlist database.
///
/// `people.list_id` declares a foreign key but enforcement stays off
/// (SQLite's default); deleting a list removes its people explicitly.
pub const SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS lists (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT UNIQUE NOT NULL
);

CREATE TABLE IF NOT EXISTS people (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    list_id INTEGER NOT NULL,
    name TEXT NOT NULL,
    surname TEXT NOT NULL,
    debt TEXT NOT NULL,
    FOREIGN KEY (list_id) REFERENCES lists (id)
);

CREATE INDEX IF NOT EXISTS idx_people_list ON people(list_id);
";

/// Apply the schema to the database.
///
/// # Errors
///
/// Returns an error if the SQL execution fails or pragmas cannot be set.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_apply_schema() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).expect("Failed to apply schema");

        let tables = table_names(&conn);
        assert!(tables.contains(&"lists".to_string()));
        assert!(tables.contains(&"people".to_string()));
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).expect("First apply failed");
        apply_schema(&conn).expect("Second apply failed");
    }

    #[test]
    fn test_list_name_unique_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        conn.execute("INSERT INTO lists (name) VALUES ('A')", []).unwrap();
        let result = conn.execute("INSERT INTO lists (name) VALUES ('A')", []);
        assert!(result.is_err());
    }

    #[test]
    fn test_foreign_keys_not_enforced() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO people (list_id, name, surname, debt) VALUES (42, 'X', 'Y', '5')",
            [],
        );
        assert!(result.is_ok());
    }
}
