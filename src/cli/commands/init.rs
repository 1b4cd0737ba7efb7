//! Create the debtlist database.
//!
//! Every command initializes the schema on open, so this is only needed to
//! create the file up front or to find out where it lives. Running it again
//! is harmless.

use crate::config::prepare_db_path;
use crate::error::Result;
use crate::storage::SqliteStorage;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct InitOutput {
    database: PathBuf,
    created: bool,
    lists: usize,
}

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if the directory or database cannot be created.
pub fn execute(db_path: Option<&Path>, json: bool) -> Result<()> {
    let output = initialize(db_path)?;

    if json {
        let payload = serde_json::to_string(&output)?;
        println!("{payload}");
    } else if output.created {
        println!("Initialized debtlist database");
        println!("  Database: {}", output.database.display());
        println!();
        println!("Next: run 'debtlist' to open the menu.");
    } else {
        println!("Database already initialized");
        println!("  Database: {}", output.database.display());
        println!("  Lists:    {}", output.lists);
    }

    Ok(())
}

fn initialize(db_path: Option<&Path>) -> Result<InitOutput> {
    let database = prepare_db_path(db_path)?;
    let created = !database.exists();

    let storage = SqliteStorage::open(&database)?;
    let lists = storage.list_all_lists()?.len();

    Ok(InitOutput {
        database,
        created,
        lists,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_database() {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("data").join("lists_data.db");

        let output = initialize(Some(&db)).unwrap();

        assert!(output.created);
        assert_eq!(output.lists, 0);
        assert!(db.exists());
    }

    #[test]
    fn test_init_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("lists_data.db");

        assert!(initialize(Some(&db)).unwrap().created);
        SqliteStorage::open(&db).unwrap().create_list("Kept").unwrap();

        let again = initialize(Some(&db)).unwrap();
        assert!(!again.created);
        assert_eq!(again.lists, 1);
    }
}
