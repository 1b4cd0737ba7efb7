//! Command implementations.

pub mod completions;
pub mod init;
pub mod list;
pub mod menu;
pub mod person;
pub mod version;

use crate::config::prepare_db_path;
use crate::error::{Error, Result};
use crate::model::List;
use crate::storage::SqliteStorage;
use std::path::Path;

/// Resolve the database location and open it, creating tables on first use.
pub(crate) fn open_storage(db_path: Option<&Path>) -> Result<SqliteStorage> {
    let path = prepare_db_path(db_path)?;
    SqliteStorage::open(&path)
}

/// Find a list by ID first, then by exact name.
pub(crate) fn resolve_list(storage: &SqliteStorage, key: &str) -> Result<List> {
    let by_id = match key.parse::<i64>() {
        Ok(id) => storage.get_list(id)?,
        Err(_) => None,
    };

    match by_id {
        Some(list) => Ok(list),
        None => storage
            .find_list_by_name(key)?
            .ok_or_else(|| Error::ListNotFound { id: key.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_list_by_id_then_name() {
        let temp = TempDir::new().unwrap();
        let storage = open_storage(Some(&temp.path().join("db.sqlite"))).unwrap();
        let work = storage.create_list("Work").unwrap().created().unwrap();
        // A list whose name looks like another list's id.
        let numeric = storage.create_list("1").unwrap().created().unwrap();

        assert_eq!(resolve_list(&storage, "Work").unwrap(), work);
        assert_eq!(resolve_list(&storage, &work.id.to_string()).unwrap(), work);
        assert_eq!(resolve_list(&storage, &numeric.id.to_string()).unwrap(), numeric);
        assert!(matches!(
            resolve_list(&storage, "Nope"),
            Err(Error::ListNotFound { .. })
        ));
    }
}
