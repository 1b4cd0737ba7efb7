//! Configuration management.
//!
//! debtlist has no configuration file. The only setting is the database
//! location, taken from `--db` / `DEBTLIST_DB` or the platform data
//! directory.

use crate::error::{Error, Result};

use std::path::{Path, PathBuf};

/// File name of the database inside the data directory.
pub const DB_FILE_NAME: &str = "lists_data.db";

/// Get the platform data directory for debtlist.
///
/// `~/.local/share/debtlist` on Linux, the equivalents elsewhere.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "debtlist").map(|dirs| dirs.data_dir().to_path_buf())
}

/// Resolve the database path.
///
/// Priority:
/// 1. `explicit_path` (from `--db` or the `DEBTLIST_DB` environment variable)
/// 2. `<data dir>/lists_data.db`
///
/// # Returns
///
/// Returns the path to the database file, or `None` if no location found.
#[must_use]
pub fn resolve_db_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    data_dir().map(|dir| dir.join(DB_FILE_NAME))
}

/// Create the directory that will hold the database file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Resolve the database path and make sure its directory exists.
///
/// # Errors
///
/// Returns [`Error::Config`] when no location can be determined, or an I/O
/// error if the directory cannot be created.
pub fn prepare_db_path(explicit_path: Option<&Path>) -> Result<PathBuf> {
    let path = resolve_db_path(explicit_path).ok_or_else(|| {
        Error::Config("Could not determine a data directory for the database".to_string())
    })?;
    ensure_parent_dir(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_db_path_with_explicit() {
        let explicit = PathBuf::from("/custom/path/db.sqlite");
        let result = resolve_db_path(Some(&explicit));
        assert_eq!(result, Some(explicit));
    }

    #[test]
    fn test_resolve_db_path_default_file_name() {
        if let Some(path) = resolve_db_path(None) {
            assert!(path.ends_with(DB_FILE_NAME));
            assert!(path.to_string_lossy().contains("debtlist"));
        }
    }

    #[test]
    fn test_prepare_db_path_creates_parent() {
        let temp = TempDir::new().unwrap();
        let db = temp.path().join("nested").join("deeper").join("data.db");

        let resolved = prepare_db_path(Some(&db)).unwrap();
        assert_eq!(resolved, db);
        assert!(temp.path().join("nested").join("deeper").is_dir());
        assert!(!db.exists());
    }

    #[test]
    fn test_ensure_parent_dir_bare_file_name() {
        // A relative name with no directory component needs nothing created.
        assert!(ensure_parent_dir(Path::new("lists_data.db")).is_ok());
    }
}
