//! Version command: package version and where the data lives.

use crate::config::resolve_db_path;
use crate::error::{Error, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct VersionReport {
    version: &'static str,
    database: PathBuf,
    database_exists: bool,
}

impl VersionReport {
    /// Nothing is created here; a missing database stays missing.
    fn gather(db_path: Option<&Path>) -> Result<Self> {
        let database = resolve_db_path(db_path).ok_or_else(|| {
            Error::Config("Could not determine a data directory for the database".to_string())
        })?;
        Ok(Self {
            version: env!("CARGO_PKG_VERSION"),
            database_exists: database.is_file(),
            database,
        })
    }

    fn line(&self) -> String {
        let state = if self.database_exists { "" } else { " (not created yet)" };
        format!(
            "debtlist {}\ndatabase: {}{state}",
            self.version,
            self.database.display()
        )
    }
}

/// Print the version and the resolved database path.
///
/// # Errors
///
/// Returns an error if no database location can be resolved or JSON
/// serialization fails.
pub fn execute(db_path: Option<&Path>, json: bool) -> Result<()> {
    let report = VersionReport::gather(db_path)?;

    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", report.line());
    }
    Ok(())
}
