//! SQLite storage implementation.
//!
//! Every operation opens its own connection, runs inside a transaction when
//! it writes, commits, and closes the connection when it returns. Nothing
//! here prints; callers render the returned values and outcomes.

use crate::error::{Error, Result};
use crate::model::{CreateListOutcome, DeleteListOutcome, List, Person, PersonPatch};
use crate::storage::schema::apply_schema;
use rusqlite::{Connection, OptionalExtension, Transaction};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Default time to wait on a locked database file.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-based storage backend.
///
/// Holds only the database location; connections are scoped to a single
/// operation.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    path: PathBuf,
}

impl SqliteStorage {
    /// Open the database at the given path, creating tables if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the schema fails.
    pub fn open(path: &Path) -> Result<Self> {
        let storage = Self {
            path: path.to_path_buf(),
        };
        storage.initialize()?;
        Ok(storage)
    }

    /// Location of the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// Execute a write inside an IMMEDIATE transaction.
    ///
    /// The connection lives only for this call. The transaction commits if
    /// the closure succeeds and rolls back when it is dropped on error.
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails.
    fn mutate<F, R>(&self, op: &str, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction) -> Result<R>,
    {
        let mut conn = self.connect()?;
        let tx = conn.transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;

        debug!(op, "begin");
        let result = f(&tx)?;
        tx.commit()?;
        debug!(op, "commit");

        Ok(result)
    }

    /// Ensure both tables exist. Safe to call any number of times.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or DDL fails.
    pub fn initialize(&self) -> Result<()> {
        let conn = self.connect()?;
        apply_schema(&conn)?;
        debug!(path = %self.path.display(), "schema ready");
        Ok(())
    }

    // ===============
    // List Operations
    // ===============

    /// All lists, in ID order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_all_lists(&self) -> Result<Vec<List>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, name FROM lists ORDER BY id")?;
        let lists = stmt
            .query_map([], map_list_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(lists)
    }

    /// Get a list by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_list(&self, id: i64) -> Result<Option<List>> {
        let conn = self.connect()?;
        let list = conn
            .query_row("SELECT id, name FROM lists WHERE id = ?1", [id], map_list_row)
            .optional()?;
        Ok(list)
    }

    /// Get a list by its exact name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_list_by_name(&self, name: &str) -> Result<Option<List>> {
        let conn = self.connect()?;
        let list = conn
            .query_row(
                "SELECT id, name FROM lists WHERE name = ?1",
                [name],
                map_list_row,
            )
            .optional()?;
        Ok(list)
    }

    /// Create a new list.
    ///
    /// A name that already exists yields [`CreateListOutcome::DuplicateName`]
    /// and leaves the table unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than the uniqueness violation.
    pub fn create_list(&self, name: &str) -> Result<CreateListOutcome> {
        let outcome = self.mutate("create_list", |tx| {
            match tx.execute("INSERT INTO lists (name) VALUES (?1)", [name]) {
                Ok(_) => Ok(CreateListOutcome::Created(List::new(
                    tx.last_insert_rowid(),
                    name,
                ))),
                Err(e) if is_unique_violation(&e) => Ok(CreateListOutcome::DuplicateName),
                Err(e) => Err(Error::Database(e)),
            }
        })?;

        match &outcome {
            CreateListOutcome::Created(list) => info!(id = list.id, name, "list created"),
            CreateListOutcome::DuplicateName => info!(name, "list name already taken"),
        }
        Ok(outcome)
    }

    /// Delete a list together with all of its people.
    ///
    /// Unknown IDs are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if either delete fails.
    pub fn delete_list(&self, id: i64) -> Result<DeleteListOutcome> {
        let outcome = self.mutate("delete_list", |tx| {
            let people_removed = tx.execute("DELETE FROM people WHERE list_id = ?1", [id])?;
            let lists_removed = tx.execute("DELETE FROM lists WHERE id = ?1", [id])?;
            Ok(DeleteListOutcome {
                people_removed,
                list_removed: lists_removed > 0,
            })
        })?;

        info!(
            id,
            people_removed = outcome.people_removed,
            list_removed = outcome.list_removed,
            "list deleted"
        );
        Ok(outcome)
    }

    // =================
    // Person Operations
    // =================

    /// People in a list, in ID order. Empty if the list has none or does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_people(&self, list_id: i64) -> Result<Vec<Person>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, list_id, name, surname, debt FROM people
             WHERE list_id = ?1 ORDER BY id",
        )?;
        let people = stmt
            .query_map([list_id], map_person_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(people)
    }

    /// Get a person by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_person(&self, id: i64) -> Result<Option<Person>> {
        let conn = self.connect()?;
        let person = conn
            .query_row(
                "SELECT id, list_id, name, surname, debt FROM people WHERE id = ?1",
                [id],
                map_person_row,
            )
            .optional()?;
        Ok(person)
    }

    /// Add a person to a list, storing the fields verbatim.
    ///
    /// The list ID is not checked.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_person(
        &self,
        list_id: i64,
        name: &str,
        surname: &str,
        debt: &str,
    ) -> Result<Person> {
        let id = self.mutate("add_person", |tx| {
            tx.execute(
                "INSERT INTO people (list_id, name, surname, debt) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![list_id, name, surname, debt],
            )?;
            Ok(tx.last_insert_rowid())
        })?;

        info!(id, list_id, "person added");
        Ok(Person {
            id,
            list_id,
            name: name.to_string(),
            surname: surname.to_string(),
            debt: debt.to_string(),
        })
    }

    /// Delete a person by ID. Returns `false` if nobody had that ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_person(&self, id: i64) -> Result<bool> {
        let removed = self.mutate("delete_person", |tx| {
            Ok(tx.execute("DELETE FROM people WHERE id = ?1", [id])? > 0)
        })?;

        info!(id, removed, "person delete");
        Ok(removed)
    }

    /// Apply each non-empty field of the patch with its own UPDATE.
    ///
    /// Returns the number of fields written. An empty patch, or an unknown
    /// ID, succeeds without changing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if an update fails.
    pub fn edit_person(&self, id: i64, patch: &PersonPatch) -> Result<usize> {
        let applied = self.mutate("edit_person", |tx| {
            let mut applied = 0;
            for (column, value) in patch.fields() {
                // Column names come from PersonPatch::fields, never from input.
                let sql = format!("UPDATE people SET {column} = ?1 WHERE id = ?2");
                tx.execute(&sql, rusqlite::params![value, id])?;
                applied += 1;
            }
            Ok(applied)
        })?;

        info!(id, fields = applied, "person edited");
        Ok(applied)
    }
}

/// True for a UNIQUE constraint violation.
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn map_list_row(row: &rusqlite::Row) -> rusqlite::Result<List> {
    Ok(List {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn map_person_row(row: &rusqlite::Row) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get(0)?,
        list_id: row.get(1)?,
        name: row.get(2)?,
        surname: row.get(3)?,
        debt: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_storage() -> (TempDir, SqliteStorage) {
        let dir = TempDir::new().unwrap();
        let storage = SqliteStorage::open(&dir.path().join("lists_data.db")).unwrap();
        (dir, storage)
    }

    fn created(outcome: CreateListOutcome) -> List {
        outcome.created().expect("list should have been created")
    }

    #[test]
    fn test_open_creates_file() {
        let (dir, storage) = temp_storage();
        assert!(dir.path().join("lists_data.db").exists());
        assert!(storage.list_all_lists().unwrap().is_empty());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let (_dir, storage) = temp_storage();
        let list = created(storage.create_list("Keep").unwrap());

        storage.initialize().unwrap();
        storage.initialize().unwrap();

        assert_eq!(storage.list_all_lists().unwrap(), vec![list]);
    }

    #[test]
    fn test_duplicate_list_name() {
        let (_dir, storage) = temp_storage();
        let first = created(storage.create_list("Friends").unwrap());

        let outcome = storage.create_list("Friends").unwrap();
        assert_eq!(outcome, CreateListOutcome::DuplicateName);

        let lists = storage.list_all_lists().unwrap();
        assert_eq!(lists, vec![first]);
    }

    #[test]
    fn test_list_lookup_by_id_and_name() {
        let (_dir, storage) = temp_storage();
        let list = created(storage.create_list("Work").unwrap());

        assert_eq!(storage.get_list(list.id).unwrap(), Some(list.clone()));
        assert_eq!(storage.find_list_by_name("Work").unwrap(), Some(list));
        assert_eq!(storage.find_list_by_name("work").unwrap(), None);
        assert_eq!(storage.get_list(999).unwrap(), None);
    }

    #[test]
    fn test_delete_list_cascades_to_people() {
        let (_dir, storage) = temp_storage();
        let doomed = created(storage.create_list("Doomed").unwrap());
        let kept = created(storage.create_list("Kept").unwrap());
        storage.add_person(doomed.id, "A", "One", "1").unwrap();
        storage.add_person(doomed.id, "B", "Two", "2").unwrap();
        storage.add_person(kept.id, "C", "Three", "3").unwrap();

        let outcome = storage.delete_list(doomed.id).unwrap();
        assert_eq!(
            outcome,
            DeleteListOutcome {
                people_removed: 2,
                list_removed: true
            }
        );

        assert!(storage.list_people(doomed.id).unwrap().is_empty());
        assert_eq!(storage.list_all_lists().unwrap(), vec![kept.clone()]);
        assert_eq!(storage.list_people(kept.id).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_unknown_list_is_noop() {
        let (_dir, storage) = temp_storage();
        let list = created(storage.create_list("Stays").unwrap());

        let outcome = storage.delete_list(list.id + 100).unwrap();
        assert_eq!(outcome, DeleteListOutcome::default());
        assert_eq!(storage.list_all_lists().unwrap().len(), 1);
    }

    #[test]
    fn test_add_person_then_list() {
        let (_dir, storage) = temp_storage();
        let list = created(storage.create_list("Test").unwrap());

        let added = storage.add_person(list.id, "Ivan", "Petrov", "100").unwrap();
        let people = storage.list_people(list.id).unwrap();

        assert_eq!(people.len(), 1);
        assert_eq!(people[0], added);
        assert_eq!(people[0].name, "Ivan");
        assert_eq!(people[0].surname, "Petrov");
        assert_eq!(people[0].debt, "100");
    }

    #[test]
    fn test_debt_is_free_text() {
        let (_dir, storage) = temp_storage();
        let list = created(storage.create_list("Loose").unwrap());

        storage.add_person(list.id, "", "", "a beer or two").unwrap();
        let people = storage.list_people(list.id).unwrap();
        assert_eq!(people[0].debt, "a beer or two");
        assert_eq!(people[0].name, "");
    }

    #[test]
    fn test_add_person_to_unknown_list_is_accepted() {
        let (_dir, storage) = temp_storage();
        let person = storage.add_person(77, "Ghost", "Row", "0").unwrap();
        assert_eq!(storage.list_people(77).unwrap(), vec![person]);
    }

    #[test]
    fn test_edit_only_debt() {
        let (_dir, storage) = temp_storage();
        let list = created(storage.create_list("Edit").unwrap());
        let person = storage.add_person(list.id, "Ivan", "Petrov", "100").unwrap();

        let patch = PersonPatch::from_inputs("", "", "250");
        assert_eq!(storage.edit_person(person.id, &patch).unwrap(), 1);

        let after = storage.get_person(person.id).unwrap().unwrap();
        assert_eq!(after.name, "Ivan");
        assert_eq!(after.surname, "Petrov");
        assert_eq!(after.debt, "250");
    }

    #[test]
    fn test_edit_with_nothing_changes_nothing() {
        let (_dir, storage) = temp_storage();
        let list = created(storage.create_list("Edit").unwrap());
        let person = storage.add_person(list.id, "Ivan", "Petrov", "100").unwrap();

        let applied = storage
            .edit_person(person.id, &PersonPatch::from_inputs("", "", ""))
            .unwrap();
        assert_eq!(applied, 0);
        assert_eq!(storage.get_person(person.id).unwrap(), Some(person));
    }

    #[test]
    fn test_edit_all_fields() {
        let (_dir, storage) = temp_storage();
        let list = created(storage.create_list("Edit").unwrap());
        let person = storage.add_person(list.id, "Ivan", "Petrov", "100").unwrap();

        let patch = PersonPatch::from_inputs("Olga", "Sidorova", "0");
        assert_eq!(storage.edit_person(person.id, &patch).unwrap(), 3);

        let after = storage.get_person(person.id).unwrap().unwrap();
        assert_eq!(after.full_name(), "Olga Sidorova");
        assert_eq!(after.debt, "0");
    }

    #[test]
    fn test_delete_unknown_person_is_noop() {
        let (_dir, storage) = temp_storage();
        let list = created(storage.create_list("Stable").unwrap());
        let person = storage.add_person(list.id, "X", "Y", "5").unwrap();

        assert!(!storage.delete_person(person.id + 1).unwrap());
        assert_eq!(storage.list_people(list.id).unwrap(), vec![person.clone()]);

        assert!(storage.delete_person(person.id).unwrap());
        assert!(storage.list_people(list.id).unwrap().is_empty());
    }

    #[test]
    fn test_ids_are_not_renumbered() {
        let (_dir, storage) = temp_storage();
        let list = created(storage.create_list("Gaps").unwrap());
        let first = storage.add_person(list.id, "A", "A", "1").unwrap();
        let second = storage.add_person(list.id, "B", "B", "2").unwrap();

        storage.delete_person(first.id).unwrap();
        let people = storage.list_people(list.id).unwrap();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0].id, second.id);
        assert_ne!(people[0].id, 1);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let (_dir, storage) = temp_storage();

        let a = created(storage.create_list("A").unwrap());
        assert_eq!(
            storage.create_list("A").unwrap(),
            CreateListOutcome::DuplicateName
        );
        let lists = storage.list_all_lists().unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].name, "A");

        storage.add_person(a.id, "X", "Y", "5").unwrap();
        let people = storage.list_people(a.id).unwrap();
        assert_eq!(people.len(), 1);
        assert_eq!(
            (people[0].name.as_str(), people[0].surname.as_str(), people[0].debt.as_str()),
            ("X", "Y", "5")
        );

        storage.delete_list(a.id).unwrap();
        assert!(storage.list_people(a.id).unwrap().is_empty());
        assert!(storage.list_all_lists().unwrap().is_empty());
    }

    #[test]
    fn test_data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lists_data.db");

        let list = created(SqliteStorage::open(&path).unwrap().create_list("Durable").unwrap());

        let reopened = SqliteStorage::open(&path).unwrap();
        assert_eq!(reopened.list_all_lists().unwrap(), vec![list]);
    }
}
