//! List management commands.
//!
//! - `debtlist list create <name>` - Create a new list
//! - `debtlist list ls` - Show all lists
//! - `debtlist list delete <id-or-name>` - Delete a list and its people

use super::{open_storage, resolve_list};
use crate::cli::table::csv_escape;
use crate::cli::{ListCommands, OutputFormat};
use crate::error::{Error, Result};
use crate::model::{CreateListOutcome, List};
use crate::storage::SqliteStorage;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct ListOutput {
    id: i64,
    name: String,
    people: usize,
}

#[derive(Serialize)]
struct ListsOutput {
    lists: Vec<ListOutput>,
    count: usize,
}

/// Execute a list command.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the operation fails.
pub fn execute(command: &ListCommands, db_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let storage = open_storage(db_path)?;

    match command {
        ListCommands::Create { name } => execute_create(&storage, name, format),
        ListCommands::Ls => execute_ls(&storage, format),
        ListCommands::Delete { list } => execute_delete(&storage, list, format),
    }
}

fn execute_create(storage: &SqliteStorage, name: &str, format: OutputFormat) -> Result<()> {
    let list = match storage.create_list(name)? {
        CreateListOutcome::Created(list) => list,
        CreateListOutcome::DuplicateName => {
            return Err(Error::DuplicateListName {
                name: name.to_string(),
            });
        }
    };

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&list)?);
    } else {
        println!("Created list: {}", list.name);
        println!("  ID: {}", list.id);
    }

    Ok(())
}

fn execute_ls(storage: &SqliteStorage, format: OutputFormat) -> Result<()> {
    let lists = storage
        .list_all_lists()?
        .into_iter()
        .map(|list| with_count(storage, list))
        .collect::<Result<Vec<_>>>()?;

    match format {
        OutputFormat::Json => {
            let output = ListsOutput {
                count: lists.len(),
                lists,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            println!("id,name,people");
            for list in &lists {
                println!("{},{},{}", list.id, csv_escape(&list.name), list.people);
            }
        }
        OutputFormat::Table if lists.is_empty() => {
            println!("No lists found.");
            println!("\nCreate one with: debtlist list create <name>");
        }
        OutputFormat::Table => {
            println!("Lists ({}):\n", lists.len());
            for list in &lists {
                println!("  {:>4}  {} ({} people)", list.id, list.name, list.people);
            }
        }
    }

    Ok(())
}

fn execute_delete(storage: &SqliteStorage, key: &str, format: OutputFormat) -> Result<()> {
    let list = resolve_list(storage, key)?;
    let outcome = storage.delete_list(list.id)?;

    if format == OutputFormat::Json {
        let output = serde_json::json!({
            "deleted": outcome.list_removed,
            "id": list.id,
            "name": list.name,
            "people_deleted": outcome.people_removed,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Deleted list: {} ({})", list.name, list.id);
        if outcome.people_removed > 0 {
            println!("  Deleted {} people", outcome.people_removed);
        }
    }

    Ok(())
}

fn with_count(storage: &SqliteStorage, list: List) -> Result<ListOutput> {
    let people = storage.list_people(list.id)?.len();
    Ok(ListOutput {
        id: list.id,
        name: list.name,
        people,
    })
}
