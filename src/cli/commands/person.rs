//! Person commands.
//!
//! Unlike the interactive menu, these address people by their stored ID.
//!
//! - `debtlist person add <list> <name> <surname> <debt>`
//! - `debtlist person ls <list>`
//! - `debtlist person edit <id> [--name] [--surname] [--debt]`
//! - `debtlist person delete <id>`

use super::{open_storage, resolve_list};
use crate::cli::table::{csv_escape, render_people};
use crate::cli::{OutputFormat, PersonAddArgs, PersonCommands, PersonEditArgs};
use crate::error::Result;
use crate::model::{Person, PersonPatch};
use crate::storage::SqliteStorage;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct PeopleOutput<'a> {
    list_id: i64,
    list_name: &'a str,
    people: &'a [Person],
    count: usize,
}

/// Execute a person command.
///
/// # Errors
///
/// Returns an error if the database cannot be opened, a list reference does
/// not resolve, or the operation fails.
pub fn execute(
    command: &PersonCommands,
    db_path: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let storage = open_storage(db_path)?;

    match command {
        PersonCommands::Add(args) => execute_add(&storage, args, format),
        PersonCommands::Ls { list } => execute_ls(&storage, list, format),
        PersonCommands::Edit(args) => execute_edit(&storage, args, format),
        PersonCommands::Delete { id } => execute_delete(&storage, *id, format),
    }
}

fn execute_add(storage: &SqliteStorage, args: &PersonAddArgs, format: OutputFormat) -> Result<()> {
    let list = resolve_list(storage, &args.list)?;
    let person = storage.add_person(list.id, &args.name, &args.surname, &args.debt)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&person)?);
    } else {
        println!("Added {} to {}", person.full_name(), list.name);
        println!("  ID:   {}", person.id);
        println!("  Debt: {}", person.debt);
    }

    Ok(())
}

fn execute_ls(storage: &SqliteStorage, key: &str, format: OutputFormat) -> Result<()> {
    let list = resolve_list(storage, key)?;
    let people = storage.list_people(list.id)?;

    match format {
        OutputFormat::Json => {
            let output = PeopleOutput {
                list_id: list.id,
                list_name: &list.name,
                people: &people,
                count: people.len(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            println!("id,name,surname,debt");
            for p in &people {
                println!(
                    "{},{},{},{}",
                    p.id,
                    csv_escape(&p.name),
                    csv_escape(&p.surname),
                    csv_escape(&p.debt)
                );
            }
        }
        OutputFormat::Table if people.is_empty() => {
            println!("The list '{}' is empty.", list.name);
        }
        OutputFormat::Table => {
            println!("{}", render_people(&people).trim_end());
            let ids: Vec<String> = people.iter().map(|p| p.id.to_string()).collect();
            println!("IDs in row order: {}", ids.join(", "));
        }
    }

    Ok(())
}

fn execute_edit(storage: &SqliteStorage, args: &PersonEditArgs, format: OutputFormat) -> Result<()> {
    let patch = PersonPatch {
        name: args.name.clone(),
        surname: args.surname.clone(),
        debt: args.debt.clone(),
    };
    let applied = storage.edit_person(args.id, &patch)?;
    let person = storage.get_person(args.id)?;

    if format == OutputFormat::Json {
        let output = serde_json::json!({
            "id": args.id,
            "fields_updated": applied,
            "person": person,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match person {
            Some(p) => {
                println!("Changes saved ({applied} fields)");
                println!("  {} | debt: {}", p.full_name(), p.debt);
            }
            None => println!("No person with ID {}; nothing changed", args.id),
        }
    }

    Ok(())
}

fn execute_delete(storage: &SqliteStorage, id: i64, format: OutputFormat) -> Result<()> {
    let removed = storage.delete_person(id)?;

    if format == OutputFormat::Json {
        let output = serde_json::json!({ "deleted": removed, "id": id });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if removed {
        println!("Deleted person {id}");
    } else {
        println!("No person with ID {id}; nothing deleted");
    }

    Ok(())
}
