//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for list/query commands.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table (default)
    #[default]
    Table,
    /// JSON (same as --json)
    Json,
    /// Comma-separated values
    Csv,
}

pub mod commands;
pub mod menu;
pub mod table;

/// debtlist - keep named lists of people and what they owe
#[derive(Parser, Debug)]
#[command(name = "debtlist", author, version, about, long_about = None)]
pub struct Cli {
    /// Command to run (default: interactive menu)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Database path (default: <data dir>/debtlist/lists_data.db)
    #[arg(long, global = true, env = "DEBTLIST_DB")]
    pub db: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format (table, json, csv)
    #[arg(long, value_enum, global = true, default_value_t)]
    pub format: OutputFormat,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no logging, errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl Cli {
    /// Effective output format: `--json` wins over `--format`.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive menu (the default)
    Menu,

    /// Create the database and print its location
    Init,

    /// Print version information
    Version,

    /// List management
    List {
        #[command(subcommand)]
        command: ListCommands,
    },

    /// People within a list
    Person {
        #[command(subcommand)]
        command: PersonCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ============================================================================
// List Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum ListCommands {
    /// Create a new list
    Create {
        /// Unique list name
        name: String,
    },

    /// Show all lists
    #[command(alias = "list")]
    Ls,

    /// Delete a list and everyone in it
    Delete {
        /// List ID or name
        list: String,
    },
}

// ============================================================================
// Person Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum PersonCommands {
    /// Add a person to a list
    Add(PersonAddArgs),

    /// Show the people in a list
    #[command(alias = "list")]
    Ls {
        /// List ID or name
        list: String,
    },

    /// Change a person's name, surname or debt
    Edit(PersonEditArgs),

    /// Delete a person by ID
    Delete {
        /// Person ID
        id: i64,
    },
}

#[derive(Args, Debug)]
pub struct PersonAddArgs {
    /// List ID or name
    pub list: String,

    /// First name
    pub name: String,

    /// Surname
    pub surname: String,

    /// Amount owed (free text)
    pub debt: String,
}

#[derive(Args, Debug)]
pub struct PersonEditArgs {
    /// Person ID
    pub id: i64,

    /// New first name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New surname
    #[arg(short, long)]
    pub surname: Option<String>,

    /// New debt
    #[arg(short, long)]
    pub debt: Option<String>,
}
