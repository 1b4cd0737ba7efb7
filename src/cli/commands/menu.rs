//! Interactive menu command.

use super::open_storage;
use crate::cli::menu::{Console, Menu};
use crate::error::Result;
use std::io::{self, IsTerminal};
use std::path::Path;
use tracing::info;

/// Run the interactive menu on stdin/stdout.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or the menu stops on
/// a failure.
pub fn execute(db_path: Option<&Path>) -> Result<()> {
    let storage = open_storage(db_path)?;
    info!(db = %storage.path().display(), "starting menu");

    let terminal = io::stdin().is_terminal() && io::stdout().is_terminal();
    let console = Console::new(io::stdin().lock(), io::stdout()).with_terminal(terminal);
    Menu::new(&storage, console).run()
}
