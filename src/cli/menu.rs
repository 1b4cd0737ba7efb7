//! Interactive two-level menu.
//!
//! The loop is a small state machine over [`Screen`]: the main menu, the
//! management menu of one list, and exit. Choosing a list or a person is an
//! ephemeral step shared by the flows that need it. Every message shown
//! here is rendered from values returned by [`SqliteStorage`].
//!
//! Input and output are generic so tests can drive the loop with in-memory
//! buffers. Confirmations use `dialoguer` only when attached to a terminal.

use crate::cli::table::render_people;
use crate::error::{Error, Result};
use crate::model::{CreateListOutcome, List, Person, PersonPatch};
use crate::storage::SqliteStorage;
use colored::Colorize;
use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::num::IntErrorKind;
use tracing::debug;

/// Line-oriented terminal I/O.
pub struct Console<R, W> {
    input: R,
    output: W,
    terminal: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// A console reading plain lines, for piped or in-memory input.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            terminal: false,
        }
    }

    /// Use interactive terminal widgets for yes/no questions.
    #[must_use]
    pub fn with_terminal(mut self, terminal: bool) -> Self {
        self.terminal = terminal;
        self
    }

    /// Print one line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Print a prompt and read one line without its line ending.
    ///
    /// Returns `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn ask(&mut self, prompt: impl Display) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Ask a yes/no question defaulting to no.
    ///
    /// Returns `None` at end of input. On a terminal, escaping the prompt
    /// counts as no.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub fn confirm(&mut self, question: &str) -> Result<Option<bool>> {
        if self.terminal {
            self.output.flush()?;
            let answer = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(question)
                .default(false)
                .interact_opt()
                .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))?;
            return Ok(Some(answer.unwrap_or(false)));
        }

        let prompt = format!("{question} [y/N]: ");
        Ok(self
            .ask(prompt.yellow())?
            .map(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")))
    }

    /// Give back the output sink.
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Where the loop is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    ListManagement(List),
    Exit,
}

/// Result of a selection step.
enum Pick<T> {
    Chosen(T),
    /// Nothing chosen; the reason has already been shown.
    Retry,
    /// Input ended.
    Closed,
}

/// Read the next line or leave the loop when input ends.
macro_rules! ask_or_exit {
    ($console:expr, $prompt:expr) => {
        match $console.ask($prompt)? {
            Some(answer) => answer,
            None => return Ok(Screen::Exit),
        }
    };
}

/// The interactive menu bound to one store.
pub struct Menu<'a, R, W> {
    storage: &'a SqliteStorage,
    console: Console<R, W>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(storage: &'a SqliteStorage, console: Console<R, W>) -> Self {
        Self { storage, console }
    }

    /// Run until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Storage failures, I/O failures and a non-numeric person number in
    /// the list menu end the loop with an error.
    pub fn run(&mut self) -> Result<()> {
        let mut screen = Screen::MainMenu;
        loop {
            debug!(?screen, "menu");
            screen = match screen {
                Screen::MainMenu => self.main_menu()?,
                Screen::ListManagement(list) => self.list_menu(list)?,
                Screen::Exit => return Ok(()),
            };
        }
    }

    /// Give back the console, for inspecting output in tests.
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    fn main_menu(&mut self) -> Result<Screen> {
        self.console.say(format!("\n{}", "Main menu:".blue().bold()))?;
        self.console.say(format!("1. {}", "Create a new list".green()))?;
        self.console.say(format!("2. {}", "Open a list".green()))?;
        self.console.say(format!("3. {}", "Delete a list".green()))?;
        self.console.say(format!("4. {}", "Exit".green()))?;

        let choice = ask_or_exit!(self.console, "Choose an action: ".cyan().bold());
        match choice.trim() {
            "1" => {
                let name = ask_or_exit!(self.console, "Name of the new list: ".cyan());
                self.create_list(&name)?;
                Ok(Screen::MainMenu)
            }
            "2" => match self.select_list("List number: ")? {
                Pick::Chosen(list) => {
                    let header = format!("Managing list: {}", list.name);
                    self.console.say(format!("\n{}", header.blue().bold()))?;
                    Ok(Screen::ListManagement(list))
                }
                Pick::Retry => Ok(Screen::MainMenu),
                Pick::Closed => Ok(Screen::Exit),
            },
            "3" => match self.select_list("Number of the list to delete: ")? {
                Pick::Chosen(list) => {
                    self.storage.delete_list(list.id)?;
                    self.console.say("List deleted.".green().bold())?;
                    Ok(Screen::MainMenu)
                }
                Pick::Retry => Ok(Screen::MainMenu),
                Pick::Closed => Ok(Screen::Exit),
            },
            "4" => {
                self.console.say("Exiting.".green().bold())?;
                Ok(Screen::Exit)
            }
            _ => {
                self.invalid_choice()?;
                Ok(Screen::MainMenu)
            }
        }
    }

    fn list_menu(&mut self, list: List) -> Result<Screen> {
        self.console.say(format!("\n1. {}", "Show people".green()))?;
        self.console.say(format!("2. {}", "Add a person".green()))?;
        self.console.say(format!("3. {}", "Edit a person".green()))?;
        self.console.say(format!("4. {}", "Delete a person".green()))?;
        self.console.say(format!("5. {}", "Back to the main menu".green()))?;

        let choice = ask_or_exit!(self.console, "Choose an action: ".cyan().bold());
        match choice.trim() {
            "1" => {
                let people = self.storage.list_people(list.id)?;
                self.show_people(&people)?;
            }
            "2" => {
                let name = ask_or_exit!(self.console, "Name: ".cyan());
                let surname = ask_or_exit!(self.console, "Surname: ".cyan());
                let debt = ask_or_exit!(self.console, "Debt: ".cyan());
                let person = self.storage.add_person(list.id, &name, &surname, &debt)?;
                let message = format!("{} added to the list.", person.full_name());
                self.console.say(message.green().bold())?;
            }
            "3" => match self.select_person(&list, "Number of the person to edit: ")? {
                Pick::Chosen(person) => {
                    let current = format!(
                        "Editing {} (debt: {})",
                        person.full_name(),
                        person.debt
                    );
                    self.console.say(current.blue())?;
                    let name = ask_or_exit!(self.console, "New name (blank to skip): ".cyan());
                    let surname =
                        ask_or_exit!(self.console, "New surname (blank to skip): ".cyan());
                    let debt = ask_or_exit!(self.console, "New debt (blank to skip): ".cyan());

                    let patch = PersonPatch::from_inputs(&name, &surname, &debt);
                    self.storage.edit_person(person.id, &patch)?;
                    self.console.say("Changes saved.".green().bold())?;
                }
                Pick::Retry => {}
                Pick::Closed => return Ok(Screen::Exit),
            },
            "4" => match self.select_person(&list, "Number of the person to delete: ")? {
                Pick::Chosen(person) => {
                    let question = format!("Delete {}?", person.full_name());
                    let Some(confirmed) = self.console.confirm(&question)? else {
                        return Ok(Screen::Exit);
                    };
                    if confirmed {
                        if self.storage.delete_person(person.id)? {
                            self.console.say("Person deleted.".green().bold())?;
                        } else {
                            self.console.say("Nobody was deleted.".yellow().bold())?;
                        }
                    } else {
                        self.console.say("Deletion cancelled.".yellow())?;
                    }
                }
                Pick::Retry => {}
                Pick::Closed => return Ok(Screen::Exit),
            },
            "5" => return Ok(Screen::MainMenu),
            _ => self.invalid_choice()?,
        }

        Ok(Screen::ListManagement(list))
    }

    fn create_list(&mut self, name: &str) -> Result<()> {
        match self.storage.create_list(name)? {
            CreateListOutcome::Created(list) => {
                let message = format!("List '{}' created.", list.name);
                self.console.say(message.green().bold())
            }
            CreateListOutcome::DuplicateName => self
                .console
                .say("A list with that name already exists.".yellow().bold()),
        }
    }

    /// Show the numbered lists and read a 1-based choice.
    ///
    /// Bad input is reported and yields [`Pick::Retry`].
    fn select_list(&mut self, prompt: &str) -> Result<Pick<List>> {
        let mut lists = self.storage.list_all_lists()?;
        if lists.is_empty() {
            self.console.say("No lists available.".red().bold())?;
            return Ok(Pick::Retry);
        }

        self.console.say(format!("\n{}", "Available lists:".blue().bold()))?;
        for (i, list) in lists.iter().enumerate() {
            self.console.say(format!("{}. {}", i + 1, list.name))?;
        }

        let Some(raw) = self.console.ask(prompt.cyan())? else {
            return Ok(Pick::Closed);
        };
        let Some(number) = parse_number(&raw) else {
            self.console.say("Error: enter a number!".red().bold())?;
            return Ok(Pick::Retry);
        };

        match position(number, lists.len()) {
            Some(index) => Ok(Pick::Chosen(lists.swap_remove(index))),
            None => {
                self.invalid_choice()?;
                Ok(Pick::Retry)
            }
        }
    }

    /// Show the list's people and read a row number.
    ///
    /// The row number is resolved to the stored person shown on that row.
    /// Non-numeric input is not recovered here and ends the loop.
    fn select_person(&mut self, list: &List, prompt: &str) -> Result<Pick<Person>> {
        let mut people = self.storage.list_people(list.id)?;
        self.show_people(&people)?;
        if people.is_empty() {
            return Ok(Pick::Retry);
        }

        let Some(raw) = self.console.ask(prompt.cyan())? else {
            return Ok(Pick::Closed);
        };
        let number = parse_number(&raw).ok_or_else(|| {
            Error::InvalidArgument(format!("'{raw}' is not a valid person number"))
        })?;

        match position(number, people.len()) {
            Some(index) => Ok(Pick::Chosen(people.swap_remove(index))),
            None => {
                self.invalid_choice()?;
                Ok(Pick::Retry)
            }
        }
    }

    fn show_people(&mut self, people: &[Person]) -> Result<()> {
        if people.is_empty() {
            self.console.say("The list is empty.".red().bold())
        } else {
            self.console.say(render_people(people).trim_end())
        }
    }

    fn invalid_choice(&mut self) -> Result<()> {
        self.console.say("Invalid choice, try again.".red().bold())
    }
}

/// Parse a typed number. Integers too large for `i64` saturate, so they
/// fail the range check instead of counting as non-numeric.
fn parse_number(raw: &str) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(number) => Some(number),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// Convert a 1-based number into an index within `len`.
fn position(number: i64, len: usize) -> Option<usize> {
    usize::try_from(number)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .filter(|&index| index < len)
}
