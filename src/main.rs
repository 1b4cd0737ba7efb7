//! debtlist CLI entry point.

use clap::Parser;
use debtlist::cli::commands;
use debtlist::cli::{Cli, Commands, OutputFormat};
use debtlist::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Set up tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    let format = cli.output_format();

    match run(&cli, format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if format == OutputFormat::Json {
                eprintln!("{}", e.to_structured_json());
            } else if let Some(hint) = e.hint() {
                eprintln!("Error: {e}\n  Hint: {hint}");
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,rusqlite=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli, format: OutputFormat) -> Result<(), Error> {
    let db = cli.db.as_deref();
    let json = format == OutputFormat::Json;

    match &cli.command {
        None | Some(Commands::Menu) => commands::menu::execute(db),
        Some(Commands::Init) => commands::init::execute(db, json),
        Some(Commands::Version) => commands::version::execute(db, json),
        Some(Commands::List { command }) => commands::list::execute(command, db, format),
        Some(Commands::Person { command }) => commands::person::execute(command, db, format),
        Some(Commands::Completions { shell }) => commands::completions::execute(shell),
    }
}
