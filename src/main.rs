use clap::Parser;
use simscale::cli::commands;
use simscale::cli::{Cli, Commands};
use simscale::logging::init_logging;
use simscale::SimscaleError;
use std::io::{self, IsTerminal};

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if let Err(e) = init_logging(cli.verbose, cli.quiet) {
        eprintln!("Failed to initialize logging: {e}");
        // Don't exit, just continue without logging
    }

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(&args),
        Commands::Materialize(args) => commands::materialize::execute(&args),
    };

    if let Err(e) = result {
        handle_error(&e);
    }
}

/// Print the error (with a suggestion when one exists) and exit nonzero.
fn handle_error(err: &SimscaleError) -> ! {
    let use_color = io::stderr().is_terminal();
    if use_color {
        eprintln!("\x1b[31merror:\x1b[0m {err}");
    } else {
        eprintln!("error: {err}");
    }
    if let Some(hint) = err.suggestion() {
        eprintln!("hint: {hint}");
    }
    std::process::exit(err.exit_code());
}
