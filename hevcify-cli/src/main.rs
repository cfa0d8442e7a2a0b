// hevcify-cli/src/main.rs
//
// Entry point for the hevcify binary.
//
// Responsibilities:
// - Parsing command-line arguments with clap.
// - Initialising diagnostic logging.
// - Running the convert flow.
// - Mapping fatal errors to process exit codes.

use hevcify_cli::logging::init_logging;
use hevcify_cli::{Cli, exit_code_for, run_convert};

use clap::Parser;
use console::style;
use log::error;
use std::process;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run_convert(&cli) {
        error!("{e:#}");
        eprintln!("{} {e:#}", style("Error:").red().bold());
        process::exit(exit_code_for(&e));
    }
}
