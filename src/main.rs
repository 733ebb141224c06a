use clap::Parser;
use fileprune::cli::{Cli, CliError, run_cli};
use fileprune::output::OutputFormatter;
use std::process;

fn main() {
    // Logging is controlled by RUST_LOG, e.g. RUST_LOG=debug fileprune preview ~/Downloads
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run_cli(&cli) {
        match &e {
            CliError::Warning(message) => OutputFormatter::warning(message),
            CliError::Failure(message) => OutputFormatter::error(message),
            CliError::PartialFailure(_) => OutputFormatter::error(&e.to_string()),
        }
        process::exit(1);
    }
}
