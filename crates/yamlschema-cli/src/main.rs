//! yaml-to-jsonschema - generate JSON Schema from annotated YAML values files
//!
//! Entry point of the command-line tool. It is meant to run both locally and
//! as a CI action step, where inputs arrive through environment variables.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::Cli;
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!(
                "{}",
                error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
            );

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli))]
fn run(cli: Cli) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let config = Config::from_cli(&cli)?;
    tracing::debug!(config = ?config, "Configuration resolved");

    let mut output = OutputWriter::new(cli.use_color(), cli.quiet);
    handlers::handle_generate(&config, &mut output)?;
    Ok(())
}

/// Initialize the logging system
fn init_logging(cli: &Cli) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
    }
    logging_config.ansi = cli.use_color();

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["yaml-to-jsonschema", "--yaml-file", "values.yaml"]);
        assert_eq!(cli.verbosity_level(), 0);

        let cli = Cli::parse_from(["yaml-to-jsonschema", "-vv"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["yaml-to-jsonschema", "--quiet"]);
        assert_eq!(cli.verbosity_level(), 0);
    }
}
