//! Status output for the CLI
//!
//! Status lines go to stdout; errors and logs go to stderr.

use crate::error::Result;
use colored::Colorize;
use std::io::{self, Write};

/// Writes user-facing status lines, honoring quiet mode and color settings
pub struct OutputWriter {
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self::with_writer(use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            use_color,
            quiet,
            writer,
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_color {
            writeln!(self.writer, "{} {}", "✓".green().bold(), message)?;
        } else {
            writeln!(self.writer, "✓ {}", message)?;
        }
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_color {
            writeln!(self.writer, "{} {}", "ℹ".blue(), message)?;
        } else {
            writeln!(self.writer, "ℹ {}", message)?;
        }
        Ok(())
    }
}
