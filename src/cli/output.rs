//! Colored terminal output for progress and results.

use colored::Colorize;
use std::io::{self, Write};

/// Writes user-facing messages, honouring verbose and quiet modes.
///
/// Progress and results go to stdout, warnings to stderr. Color follows
/// `colored`'s terminal and `NO_COLOR`/`CLICOLOR` detection.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose || self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "{}", message.dimmed())
    }

    /// Print a progress line.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "{}", message.cyan())
    }

    /// Print a success line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "{}", success_line(message))
    }

    /// Print indented detail under the previous line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout().lock(), "  {}", message.dimmed())
    }

    /// Print a warning to stderr, even in quiet mode.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        writeln!(io::stderr().lock(), "{}", warning_line(message))
    }
}

fn success_line(message: &str) -> String {
    format!("{} {}", "✓".green().bold(), message.green())
}

fn warning_line(message: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), message.yellow())
}
