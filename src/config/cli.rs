//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::defaults;

/// quiesce: debounce lines from standard input
///
/// Treats every line read from stdin as a call and prints the lines that
/// fire once the configured debounce policy lets them through.
#[derive(Debug, Parser)]
#[command(name = "quiesce")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Quiescence window in milliseconds (fractions allowed)
    #[arg(long, value_name = "MS", allow_negative_numbers = true)]
    pub interval: Option<f64>,

    /// Fire on the first line of a burst (true/false; omit to leave unset)
    #[arg(long, value_name = "BOOL")]
    pub leading: Option<bool>,

    /// Fire with the last line of a burst (true/false; omit to leave unset)
    #[arg(long, value_name = "BOOL")]
    pub trailing: Option<bool>,

    /// Restart the window on every line instead of letting it expire on schedule
    #[arg(long = "reset-on-activity")]
    pub reset_on_activity: bool,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for quiesce
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Parses CLI arguments from an iterator without exiting on failure.
    ///
    /// # Errors
    ///
    /// Returns the clap error for unknown or malformed arguments.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
