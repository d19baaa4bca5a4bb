//! Configuration layer for the quiesce binary.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the `[debounce]` section
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The interval has no default and must come from the CLI or the config file.
//!
//! # Edge Semantics
//!
//! `leading` and `trailing` are tri-state: omitted from both sources means
//! unset, which is different from `false`. An explicit CLI value overrides the
//! TOML value for that edge only.
//!
//! # Boolean Flag Semantics
//!
//! `--reset-on-activity` uses OR semantics: if set `true` in either CLI or
//! TOML, the result is `true`.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
