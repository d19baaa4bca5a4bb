//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;

use crate::debounce::{DebounceError, DebounceOptions, EdgeMode, EdgeSetting};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// Holding a `ValidatedConfig` guarantees that its options build a
/// debouncer: the interval is valid and the edge settings resolve.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Debounce options for the line debouncer
    pub options: DebounceOptions,

    /// Edge mode the options resolve to
    pub mode: EdgeMode,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Config {{ interval: {:?}, mode: {}, reset_on_activity: {} }}",
            self.options.interval, self.mode, self.options.reset_on_activity,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The interval is missing, negative or not finite
    /// - Both edges are explicitly disabled
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let section = toml.map(|t| &t.debounce);

        let options = Self::resolve_interval(cli, toml)?
            .with_leading(Self::resolve_edge(cli.leading, section.and_then(|s| s.leading)))
            .with_trailing(Self::resolve_edge(cli.trailing, section.and_then(|s| s.trailing)))
            .with_reset_on_activity(
                cli.reset_on_activity
                    || section.map_or(defaults::RESET_ON_ACTIVITY, |s| s.reset_on_activity),
            );

        let mode = options.resolve_mode()?;

        Ok(Self {
            options,
            mode,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_interval(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<DebounceOptions, ConfigError> {
        // CLI takes precedence
        let millis = cli
            .interval
            .or_else(|| toml.and_then(|t| t.debounce.interval_ms))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::INTERVAL,
                    "Use --interval or set debounce.interval_ms in config file",
                )
            })?;

        DebounceOptions::try_from_millis(millis).map_err(|e| match e {
            DebounceError::InvalidInterval { .. } => ConfigError::InvalidDuration {
                field: field::INTERVAL,
                reason: e.to_string(),
            },
            other => ConfigError::Debounce(other),
        })
    }

    fn resolve_edge(cli: Option<bool>, toml: Option<bool>) -> EdgeSetting {
        cli.or(toml).into()
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
