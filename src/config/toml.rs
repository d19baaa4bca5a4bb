//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::{ConfigError, defaults};

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Debounce configuration section
    #[serde(default)]
    pub debounce: DebounceSection,
}

/// Debounce configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DebounceSection {
    /// Quiescence window in milliseconds
    pub interval_ms: Option<f64>,

    /// Fire on the leading edge (absent = unset)
    pub leading: Option<bool>,

    /// Fire on the trailing edge (absent = unset)
    pub trailing: Option<bool>,

    /// Restart the window on every call
    #[serde(default, alias = "reset_timeout")]
    pub reset_on_activity: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    format!(
        r"# quiesce configuration file

[debounce]
# Quiescence window in milliseconds (required, fractions allowed)
# Can be overridden by --interval
interval_ms = {interval}

# Fire on the first call of a burst.
# Leave commented out to keep it unset: unset leading with unset or true
# trailing fires on the trailing edge only.
# leading = true

# Fire with the last call of a burst once the window expires.
# leading = false together with trailing = false is rejected.
# trailing = true

# Restart the window on every call instead of letting it expire on schedule.
# A steady stream of calls then postpones the trailing edge indefinitely.
reset_on_activity = {reset}
",
        interval = defaults::TEMPLATE_INTERVAL_MS,
        reset = defaults::RESET_ON_ACTIVITY,
    )
}
