//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::debounce::DebounceError;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI or config file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Invalid duration value (negative or not finite).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// The debounce settings cannot form a debouncer.
    #[error("Invalid debounce configuration: {0}")]
    Debounce(#[from] DebounceError),
}

/// Well-known field names for `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The debounce interval field.
    pub const INTERVAL: &str = "interval";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn missing_displays_field_and_hint() {
        let error = ConfigError::missing(field::INTERVAL, "Use --interval");
        assert_eq!(
            error.to_string(),
            "Missing required field: interval. Use --interval"
        );
    }

    #[test]
    fn debounce_error_preserves_source() {
        let error = ConfigError::from(DebounceError::InvalidEdgeConfiguration);

        assert!(error.to_string().contains("leading and trailing"));
        assert!(error.source().is_some());
    }
}
