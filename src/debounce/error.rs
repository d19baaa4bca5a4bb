//! Error types for the debounce layer.

use thiserror::Error;
use tokio::runtime::TryCurrentError;

/// Error type for debouncer construction.
///
/// Every variant is raised before a [`super::Debouncer`] exists; once built,
/// a debouncer has no failure mode of its own.
#[derive(Debug, Error)]
pub enum DebounceError {
    /// Both the leading and the trailing edge were explicitly disabled.
    #[error("Invalid edge configuration: leading and trailing cannot both be disabled")]
    InvalidEdgeConfiguration,

    /// The interval is negative or not a finite number of milliseconds.
    #[error("Invalid interval {millis}ms: expected a finite, non-negative number of milliseconds")]
    InvalidInterval {
        /// The rejected value
        millis: f64,
    },

    /// No Tokio runtime is available to drive window timers.
    #[error("No Tokio runtime available for debounce timers: {0}")]
    NoRuntime(#[from] TryCurrentError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_edge_configuration_displays_message() {
        let error = DebounceError::InvalidEdgeConfiguration;
        assert_eq!(
            error.to_string(),
            "Invalid edge configuration: leading and trailing cannot both be disabled"
        );
    }

    #[test]
    fn invalid_interval_displays_value() {
        let error = DebounceError::InvalidInterval { millis: -5.0 };
        assert!(error.to_string().contains("-5ms"));
    }

    #[test]
    fn no_runtime_preserves_source() {
        use std::error::Error;

        let source = tokio::runtime::Handle::try_current().unwrap_err();
        let error: DebounceError = source.into();

        assert!(matches!(error, DebounceError::NoRuntime(_)));
        assert!(error.source().is_some());
    }
}
