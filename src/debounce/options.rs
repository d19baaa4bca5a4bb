//! Debounce configuration.

use std::fmt;
use std::time::Duration;

use super::{DebounceError, EdgeMode, EdgeSetting};

/// Configuration for a debouncer.
///
/// Holds the quiescence window, the tri-state edge settings and whether
/// activity restarts an open window. Values are checked when a debouncer is
/// built, not when the options are assembled.
///
/// # Defaults
///
/// - `leading`: unset
/// - `trailing`: unset (resolves to trailing-only firing)
/// - `reset_on_activity`: false
///
/// # Example
///
/// ```
/// use quiesce::debounce::{DebounceOptions, EdgeMode};
/// use std::time::Duration;
///
/// let options = DebounceOptions::new(Duration::from_millis(250))
///     .with_leading(true)
///     .with_trailing(true)
///     .with_reset_on_activity(true);
///
/// assert_eq!(options.resolve_mode().unwrap(), EdgeMode::Both);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceOptions {
    /// The quiescence window.
    ///
    /// A zero interval closes each window on the next scheduling opportunity.
    pub interval: Duration,

    /// Whether the first call of a burst fires immediately.
    pub leading: EdgeSetting,

    /// Whether window expiry fires with the last call of a burst.
    pub trailing: EdgeSetting,

    /// Whether each call during an open window restarts that window.
    pub reset_on_activity: bool,
}

impl DebounceOptions {
    /// Default value for `reset_on_activity`.
    pub const DEFAULT_RESET_ON_ACTIVITY: bool = false;

    /// Creates options with the given interval and default edge settings.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            leading: EdgeSetting::Unset,
            trailing: EdgeSetting::Unset,
            reset_on_activity: Self::DEFAULT_RESET_ON_ACTIVITY,
        }
    }

    /// Creates options from an interval in (possibly fractional) milliseconds.
    ///
    /// # Errors
    ///
    /// Returns [`DebounceError::InvalidInterval`] if `millis` is negative,
    /// NaN or infinite.
    pub fn try_from_millis(millis: f64) -> Result<Self, DebounceError> {
        if !millis.is_finite() || millis < 0.0 {
            return Err(DebounceError::InvalidInterval { millis });
        }
        Duration::try_from_secs_f64(millis / 1000.0)
            .map(Self::new)
            .map_err(|_| DebounceError::InvalidInterval { millis })
    }

    /// Sets the leading edge.
    #[must_use]
    pub fn with_leading(mut self, leading: impl Into<EdgeSetting>) -> Self {
        self.leading = leading.into();
        self
    }

    /// Sets the trailing edge.
    #[must_use]
    pub fn with_trailing(mut self, trailing: impl Into<EdgeSetting>) -> Self {
        self.trailing = trailing.into();
        self
    }

    /// Sets whether activity during an open window restarts it.
    #[must_use]
    pub const fn with_reset_on_activity(mut self, reset: bool) -> Self {
        self.reset_on_activity = reset;
        self
    }

    /// Resolves the edge settings into a firing mode.
    ///
    /// # Errors
    ///
    /// Returns [`DebounceError::InvalidEdgeConfiguration`] when both edges are
    /// explicitly disabled.
    pub fn resolve_mode(&self) -> Result<EdgeMode, DebounceError> {
        EdgeMode::resolve(self.leading, self.trailing)
    }
}

impl fmt::Display for DebounceOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Debounce {{ interval: {:?}, leading: {}, trailing: {}, reset_on_activity: {} }}",
            self.interval,
            self.leading,
            self.trailing,
            self.reset_on_activity,
        )
    }
}
