//! Edge settings and their resolution into a firing mode.

use std::fmt;

use super::DebounceError;

/// Tri-state setting for one edge of the debounce window.
///
/// `Unset` is distinct from `Off`: an unset edge takes its meaning from the
/// other edge's setting, see [`EdgeMode::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeSetting {
    /// Not specified.
    #[default]
    Unset,
    /// Explicitly disabled.
    Off,
    /// Explicitly enabled.
    On,
}

impl From<bool> for EdgeSetting {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl From<Option<bool>> for EdgeSetting {
    fn from(value: Option<bool>) -> Self {
        value.map_or(Self::Unset, Self::from)
    }
}

impl fmt::Display for EdgeSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => write!(f, "unset"),
            Self::Off => write!(f, "off"),
            Self::On => write!(f, "on"),
        }
    }
}

/// Which edges of a window fire the wrapped operation.
///
/// Resolved once when a debouncer is built and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeMode {
    /// Fire on the first call of a burst only.
    LeadingOnly,
    /// Fire once the window expires, with the last call of the burst.
    TrailingOnly,
    /// Fire on the first call and again at expiry if more calls arrived.
    Both,
}

impl EdgeMode {
    /// Resolves a pair of edge settings into a firing mode.
    ///
    /// | leading | trailing | mode |
    /// |---------|----------|------|
    /// | unset | unset / on | `TrailingOnly` |
    /// | unset | off | `LeadingOnly` |
    /// | off | unset / on | `TrailingOnly` |
    /// | off | off | error |
    /// | on | unset / off | `LeadingOnly` |
    /// | on | on | `Both` |
    ///
    /// # Errors
    ///
    /// Returns [`DebounceError::InvalidEdgeConfiguration`] when both edges are `Off`.
    pub fn resolve(leading: EdgeSetting, trailing: EdgeSetting) -> Result<Self, DebounceError> {
        match (leading, trailing) {
            (EdgeSetting::Off, EdgeSetting::Off) => Err(DebounceError::InvalidEdgeConfiguration),
            (EdgeSetting::On, EdgeSetting::On) => Ok(Self::Both),
            (EdgeSetting::On, _) | (EdgeSetting::Unset, EdgeSetting::Off) => Ok(Self::LeadingOnly),
            (EdgeSetting::Unset | EdgeSetting::Off, _) => Ok(Self::TrailingOnly),
        }
    }

    /// Returns true if the first call of a burst fires immediately.
    #[must_use]
    pub const fn fires_leading(self) -> bool {
        matches!(self, Self::LeadingOnly | Self::Both)
    }

    /// Returns true if window expiry fires with the latest call.
    #[must_use]
    pub const fn fires_trailing(self) -> bool {
        matches!(self, Self::TrailingOnly | Self::Both)
    }
}

impl fmt::Display for EdgeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeadingOnly => write!(f, "leading"),
            Self::TrailingOnly => write!(f, "trailing"),
            Self::Both => write!(f, "leading+trailing"),
        }
    }
}
