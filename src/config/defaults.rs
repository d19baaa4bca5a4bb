//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use crate::debounce::DebounceOptions;

/// Default output path for `quiesce init`.
pub const CONFIG_FILE: &str = "quiesce.toml";

/// Interval written into the generated configuration template, in milliseconds.
pub const TEMPLATE_INTERVAL_MS: u64 = 250;

/// Default for restarting the window on activity.
pub const RESET_ON_ACTIVITY: bool = DebounceOptions::DEFAULT_RESET_ON_ACTIVITY;
