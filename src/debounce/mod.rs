//! Debounce layer for rate-limiting calls to a wrapped operation.
//!
//! This module provides types and functions for:
//! - Describing the debounce configuration ([`DebounceOptions`], [`EdgeSetting`])
//! - Resolving which edges fire ([`EdgeMode`])
//! - The call-driven controller ([`Debouncer`], [`DebouncerBuilder`], [`create`])
//! - Error handling ([`DebounceError`])
//!
//! # Firing Semantics
//!
//! | Mode | Burst of one call | Burst of several calls |
//! |------|-------------------|------------------------|
//! | `LeadingOnly` | Fires immediately | Fires on the first call only |
//! | `TrailingOnly` | Fires at window expiry | Fires once at expiry with the last call |
//! | `Both` | Fires immediately, not again at expiry | Fires on the first call and at expiry with the last call |
//!
//! With `reset_on_activity`, every call made while a window is open restarts the
//! window, so a steady stream of calls postpones the trailing firing indefinitely.

mod builder;
mod controller;
mod edge;
mod error;
mod gate;
mod options;


pub use builder::DebouncerBuilder;
pub use controller::{CallOutcome, Debouncer};
pub use edge::{EdgeMode, EdgeSetting};
pub use error::DebounceError;
pub use options::DebounceOptions;

use std::fmt;

/// Wraps `operation` in a debouncer driven by the current Tokio runtime.
///
/// Shorthand for [`Debouncer::new`] with the operation first.
///
/// # Errors
///
/// Returns [`DebounceError::InvalidEdgeConfiguration`] if both edges are
/// disabled, or [`DebounceError::NoRuntime`] outside a Tokio runtime.
pub fn create<A, E, F>(
    operation: F,
    options: DebounceOptions,
) -> Result<Debouncer<A, E>, DebounceError>
where
    A: Send + 'static,
    E: fmt::Display + 'static,
    F: Fn(A) -> Result<(), E> + Send + Sync + 'static,
{
    Debouncer::new(options, operation)
}
