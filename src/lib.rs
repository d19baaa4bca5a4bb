//! quiesce: call debouncing
//!
//! A library for rate-limiting calls to an operation: calls are held back
//! until activity quiesces, with firing on the leading edge, the trailing
//! edge, or both.

pub mod config;
pub mod debounce;
pub mod time;

pub use debounce::{CallOutcome, DebounceError, DebounceOptions, Debouncer, create};
