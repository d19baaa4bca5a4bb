//! Builder for debouncers with a custom scheduler or error hook.

use std::fmt;

use super::controller::{ErrorHook, Operation};
use super::{DebounceError, DebounceOptions, Debouncer};
use crate::time::{Scheduler, TokioScheduler};

/// Assembles a [`Debouncer`] step by step.
///
/// # Type Parameters
///
/// - `E`: The error type of the wrapped operation
/// - `S`: The scheduler driving window expiry (defaults to [`TokioScheduler`])
///
/// # Example
///
/// ```
/// use quiesce::debounce::{DebounceOptions, DebouncerBuilder};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let debouncer = DebouncerBuilder::new(DebounceOptions::new(Duration::from_millis(50)))
///     .unwrap()
///     .on_trailing_error(|error: &String| eprintln!("save failed: {error}"))
///     .build(|document: String| {
///         if document.is_empty() {
///             Err("nothing to save".to_string())
///         } else {
///             Ok(())
///         }
///     })
///     .unwrap();
///
/// debouncer.call("draft".to_string()).unwrap();
/// # }
/// ```
pub struct DebouncerBuilder<E, S = TokioScheduler> {
    options: DebounceOptions,
    scheduler: S,
    on_trailing_error: Option<Box<ErrorHook<E>>>,
}

impl<E> DebouncerBuilder<E, TokioScheduler> {
    /// Creates a builder whose timers run on the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`DebounceError::NoRuntime`] when called outside a Tokio runtime.
    pub fn new(options: DebounceOptions) -> Result<Self, DebounceError> {
        Ok(Self::with_scheduler(options, TokioScheduler::current()?))
    }
}

impl<E, S: Scheduler> DebouncerBuilder<E, S> {
    /// Creates a builder whose timers run on the given scheduler.
    #[must_use]
    pub const fn with_scheduler(options: DebounceOptions, scheduler: S) -> Self {
        Self {
            options,
            scheduler,
            on_trailing_error: None,
        }
    }

    /// Registers a hook that receives errors raised on the trailing edge.
    ///
    /// Errors are logged regardless of whether a hook is registered.
    #[must_use]
    pub fn on_trailing_error<H>(mut self, hook: H) -> Self
    where
        E: 'static,
        H: Fn(&E) + Send + Sync + 'static,
    {
        self.on_trailing_error = Some(Box::new(hook));
        self
    }

    /// Wraps `operation` in a debouncer.
    ///
    /// # Errors
    ///
    /// Returns [`DebounceError::InvalidEdgeConfiguration`] if both edges are
    /// disabled. No debouncer is created in that case.
    pub fn build<A, F>(self, operation: F) -> Result<Debouncer<A, E, S>, DebounceError>
    where
        A: Send + 'static,
        E: fmt::Display + 'static,
        F: Fn(A) -> Result<(), E> + Send + Sync + 'static,
    {
        let operation: Box<Operation<A, E>> = Box::new(operation);
        Debouncer::assemble(
            &self.options,
            self.scheduler,
            operation,
            self.on_trailing_error,
        )
    }
}

impl<E, S: fmt::Debug> fmt::Debug for DebouncerBuilder<E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebouncerBuilder")
            .field("options", &self.options)
            .field("scheduler", &self.scheduler)
            .field("on_trailing_error", &self.on_trailing_error.is_some())
            .finish()
    }
}
