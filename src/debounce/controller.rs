//! The debounce controller.
//!
//! A [`Debouncer`] owns the window timer and the latest captured call, and
//! decides for every call whether the wrapped operation fires now, later, or
//! not at all.

use std::convert::Infallible;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::watch;

use super::gate::InvocationGate;
use super::{DebounceError, DebounceOptions, DebouncerBuilder, EdgeMode};
use crate::time::{ScheduledTask, Scheduler, TokioScheduler};

/// The wrapped operation.
pub(super) type Operation<A, E> = dyn Fn(A) -> Result<(), E> + Send + Sync;

/// Receiver for errors raised on the trailing edge, where no caller is waiting.
pub(super) type ErrorHook<E> = dyn Fn(&E) + Send + Sync;

/// What a single call to [`Debouncer::call`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// The operation fired synchronously on the leading edge.
    Leading,
    /// The call was captured and may fire when the window expires.
    Deferred,
}

/// Rate-limits calls to a wrapped operation.
///
/// Each [`call`](Self::call) stands in for a direct call to the operation.
/// The first call opens a window of the configured interval; whether the
/// operation fires when the window opens, when it expires, or both depends
/// on the resolved [`EdgeMode`]. Only the most recent call in a window is
/// kept for the trailing edge.
///
/// Cloning is cheap and clones share one window. Dropping the last clone
/// cancels a pending window, which then never fires.
///
/// # Threads
///
/// Calls may come from any thread. Invocations of the operation never
/// overlap: a leading or trailing invocation that becomes due while another
/// is running blocks its thread until the first returns. The operation may
/// itself call the debouncer; such nested calls do not wait.
///
/// # Errors on the Trailing Edge
///
/// An error returned by the operation on the leading edge is returned from
/// [`call`](Self::call). On the trailing edge no caller is waiting, so the
/// error is logged at `error` level and handed to the hook registered with
/// [`DebouncerBuilder::on_trailing_error`], if any. The window state is
/// settled before the operation runs, so neither errors nor panics leave a
/// debouncer unusable.
///
/// # Example
///
/// ```
/// use quiesce::debounce::{CallOutcome, DebounceOptions, Debouncer};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() {
/// let options = DebounceOptions::new(Duration::from_millis(100)).with_leading(true);
/// let debouncer = Debouncer::from_fn(options, |query: String| println!("search {query}")).unwrap();
///
/// assert_eq!(debouncer.call("r".into()).unwrap(), CallOutcome::Leading);
/// assert_eq!(debouncer.call("ru".into()).unwrap(), CallOutcome::Deferred);
/// # }
/// ```
pub struct Debouncer<A, E = Infallible, S: Scheduler = TokioScheduler> {
    inner: Arc<Inner<A, E, S>>,
}

struct Inner<A, E, S: Scheduler> {
    operation: Box<Operation<A, E>>,
    on_trailing_error: Option<Box<ErrorHook<E>>>,
    mode: EdgeMode,
    interval: Duration,
    reset_on_activity: bool,
    scheduler: S,
    state: Mutex<State<A, S::Handle>>,
    gate: InvocationGate,
    /// True while a window is open or a trailing invocation is running
    activity: watch::Sender<bool>,
}

struct State<A, H> {
    /// The open window, if any
    window: Option<Window<H>>,
    /// Latest call eligible for the trailing edge
    candidate: Option<A>,
    /// Source of window ids
    windows_opened: u64,
    /// Trailing invocations started but not yet returned
    trailing_running: usize,
}

struct Window<H> {
    id: u64,
    expiry: H,
}

impl<A, E> Debouncer<A, E>
where
    A: Send + 'static,
    E: fmt::Display + 'static,
{
    /// Wraps a fallible operation, with timers driven by the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`DebounceError::InvalidEdgeConfiguration`] if both edges are
    /// disabled, or [`DebounceError::NoRuntime`] outside a Tokio runtime.
    pub fn new<F>(options: DebounceOptions, operation: F) -> Result<Self, DebounceError>
    where
        F: Fn(A) -> Result<(), E> + Send + Sync + 'static,
    {
        DebouncerBuilder::new(options)?.build(operation)
    }
}

impl<A> Debouncer<A>
where
    A: Send + 'static,
{
    /// Wraps an infallible operation, with timers driven by the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// See [`Debouncer::new`].
    pub fn from_fn<F>(options: DebounceOptions, operation: F) -> Result<Self, DebounceError>
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self::new(options, move |args| {
            operation(args);
            Ok(())
        })
    }
}

impl<A, E, S> Debouncer<A, E, S>
where
    A: Send + 'static,
    E: fmt::Display + 'static,
    S: Scheduler,
{
    pub(super) fn assemble(
        options: &DebounceOptions,
        scheduler: S,
        operation: Box<Operation<A, E>>,
        on_trailing_error: Option<Box<ErrorHook<E>>>,
    ) -> Result<Self, DebounceError> {
        let mode = options.resolve_mode()?;

        tracing::debug!(
            %mode,
            interval = ?options.interval,
            reset_on_activity = options.reset_on_activity,
            "Debouncer created"
        );

        Ok(Self {
            inner: Arc::new(Inner {
                operation,
                on_trailing_error,
                mode,
                interval: options.interval,
                reset_on_activity: options.reset_on_activity,
                scheduler,
                state: Mutex::new(State {
                    window: None,
                    candidate: None,
                    windows_opened: 0,
                    trailing_running: 0,
                }),
                gate: InvocationGate::default(),
                activity: watch::Sender::new(false),
            }),
        })
    }

    /// Calls the operation through the debouncer.
    ///
    /// Fires synchronously when this call opens a window and the leading
    /// edge is enabled. Otherwise `args` replaces any previously captured
    /// call and fires at window expiry if the trailing edge is enabled.
    ///
    /// # Errors
    ///
    /// Returns the operation's error when it fails on the leading edge.
    pub fn call(&self, args: A) -> Result<CallOutcome, E> {
        let Some(args) = self.inner.accept(args) else {
            return Ok(CallOutcome::Deferred);
        };

        tracing::debug!("Firing on leading edge");
        let _pass = self.inner.gate.enter();
        (self.inner.operation)(args)?;
        Ok(CallOutcome::Leading)
    }
}

impl<A, E, S: Scheduler> Debouncer<A, E, S> {
    /// Returns the resolved edge mode.
    #[must_use]
    pub fn mode(&self) -> EdgeMode {
        self.inner.mode
    }

    /// Returns the window interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    /// Returns true if calls during an open window restart it.
    #[must_use]
    pub fn resets_on_activity(&self) -> bool {
        self.inner.reset_on_activity
    }

    /// Returns true while a window is open.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inner.lock_state().window.is_some()
    }

    /// Waits until no window is open and no trailing invocation is running.
    ///
    /// Returns immediately when the debouncer is already idle. Calls made
    /// while waiting keep it waiting until their window has closed too.
    pub async fn settled(&self) {
        let mut activity = self.inner.activity.subscribe();
        // The sender lives as long as `self`, so this cannot fail.
        let _ = activity.wait_for(|active| !*active).await;
    }
}

impl<A, E, S: Scheduler> Clone for Debouncer<A, E, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, E, S: Scheduler> fmt::Debug for Debouncer<A, E, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("mode", &self.inner.mode)
            .field("interval", &self.inner.interval)
            .field("reset_on_activity", &self.inner.reset_on_activity)
            .field("pending", &self.is_pending())
            .finish_non_exhaustive()
    }
}

impl<A, E, S: Scheduler> Inner<A, E, S> {
    // The operation never runs under this lock, so poisoning cannot leave
    // the window half-updated.
    fn lock_state(&self) -> MutexGuard<'_, State<A, S::Handle>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish_activity(&self, state: &State<A, S::Handle>) {
        self.activity
            .send_replace(state.window.is_some() || state.trailing_running > 0);
    }
}

/// Marks a trailing invocation as running until dropped.
struct TrailingRun<'a, A, E, S: Scheduler> {
    inner: &'a Inner<A, E, S>,
}

impl<A, E, S: Scheduler> Drop for TrailingRun<'_, A, E, S> {
    fn drop(&mut self) {
        let mut state = self.inner.lock_state();
        state.trailing_running -= 1;
        self.inner.publish_activity(&state);
    }
}

impl<A, E, S> Inner<A, E, S>
where
    A: Send + 'static,
    E: fmt::Display + 'static,
    S: Scheduler,
{
    /// Records a call and returns its arguments if it fires on the leading edge.
    fn accept(self: &Arc<Self>, args: A) -> Option<A> {
        let mut state = self.lock_state();
        state.candidate = Some(args);

        // Firing here consumes the candidate so expiry cannot fire it again.
        let leading = if self.mode.fires_leading() && state.window.is_none() {
            state.candidate.take()
        } else {
            None
        };

        if self.reset_on_activity {
            if let Some(window) = state.window.take() {
                window.expiry.cancel();
                tracing::trace!(window = window.id, "Window reset by activity");
            }
        }

        if state.window.is_none() {
            state.windows_opened += 1;
            let id = state.windows_opened;
            let weak = Arc::downgrade(self);
            let expiry = self
                .scheduler
                .schedule(self.interval, Box::new(move || Self::expire(&weak, id)));
            state.window = Some(Window { id, expiry });
            self.publish_activity(&state);
            tracing::trace!(window = id, "Window opened");
        }

        leading
    }

    /// Closes window `id` and fires the trailing edge if a call is waiting.
    fn expire(weak: &Weak<Self>, id: u64) {
        let Some(inner) = weak.upgrade() else {
            return;
        };

        let candidate = {
            let mut state = inner.lock_state();
            // A reset may have replaced the window after this timer woke.
            if state.window.as_ref().is_none_or(|window| window.id != id) {
                return;
            }
            state.window = None;
            let candidate = state
                .candidate
                .take()
                .filter(|_| inner.mode.fires_trailing());
            if candidate.is_some() {
                state.trailing_running += 1;
            }
            inner.publish_activity(&state);
            candidate
        };
        tracing::trace!(window = id, "Window closed");

        let Some(args) = candidate else {
            return;
        };
        let _running = TrailingRun { inner: &inner };

        tracing::debug!(window = id, "Firing on trailing edge");
        let result = {
            let _pass = inner.gate.enter();
            (inner.operation)(args)
        };
        if let Err(error) = result {
            tracing::error!(window = id, "Debounced operation failed on trailing edge: {error}");
            if let Some(hook) = &inner.on_trailing_error {
                hook(&error);
            }
        }
    }
}

impl<A, E, S: Scheduler> Drop for Inner<A, E, S> {
    fn drop(&mut self) {
        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(window) = state.window.take() {
            window.expiry.cancel();
        }
    }
}
