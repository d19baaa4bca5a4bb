//! Timer abstraction for testability.
//!
//! This module provides a [`Scheduler`] trait that owns deferred work on
//! behalf of a debouncer, allowing alternative timer sources in tests while
//! using the Tokio runtime in production.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::debounce::DebounceError;

/// A deferred unit of work handed to a [`Scheduler`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Abstraction over a timer that runs a task once after a delay.
///
/// Implementations must never run the task inline from [`Scheduler::schedule`]:
/// the caller may hold locks that the task itself acquires.
///
/// # Example
///
/// ```
/// use quiesce::time::{ScheduledTask, Scheduler, TokioScheduler};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let scheduler = TokioScheduler::current().unwrap();
/// let handle = scheduler.schedule(Duration::from_secs(60), Box::new(|| println!("late")));
/// handle.cancel();
/// # }
/// ```
pub trait Scheduler: Send + Sync + 'static {
    /// Handle to a scheduled task, used to cancel it before it runs.
    type Handle: ScheduledTask;

    /// Runs `task` once `delay` has elapsed.
    ///
    /// A zero delay runs the task on the next scheduling opportunity.
    fn schedule(&self, delay: Duration, task: Task) -> Self::Handle;
}

/// A cancellable reference to a task created by a [`Scheduler`].
pub trait ScheduledTask: Send + 'static {
    /// Prevents the task from running if it has not started yet.
    ///
    /// Cancelling a task that already ran, or cancelling twice, is a no-op.
    fn cancel(&self);
}

/// Production scheduler backed by a Tokio runtime.
///
/// Each scheduled task is spawned onto the captured runtime, sleeps until a
/// deadline computed at scheduling time, then runs. Cancelling aborts the
/// spawned task.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    /// Creates a scheduler that spawns onto the given runtime.
    #[must_use]
    pub const fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Creates a scheduler bound to the runtime of the calling context.
    ///
    /// # Errors
    ///
    /// Returns [`DebounceError::NoRuntime`] when called outside a Tokio runtime.
    pub fn current() -> Result<Self, DebounceError> {
        Ok(Self::new(Handle::try_current()?))
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TokioTask;

    fn schedule(&self, delay: Duration, task: Task) -> TokioTask {
        // The sleep needs the runtime's timer; callers may be on any thread.
        let _guard = self.runtime.enter();
        let sleep = tokio::time::sleep(delay);
        let join = tokio::spawn(async move {
            sleep.await;
            task();
        });
        TokioTask { join }
    }
}

/// Handle to a task spawned by [`TokioScheduler`].
#[derive(Debug)]
pub struct TokioTask {
    join: JoinHandle<()>,
}

impl ScheduledTask for TokioTask {
    fn cancel(&self) {
        self.join.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_task(counter: &Arc<AtomicUsize>) -> Task {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn current_fails_outside_runtime() {
        let result = TokioScheduler::current();
        assert!(matches!(result, Err(DebounceError::NoRuntime(_))));
    }

    #[test]
    fn tokio_scheduler_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TokioScheduler>();
    }

    #[test]
    fn new_schedules_onto_given_runtime() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .build()
            .unwrap();
        let scheduler = TokioScheduler::new(runtime.handle().clone());
        let (done, finished) = std::sync::mpsc::channel();

        // Scheduled from a thread outside any runtime context.
        let _handle = scheduler.schedule(
            Duration::from_millis(5),
            Box::new(move || done.send(()).unwrap()),
        );

        finished.recv_timeout(Duration::from_secs(5)).unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn runs_task_after_delay() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = TokioScheduler::current().unwrap();

        let _handle = scheduler.schedule(Duration::from_millis(100), counting_task(&counter));

        tokio::time::sleep(Duration::from_millis(99)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_delay_runs_on_next_turn() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = TokioScheduler::current().unwrap();

        let _handle = scheduler.schedule(Duration::ZERO, counting_task(&counter));
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_task_never_runs() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = TokioScheduler::current().unwrap();

        let handle = scheduler.schedule(Duration::from_millis(10), counting_task(&counter));
        handle.cancel();
        handle.cancel();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
