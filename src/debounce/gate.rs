//! Serialization of operation invocations.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};

/// Lets one thread at a time run the wrapped operation.
///
/// A thread that already holds the gate passes straight through, so the
/// operation may call back into its own debouncer. Invocations are
/// synchronous, so the holder re-entering is always a nested call.
#[derive(Debug, Default)]
pub(super) struct InvocationGate {
    holder: Mutex<Option<ThreadId>>,
    released: Condvar,
}

/// Proof of passage through an [`InvocationGate`]; releases it on drop.
#[must_use = "the gate is released as soon as the pass is dropped"]
pub(super) struct GatePass<'a> {
    gate: &'a InvocationGate,
    nested: bool,
}

impl InvocationGate {
    /// Blocks until no other thread is running the operation.
    pub(super) fn enter(&self) -> GatePass<'_> {
        let current = thread::current().id();
        let mut holder = self.lock_holder();

        if *holder == Some(current) {
            return GatePass {
                gate: self,
                nested: true,
            };
        }

        while holder.is_some() {
            holder = self
                .released
                .wait(holder)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *holder = Some(current);

        GatePass {
            gate: self,
            nested: false,
        }
    }

    fn lock_holder(&self) -> MutexGuard<'_, Option<ThreadId>> {
        self.holder.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for GatePass<'_> {
    // Runs during unwinding too, so a panicking operation frees the gate.
    fn drop(&mut self) {
        if self.nested {
            return;
        }
        *self.gate.lock_holder() = None;
        self.gate.released.notify_one();
    }
}
