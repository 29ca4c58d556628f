//! Deferred invocation queue for next-tick execution.
//!
//! Some mutations happen inside callbacks that run outside normal render
//! timing (a collection-change notification, a resize observation). Such
//! a callback must not synchronously kick off a new render pass from
//! within the old one; instead it pushes a closure here, and the host
//! event loop drains the queue on its next turn.
//!
//! Closures can be tied to a [`DeferGuard`]: once the guard is revoked
//! (or dropped), every closure pushed under it becomes a no-op. This is
//! how a torn-down widget keeps its in-flight notifications from acting
//! on a destroyed view.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// A boxed deferred closure.
type DeferredFn = Box<dyn FnOnce() + Send>;

/// A queue of closures executed on the next turn of the host loop.
///
/// `push` may be called at any time, including from inside a closure that
/// is currently being drained; such late arrivals run on the *following*
/// drain, never the current one.
#[derive(Default)]
pub struct DeferQueue {
    pending: Mutex<VecDeque<DeferredFn>>,
}

impl DeferQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a closure for the next drain.
    pub fn push<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.pending.lock().push_back(Box::new(f));
    }

    /// Queue a closure that only runs while `guard` is still alive.
    ///
    /// If the guard has been revoked (or dropped) by the time the queue
    /// is drained, the closure is silently discarded.
    pub fn push_guarded<F>(&self, guard: &DeferGuard, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let alive = guard.alive.clone();
        self.push(move || {
            if alive.load(Ordering::SeqCst) {
                f();
            }
        });
    }

    /// Execute everything queued before this call.
    ///
    /// Returns the number of closures taken off the queue. Closures
    /// pushed while draining are left for the next call, which is what
    /// gives deferred work its one-tick granularity.
    pub fn run_pending(&self) -> usize {
        let batch = std::mem::take(&mut *self.pending.lock());
        let count = batch.len();
        if count > 0 {
            tracing::trace!(target: "chipline_core::defer", count, "draining defer queue");
        }
        for f in batch {
            f();
        }
        count
    }

    /// Number of closures currently waiting.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Drop all queued closures without running them.
    pub fn clear(&self) {
        self.pending.lock().clear();
    }
}

/// Revocable liveness token for deferred closures.
///
/// A widget owns one guard for its lifetime; teardown revokes it. The
/// guard also revokes itself on drop, so forgetting to call
/// [`DeferGuard::revoke`] cannot leave live callbacks behind.
pub struct DeferGuard {
    alive: Arc<AtomicBool>,
}

impl Default for DeferGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl DeferGuard {
    /// Create a live guard.
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Permanently disarm every closure pushed under this guard.
    pub fn revoke(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Whether the guard has been revoked.
    pub fn is_revoked(&self) -> bool {
        !self.alive.load(Ordering::SeqCst)
    }
}

impl Drop for DeferGuard {
    fn drop(&mut self) {
        self.revoke();
    }
}
