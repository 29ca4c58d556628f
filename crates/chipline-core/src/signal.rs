//! Signal/slot system for Chipline.
//!
//! Signals are emitted by components when their state changes, and
//! connected slots (callbacks) are invoked in response. The hosting model
//! for Chipline is a single-threaded cooperative event loop, so emission
//! is always direct: every connected slot runs before `emit` returns.
//! Work that must happen on a *later* turn of the loop goes through
//! [`crate::DeferQueue`] instead.
//!
//! # Example
//!
//! ```
//! use chipline_core::Signal;
//!
//! let width_changed = Signal::<f32>::new();
//!
//! let conn = width_changed.connect(|width| {
//!     println!("container is now {width}px wide");
//! });
//!
//! width_changed.emit(412.0);
//! width_changed.disconnect(conn);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Returned by [`Signal::connect`]; pass it to [`Signal::disconnect`]
    /// to remove the slot. For RAII-style management use
    /// [`Signal::connect_scoped`] instead.
    pub struct ConnectionId;
}

/// Internal storage for a single connection.
struct Connection<Args> {
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// A type-safe signal with multiple connected slots.
///
/// When the signal is emitted, every connected slot is invoked with a
/// reference to the emitted arguments, in connection order.
///
/// # Type Parameter
///
/// - `Args`: the argument type passed to slots. Use `()` for signals
///   with no payload, or a tuple for multiple values.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    /// Whether emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a [`ConnectionId`] that can be used to disconnect the
    /// slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Connection {
            slot: Arc::new(slot),
        })
    }

    /// Connect a slot and receive a guard that disconnects on drop.
    ///
    /// ```
    /// use chipline_core::Signal;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    ///
    /// let signal = Signal::<()>::new();
    /// let hits = Arc::new(AtomicUsize::new(0));
    /// {
    ///     let hits = hits.clone();
    ///     let _guard = signal.connect_scoped(move |_| {
    ///         hits.fetch_add(1, Ordering::SeqCst);
    ///     });
    ///     signal.emit(()); // hits = 1
    /// }
    /// signal.emit(()); // guard dropped, slot gone: hits stays 1
    /// assert_eq!(hits.load(Ordering::SeqCst), 1);
    /// ```
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        ConnectionGuard {
            signal: self,
            id: self.connect(slot),
        }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block or unblock signal emission.
    ///
    /// While blocked, `emit` does nothing. Useful during initialization
    /// or batch updates to avoid cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots with `args`.
    ///
    /// Slots run synchronously, in connection order, on the calling
    /// thread. The connection map lock is released before any slot runs,
    /// so a slot may connect or disconnect (including itself) without
    /// deadlocking; such changes take effect on the next emission.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "chipline_core::signal", "signal blocked, skipping emit");
            return;
        }

        // Snapshot the slots so handlers can mutate the connection map.
        let slots: Vec<Arc<dyn Fn(&Args) + Send + Sync>> = self
            .connections
            .lock()
            .values()
            .map(|conn| conn.slot.clone())
            .collect();

        tracing::trace!(
            target: "chipline_core::signal",
            connection_count = slots.len(),
            "emitting signal"
        );

        for slot in slots {
            slot(&args);
        }
    }
}

/// A connection that automatically disconnects when dropped.
///
/// Created via [`Signal::connect_scoped`]. Holding the guard keeps the
/// slot connected; dropping it removes the slot, which makes teardown of
/// observers safe by construction.
pub struct ConnectionGuard<'a, Args> {
    signal: &'a Signal<Args>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<'_, Args> {
    /// The underlying connection ID.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        self.signal.connections.lock().remove(self.id);
    }
}
