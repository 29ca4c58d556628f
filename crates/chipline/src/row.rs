//! Chip row: wires the resize monitor and overflow calculator together.
//!
//! Two trigger paths converge here. A container resize flows through the
//! monitor's filter pipeline and, when accepted, runs a measurement
//! pass. A change to the rendered chip collection (selection grew or
//! shrank, a lagging chip appeared) reruns the pass at the last known
//! width. Either way the same synchronous calculation is the single
//! source of truth for what is visible.
//!
//! After every pass the row schedules a redraw request on the defer
//! queue rather than notifying synchronously — the pass may be running
//! inside a collection-change callback, outside normal render timing.
//! The request is coalesced (at most one per drain) and disarmed by
//! [`ChipRow::tear_down`], so a request in flight when the widget goes
//! away acts on nothing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use chipline_core::{DeferGuard, DeferQueue, Signal};

use crate::chip::ChipCollection;
use crate::error::Result;
use crate::monitor::ResizeMonitor;
use crate::overflow::OverflowCalculator;

/// Where the row is in its recalculation cycle.
///
/// A pass is synchronous and atomic with respect to the host loop, so
/// outside a trigger call the row is always `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    /// No measurement pass in progress.
    Idle,
    /// A measurement pass is running.
    Measuring,
}

/// The chip-row behavior: overflow state plus its recalculation triggers.
///
/// The row does not own the chip elements — the rendering layer does.
/// Each trigger borrows the collection for exactly one pass and mutates
/// only the per-chip visibility flags.
///
/// # Example
///
/// ```
/// use std::time::Instant;
/// use chipline::{ChipRow, ChipSlots, MeasuredChip};
///
/// let mut row = ChipRow::new();
/// let mut chips = ChipSlots::new();
/// for _ in 0..6 {
///     chips.push(MeasuredChip::from_width(60.0));
/// }
///
/// row.begin_observation()?;
/// row.container_resized(400.0, Instant::now(), &mut chips);
/// assert_eq!(row.hidden_count(), 1);
/// # Ok::<(), chipline::Error>(())
/// ```
pub struct ChipRow {
    calculator: OverflowCalculator,
    monitor: ResizeMonitor,
    defer: Arc<DeferQueue>,
    guard: DeferGuard,
    /// Width used by collection-change recalculations.
    last_width: f32,
    hidden_count: usize,
    state: RowState,
    /// True while a redraw request sits on the defer queue.
    redraw_pending: Arc<AtomicBool>,
    redraw_requested: Arc<Signal<()>>,

    /// Emitted when the hidden count changes, carrying the new count.
    pub hidden_count_changed: Signal<usize>,
}

impl Default for ChipRow {
    fn default() -> Self {
        Self::new()
    }
}

impl ChipRow {
    /// Create a row with default calculator, monitor, and defer queue.
    pub fn new() -> Self {
        Self {
            calculator: OverflowCalculator::new(),
            monitor: ResizeMonitor::new(),
            defer: Arc::new(DeferQueue::new()),
            guard: DeferGuard::new(),
            last_width: 0.0,
            hidden_count: 0,
            state: RowState::Idle,
            redraw_pending: Arc::new(AtomicBool::new(false)),
            redraw_requested: Arc::new(Signal::new()),
            hidden_count_changed: Signal::new(),
        }
    }

    /// Use a custom overflow calculator (e.g. a different reserve).
    pub fn with_calculator(mut self, calculator: OverflowCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    /// Use a custom resize monitor (e.g. a different throttle window).
    pub fn with_monitor(mut self, monitor: ResizeMonitor) -> Self {
        self.monitor = monitor;
        self
    }

    /// Share the host's defer queue instead of an internal one.
    ///
    /// Hosts that already drain one queue per loop turn should pass it
    /// here so the row's deferred notifications ride the same tick.
    pub fn with_defer_queue(mut self, defer: Arc<DeferQueue>) -> Self {
        self.defer = defer;
        self
    }

    /// The monitor driving the resize trigger.
    pub fn monitor(&self) -> &ResizeMonitor {
        &self.monitor
    }

    /// The calculator used by every pass.
    pub fn calculator(&self) -> &OverflowCalculator {
        &self.calculator
    }

    /// The defer queue carrying the row's redraw requests.
    pub fn defer_queue(&self) -> &Arc<DeferQueue> {
        &self.defer
    }

    /// Signal emitted (deferred, coalesced) after state changed.
    pub fn redraw_requested(&self) -> &Signal<()> {
        &self.redraw_requested
    }

    /// Number of chips hidden by the most recent pass.
    pub fn hidden_count(&self) -> usize {
        self.hidden_count
    }

    /// The most recent width a pass ran against.
    pub fn last_width(&self) -> f32 {
        self.last_width
    }

    /// Current recalculation state.
    pub fn state(&self) -> RowState {
        self.state
    }

    /// Start observing container resizes.
    ///
    /// Call once the container has first rendered.
    pub fn begin_observation(&mut self) -> Result<()> {
        self.monitor.start()
    }

    /// Resize trigger: feed one raw width sample.
    ///
    /// Runs a measurement pass if the monitor accepts the sample.
    pub fn container_resized(
        &mut self,
        width: f32,
        now: Instant,
        chips: &mut dyn ChipCollection,
    ) {
        if let Some(accepted) = self.monitor.offer(width, now) {
            self.recalculate(accepted, chips);
        }
    }

    /// Collection-change trigger: the rendered chip set changed.
    ///
    /// Reruns the pass at the last known width, catching chips whose
    /// rendering lagged the selection as well as added/removed entries.
    pub fn chips_changed(&mut self, chips: &mut dyn ChipCollection) {
        self.recalculate(self.last_width, chips);
    }

    /// Host-loop pump: call once per turn.
    ///
    /// Releases the throttle's trailing edge (running a pass when it
    /// yields a settled width) and then drains the defer queue, which
    /// delivers any pending redraw request.
    pub fn tick(&mut self, now: Instant, chips: &mut dyn ChipCollection) {
        if let Some(width) = self.monitor.flush(now) {
            self.recalculate(width, chips);
        }
        self.defer.run_pending();
    }

    /// Tear the row down before the host destroys the container.
    ///
    /// Stops observation, disarms any deferred notification in flight,
    /// and disconnects all listeners. Triggers after teardown are inert.
    pub fn tear_down(&mut self) {
        if self.monitor.is_observing() {
            // Cannot fail while observing.
            let _ = self.monitor.stop();
        }
        self.guard.revoke();
        self.redraw_requested.disconnect_all();
        self.hidden_count_changed.disconnect_all();
        tracing::trace!(target: "chipline::row", "chip row torn down");
    }

    /// One full measurement pass, synchronous and atomic.
    fn recalculate(&mut self, width: f32, chips: &mut dyn ChipCollection) {
        self.state = RowState::Measuring;
        self.last_width = width;

        let hidden = self.calculator.apply(width, chips);
        if hidden != self.hidden_count {
            self.hidden_count = hidden;
            self.hidden_count_changed.emit(hidden);
        }

        self.request_redraw();
        self.state = RowState::Idle;
    }

    /// Schedule the deferred, idempotent redraw notification.
    fn request_redraw(&self) {
        if self.redraw_pending.swap(true, Ordering::SeqCst) {
            // Already scheduled for the next drain.
            return;
        }

        let pending = self.redraw_pending.clone();
        let signal = self.redraw_requested.clone();
        self.defer.push_guarded(&self.guard, move || {
            pending.store(false, Ordering::SeqCst);
            signal.emit(());
        });
    }
}

impl Drop for ChipRow {
    fn drop(&mut self) {
        // DeferGuard revokes itself on drop; stopping the monitor here
        // keeps a forgotten tear_down from leaking an observation.
        if self.monitor.is_observing() {
            let _ = self.monitor.stop();
        }
    }
}
