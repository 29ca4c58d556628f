//! Resize monitor: a deduplicated, rate-limited stream of widths.
//!
//! The host's size-observation facility reports every content-box width
//! sample for the container; during a continuous drag-resize that can be
//! hundreds of samples per second. The monitor filters them in two
//! stages before a sample is allowed to trigger a measurement pass:
//!
//! 1. **Distinct by last seen value** — a sample equal to the previous
//!    one is dropped.
//! 2. **Throttle (leading + trailing)** — the first sample in a time
//!    window passes immediately for responsiveness; later samples in the
//!    same window are held, and the last of them is released when the
//!    window closes, so the settled width is never lost.
//!
//! Time is injected: [`offer`] and [`flush`] take the current
//! [`Instant`], which keeps behavior deterministic under test and lets
//! the host loop decide when "now" is. The host pumps [`flush`] once per
//! loop turn (or schedules it with [`time_until_flush`]).
//!
//! [`offer`]: ResizeMonitor::offer
//! [`flush`]: ResizeMonitor::flush
//! [`time_until_flush`]: ResizeMonitor::time_until_flush

use std::time::{Duration, Instant};

use chipline_core::Signal;

use crate::error::{Error, Result};

/// Default throttle window applied between accepted widths.
pub const DEFAULT_THROTTLE_WINDOW: Duration = Duration::from_millis(20);

/// Filters raw container-width samples into accepted width events.
///
/// The monitor is a lazy, non-restartable pipeline: it produces widths
/// for as long as observation is active and holds no history beyond the
/// last seen value and the pending trailing sample.
pub struct ResizeMonitor {
    /// Throttle window length.
    window: Duration,
    /// Whether observation is active.
    observing: bool,
    /// Last sample seen by the distinct stage.
    last_seen: Option<f32>,
    /// Start of the current throttle window, if one is open.
    window_start: Option<Instant>,
    /// Most recent sample held back by the throttle.
    trailing: Option<f32>,

    /// Emitted for every accepted width.
    pub width_changed: Signal<f32>,
}

impl Default for ResizeMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ResizeMonitor {
    /// Create a monitor with the default 20 ms throttle window.
    pub fn new() -> Self {
        Self::with_window(DEFAULT_THROTTLE_WINDOW)
    }

    /// Create a monitor with a custom throttle window.
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            observing: false,
            last_seen: None,
            window_start: None,
            trailing: None,
            width_changed: Signal::new(),
        }
    }

    /// The configured throttle window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether the monitor is currently observing.
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Begin observation. Call once the container has first rendered.
    pub fn start(&mut self) -> Result<()> {
        if self.observing {
            return Err(Error::AlreadyObserving);
        }
        self.observing = true;
        tracing::trace!(target: "chipline::monitor", "observation started");
        Ok(())
    }

    /// Stop observation and drop all pipeline state.
    ///
    /// Must be called before the host detaches or destroys the observed
    /// element; samples offered afterwards are ignored.
    pub fn stop(&mut self) -> Result<()> {
        if !self.observing {
            return Err(Error::NotObserving);
        }
        self.observing = false;
        self.last_seen = None;
        self.window_start = None;
        self.trailing = None;
        tracing::trace!(target: "chipline::monitor", "observation stopped");
        Ok(())
    }

    /// Feed one raw width sample into the pipeline.
    ///
    /// Returns the accepted width if the sample passed both filter
    /// stages (the leading edge of a throttle window). A sample held for
    /// the trailing edge is surfaced by a later [`flush`].
    ///
    /// [`flush`]: ResizeMonitor::flush
    pub fn offer(&mut self, width: f32, now: Instant) -> Option<f32> {
        if !self.observing {
            return None;
        }

        if self.last_seen == Some(width) {
            tracing::trace!(target: "chipline::monitor", width, "duplicate width dropped");
            return None;
        }
        self.last_seen = Some(width);

        match self.window_start {
            Some(start) if now < start + self.window => {
                // Inside an open window: hold for the trailing edge.
                self.trailing = Some(width);
                None
            }
            _ => {
                self.window_start = Some(now);
                self.trailing = None;
                Some(self.accept(width))
            }
        }
    }

    /// Release the trailing edge of the throttle, if it is due.
    ///
    /// Returns the held width when the current window has closed and a
    /// sample arrived during it. Releasing opens a fresh window so a
    /// burst of samples settles at one emission per window.
    pub fn flush(&mut self, now: Instant) -> Option<f32> {
        let start = self.window_start?;
        if now < start + self.window {
            return None;
        }

        match self.trailing.take() {
            Some(width) => {
                self.window_start = Some(now);
                Some(self.accept(width))
            }
            None => {
                // Window elapsed with nothing held: next offer leads again.
                self.window_start = None;
                None
            }
        }
    }

    /// How long until [`flush`] would release a held sample.
    ///
    /// `None` when nothing is held. A host loop can use this to schedule
    /// its next wakeup instead of polling.
    ///
    /// [`flush`]: ResizeMonitor::flush
    pub fn time_until_flush(&self, now: Instant) -> Option<Duration> {
        let start = self.window_start?;
        self.trailing?;
        Some((start + self.window).saturating_duration_since(now))
    }

    fn accept(&mut self, width: f32) -> f32 {
        tracing::trace!(target: "chipline::monitor", width, "width accepted");
        self.width_changed.emit(width);
        width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> ResizeMonitor {
        let mut monitor = ResizeMonitor::new();
        monitor.start().unwrap();
        monitor
    }

    #[test]
    fn test_first_sample_passes_on_leading_edge() {
        let mut monitor = started();
        let t0 = Instant::now();

        assert_eq!(monitor.offer(300.0, t0), Some(300.0));
    }

    #[test]
    fn test_duplicate_width_dropped() {
        let mut monitor = started();
        let t0 = Instant::now();

        assert_eq!(monitor.offer(300.0, t0), Some(300.0));
        assert_eq!(monitor.offer(300.0, t0 + Duration::from_millis(1)), None);
        // The duplicate left nothing pending for the trailing edge.
        assert_eq!(monitor.flush(t0 + Duration::from_millis(25)), None);
    }

    #[test]
    fn test_burst_settles_to_leading_plus_trailing() {
        let mut monitor = started();
        let t0 = Instant::now();

        // 200, 200, 201, 205 inside one window.
        assert_eq!(monitor.offer(200.0, t0), Some(200.0));
        assert_eq!(monitor.offer(200.0, t0 + Duration::from_millis(2)), None);
        assert_eq!(monitor.offer(201.0, t0 + Duration::from_millis(3)), None);
        assert_eq!(monitor.offer(205.0, t0 + Duration::from_millis(4)), None);

        // Nothing due while the window is open.
        assert_eq!(monitor.flush(t0 + Duration::from_millis(10)), None);

        // The final settled width is released on the trailing edge.
        assert_eq!(monitor.flush(t0 + Duration::from_millis(25)), Some(205.0));
        assert_eq!(monitor.flush(t0 + Duration::from_millis(50)), None);
    }

    #[test]
    fn test_sample_after_elapsed_window_leads_again() {
        let mut monitor = started();
        let t0 = Instant::now();

        assert_eq!(monitor.offer(300.0, t0), Some(300.0));
        assert_eq!(monitor.flush(t0 + Duration::from_millis(25)), None);

        // New window: immediate acceptance.
        assert_eq!(
            monitor.offer(320.0, t0 + Duration::from_millis(30)),
            Some(320.0)
        );
    }

    #[test]
    fn test_time_until_flush() {
        let mut monitor = started();
        let t0 = Instant::now();

        assert_eq!(monitor.time_until_flush(t0), None);

        monitor.offer(300.0, t0);
        // Leading emission with nothing held: no flush scheduled.
        assert_eq!(monitor.time_until_flush(t0), None);

        monitor.offer(305.0, t0 + Duration::from_millis(5));
        assert_eq!(
            monitor.time_until_flush(t0 + Duration::from_millis(5)),
            Some(Duration::from_millis(15))
        );
        assert_eq!(
            monitor.time_until_flush(t0 + Duration::from_millis(30)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_samples_ignored_while_not_observing() {
        let mut monitor = ResizeMonitor::new();
        assert_eq!(monitor.offer(300.0, Instant::now()), None);
    }

    #[test]
    fn test_stop_clears_pipeline_state() {
        let mut monitor = started();
        let t0 = Instant::now();

        monitor.offer(300.0, t0);
        monitor.offer(310.0, t0 + Duration::from_millis(5));
        monitor.stop().unwrap();

        // Held trailing sample is gone.
        monitor.start().unwrap();
        assert_eq!(monitor.flush(t0 + Duration::from_millis(50)), None);

        // Distinct state is gone too: the old width is accepted fresh.
        assert_eq!(
            monitor.offer(300.0, t0 + Duration::from_millis(60)),
            Some(300.0)
        );
    }

    #[test]
    fn test_lifecycle_misuse_errors() {
        let mut monitor = ResizeMonitor::new();
        assert_eq!(monitor.stop(), Err(Error::NotObserving));

        monitor.start().unwrap();
        assert_eq!(monitor.start(), Err(Error::AlreadyObserving));

        monitor.stop().unwrap();
        assert_eq!(monitor.stop(), Err(Error::NotObserving));
    }

    #[test]
    fn test_accepted_widths_emit_signal() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let mut monitor = started();
        let accepted = Arc::new(AtomicUsize::new(0));

        let accepted_clone = accepted.clone();
        monitor.width_changed.connect(move |_| {
            accepted_clone.fetch_add(1, Ordering::SeqCst);
        });

        let t0 = Instant::now();
        monitor.offer(200.0, t0);
        monitor.offer(201.0, t0 + Duration::from_millis(2));
        monitor.flush(t0 + Duration::from_millis(25));

        assert_eq!(accepted.load(Ordering::SeqCst), 2);
    }
}
