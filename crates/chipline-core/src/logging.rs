//! Logging facilities for Chipline.
//!
//! Chipline instruments itself with the `tracing` crate. The library
//! never installs a subscriber; the host application does:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! All events are emitted at `trace` level under the targets listed in
//! [`targets`], so a filter like
//! `RUST_LOG=chipline::overflow=trace` surfaces just the measurement
//! passes.

/// Target names used for log filtering across the Chipline crates.
pub mod targets {
    /// Core crate umbrella target.
    pub const CORE: &str = "chipline_core";
    /// Signal/slot system.
    pub const SIGNAL: &str = "chipline_core::signal";
    /// Deferred invocation queue.
    pub const DEFER: &str = "chipline_core::defer";
    /// Resize monitor (distinct + throttle pipeline).
    pub const MONITOR: &str = "chipline::monitor";
    /// Overflow measurement passes.
    pub const OVERFLOW: &str = "chipline::overflow";
    /// Chip row trigger wiring.
    pub const ROW: &str = "chipline::row";
}
