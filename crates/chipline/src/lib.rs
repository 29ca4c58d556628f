//! Multi-select chip row with overflow collapse.
//!
//! Selected items render as inline "chip" labels; when the container is
//! too narrow for all of them, trailing chips are hidden and summarized
//! by a "+N" counter. This crate owns the decision of *how many fit* —
//! correct and flicker-free across container resizes and selection
//! changes — and leaves rendering to the host behind small traits.
//!
//! # Pieces
//!
//! - [`SelectionModel`] — the ordered label list, change-signalled
//! - [`ChipElement`] / [`ChipCollection`] — the capabilities the
//!   rendering layer exposes: measure a chip, toggle its display
//! - [`ResizeMonitor`] — distinct + leading/trailing throttled width
//!   events for the container
//! - [`OverflowCalculator`] — the measurement pass
//! - [`ChipRow`] — glue: both trigger paths converge on one calculation,
//!   outputs a hidden count and a deferred redraw request
//!
//! # Wiring sketch
//!
//! ```
//! use std::time::Instant;
//! use chipline::{ChipRow, ChipSlots, MeasuredChip, SelectionModel};
//!
//! let mut selection = SelectionModel::from_items(["Martha", "Liam", "Olivia"]);
//! let mut chips = ChipSlots::new();
//! for _ in selection.items() {
//!     chips.push(MeasuredChip::from_width(72.0));
//! }
//!
//! let mut row = ChipRow::new();
//! row.begin_observation()?;
//!
//! // Host resize observation feeds raw samples:
//! row.container_resized(320.0, Instant::now(), &mut chips);
//!
//! // Selection changed -> chips re-rendered -> collection trigger:
//! selection.push("Noah");
//! chips.push(MeasuredChip::from_width(64.0));
//! row.chips_changed(&mut chips);
//!
//! // Once per host-loop turn:
//! row.tick(Instant::now(), &mut chips);
//! println!("+{} badge", row.hidden_count());
//! # Ok::<(), chipline::Error>(())
//! ```

mod chip;
mod error;
mod monitor;
mod overflow;
mod row;
mod selection;

pub use chip::{ChipCollection, ChipElement, ChipMetrics, ChipSlots, MeasuredChip};
pub use error::{Error, Result};
pub use monitor::{ResizeMonitor, DEFAULT_THROTTLE_WINDOW};
pub use overflow::{OverflowCalculator, DEFAULT_RESERVED_WIDTH};
pub use row::{ChipRow, RowState};
pub use selection::SelectionModel;

// Re-export the signal types that appear in this crate's public API.
pub use chipline_core::{ConnectionGuard, ConnectionId, DeferQueue, Signal};
