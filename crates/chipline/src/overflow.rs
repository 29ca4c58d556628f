//! Overflow calculator: decides chip visibility for a container width.
//!
//! One measurement pass walks the chips in selection order, accumulating
//! their outer widths against the available budget. The first chip that
//! pushes the accumulator past the budget is hidden, and because the
//! accumulator keeps growing, every chip after it fails the same
//! comparison: the cutoff is monotonic, with no gaps and no re-showing
//! of later chips that would individually fit.
//!
//! A fixed reserve is subtracted from the container width up front so
//! the "+N" badge and the input affordance always have room; the badge
//! itself can never be crowded out by the chips it summarizes.

use crate::chip::ChipCollection;

/// Width reserved for the "+N" badge and input affordance, in pixels.
pub const DEFAULT_RESERVED_WIDTH: f32 = 85.0;

/// Computes per-chip visibility and the hidden count for a given width.
///
/// The calculator is stateless between passes; for identical inputs
/// (width, chip metrics, slot occupancy) it produces identical output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverflowCalculator {
    reserved: f32,
}

impl Default for OverflowCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl OverflowCalculator {
    /// Create a calculator with the default reserved width.
    pub fn new() -> Self {
        Self {
            reserved: DEFAULT_RESERVED_WIDTH,
        }
    }

    /// Create a calculator with a custom reserved width.
    pub fn with_reserved(reserved: f32) -> Self {
        Self { reserved }
    }

    /// The reserved width subtracted from every budget.
    pub fn reserved(&self) -> f32 {
        self.reserved
    }

    /// Run one measurement pass over `chips` for container `width`.
    ///
    /// Each rendered chip is first forced visible — a hidden element has
    /// no measurable width — then measured and tested against the
    /// remaining budget. Chips past the cutoff are hidden in place.
    /// Slots without a rendered chip are skipped: they contribute
    /// neither width nor hidden count this pass and are picked up by the
    /// recalculation their eventual rendering triggers.
    ///
    /// Returns the number of chips hidden. If `width` does not exceed
    /// the reserve, every rendered chip ends up hidden.
    pub fn apply(&self, width: f32, chips: &mut dyn ChipCollection) -> usize {
        let budget = width - self.reserved;
        let mut accumulated = 0.0_f32;
        let mut hidden = 0_usize;

        for index in 0..chips.len() {
            let Some(chip) = chips.element_mut(index) else {
                continue;
            };

            chip.set_visible(true);
            accumulated += chip.metrics().outer_width();

            if accumulated > budget {
                chip.set_visible(false);
                hidden += 1;
            }
        }

        tracing::trace!(
            target: "chipline::overflow",
            width,
            budget,
            hidden,
            "overflow pass complete"
        );
        hidden
    }
}
