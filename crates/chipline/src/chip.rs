//! Chip data model: metrics, element capability, and collections.
//!
//! A chip is the rendered label for one selected item. The overflow
//! calculator never touches a rendering technology directly; it works
//! against [`ChipElement`], a small capability trait the rendering layer
//! implements, and [`ChipCollection`], the ordered, position-keyed set of
//! elements it iterates. Slots may be empty while rendering lags behind
//! the selection — empty slots are simply skipped for that pass.

/// Measured dimensions of a chip element.
///
/// Content width and horizontal margins are kept separate because the
/// rendering layer reports them separately; [`ChipMetrics::outer_width`]
/// combines them the way the overflow pass consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChipMetrics {
    /// Intrinsic content width in pixels.
    pub content_width: f32,
    /// Left margin in pixels.
    pub margin_left: f32,
    /// Right margin in pixels.
    pub margin_right: f32,
}

impl ChipMetrics {
    /// Zero-width metrics.
    pub const ZERO: Self = Self {
        content_width: 0.0,
        margin_left: 0.0,
        margin_right: 0.0,
    };

    /// Metrics with the given content width and no margins.
    pub fn new(content_width: f32) -> Self {
        Self {
            content_width,
            ..Self::ZERO
        }
    }

    /// Set both horizontal margins.
    pub fn with_margins(mut self, left: f32, right: f32) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self
    }

    /// The width a chip occupies in the row: ceiling of content width
    /// plus horizontal margins, clamped to zero.
    ///
    /// Rounding up avoids sub-pixel underestimation that would let a
    /// chip overflow visually while the accumulator believes it fits.
    /// The clamp keeps the running accumulator monotonic even if a
    /// stylesheet reports a negative margin.
    pub fn outer_width(&self) -> f32 {
        (self.content_width + self.margin_left + self.margin_right)
            .ceil()
            .max(0.0)
    }
}

/// The capability a rendered chip exposes to the overflow calculator.
///
/// Implementations wrap whatever the rendering layer uses for a chip —
/// a retained-mode widget, a DOM node handle, a terminal cell run — and
/// translate `set_visible` into that layer's display toggling.
pub trait ChipElement {
    /// Measure the chip. Only meaningful while the chip is visible; a
    /// hidden element has no measurable width, which is why the
    /// calculator shows a chip before measuring it.
    fn metrics(&self) -> ChipMetrics;

    /// Whether the chip is currently displayed.
    fn is_visible(&self) -> bool;

    /// Toggle the chip's display state.
    fn set_visible(&mut self, visible: bool);

    /// Show the chip.
    fn show(&mut self) {
        self.set_visible(true);
    }

    /// Hide the chip.
    fn hide(&mut self) {
        self.set_visible(false);
    }
}

/// A chip element whose metrics were measured up front.
///
/// Suitable for hosts that know chip dimensions at render time, and for
/// tests. Visibility is a plain flag.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredChip {
    metrics: ChipMetrics,
    visible: bool,
}

impl MeasuredChip {
    /// Create a visible chip with the given metrics.
    pub fn new(metrics: ChipMetrics) -> Self {
        Self {
            metrics,
            visible: true,
        }
    }

    /// Create a visible chip with the given content width and no margins.
    pub fn from_width(content_width: f32) -> Self {
        Self::new(ChipMetrics::new(content_width))
    }

    /// Replace the chip's metrics (e.g. after the label re-rendered).
    pub fn set_metrics(&mut self, metrics: ChipMetrics) {
        self.metrics = metrics;
    }
}

impl ChipElement for MeasuredChip {
    fn metrics(&self) -> ChipMetrics {
        self.metrics
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// The ordered chip set the overflow calculator iterates.
///
/// Indexed by selection position. `element_mut` returns `None` for a
/// position whose chip has not been rendered yet; the calculator skips
/// such slots for the pass and picks them up on the recalculation the
/// collection change triggers once they appear.
pub trait ChipCollection {
    /// Number of positions (rendered or not).
    fn len(&self) -> usize;

    /// Whether the collection has no positions.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The chip element at `index`, if one has been rendered.
    fn element_mut(&mut self, index: usize) -> Option<&mut dyn ChipElement>;
}

impl ChipCollection for Vec<MeasuredChip> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn ChipElement> {
        self.get_mut(index).map(|chip| chip as &mut dyn ChipElement)
    }
}

/// A position-keyed collection of optional [`MeasuredChip`]s.
///
/// This is the host-side default: one slot per selection entry, empty
/// until the rendering layer fills it in.
#[derive(Debug, Clone, Default)]
pub struct ChipSlots {
    slots: Vec<Option<MeasuredChip>>,
}

impl ChipSlots {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection with `len` empty slots.
    pub fn with_len(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    /// Resize to `len` positions, truncating or adding empty slots.
    pub fn resize(&mut self, len: usize) {
        self.slots.resize(len, None);
    }

    /// Append a rendered chip.
    pub fn push(&mut self, chip: MeasuredChip) {
        self.slots.push(Some(chip));
    }

    /// Append an empty slot (chip not rendered yet).
    pub fn push_empty(&mut self) {
        self.slots.push(None);
    }

    /// Fill the slot at `index`, growing the collection if needed.
    pub fn set(&mut self, index: usize, chip: MeasuredChip) {
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }
        self.slots[index] = Some(chip);
    }

    /// Empty the slot at `index`, keeping the position.
    pub fn clear_slot(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    /// The chip at `index`, if rendered.
    pub fn get(&self, index: usize) -> Option<&MeasuredChip> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    /// Number of rendered chips currently hidden.
    pub fn hidden_count(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|chip| !chip.is_visible())
            .count()
    }
}

impl ChipCollection for ChipSlots {
    fn len(&self) -> usize {
        self.slots.len()
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn ChipElement> {
        self.slots
            .get_mut(index)
            .and_then(|slot| slot.as_mut())
            .map(|chip| chip as &mut dyn ChipElement)
    }
}
