//! Selection model: the ordered list of selected labels.
//!
//! Insertion order is display order. The model is owned by the host
//! widget; the chip row only reads it. Every mutation emits [`changed`]
//! with the new length so the host can re-render its chip elements and
//! feed the collection change back into the row.
//!
//! [`changed`]: SelectionModel::changed

use chipline_core::Signal;

/// An ordered list of selected item labels.
#[derive(Default)]
pub struct SelectionModel {
    items: Vec<String>,

    /// Emitted after every mutation, carrying the new item count.
    pub changed: Signal<usize>,
}

impl SelectionModel {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection with initial items. No signal is emitted.
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            changed: Signal::new(),
        }
    }

    /// The selected labels in display order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of selected items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the selection is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `label` is currently selected.
    pub fn contains(&self, label: &str) -> bool {
        self.items.iter().any(|item| item == label)
    }

    /// Append a label to the selection.
    pub fn push(&mut self, label: impl Into<String>) {
        self.items.push(label.into());
        self.changed.emit(self.items.len());
    }

    /// Remove the first occurrence of `label`.
    ///
    /// Returns `true` if the label was selected.
    pub fn remove(&mut self, label: &str) -> bool {
        let Some(index) = self.items.iter().position(|item| item == label) else {
            return false;
        };
        self.items.remove(index);
        self.changed.emit(self.items.len());
        true
    }

    /// Remove the label at `index`, if in bounds.
    pub fn remove_at(&mut self, index: usize) -> Option<String> {
        if index >= self.items.len() {
            return None;
        }
        let label = self.items.remove(index);
        self.changed.emit(self.items.len());
        Some(label)
    }

    /// Replace the whole selection.
    pub fn set_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self.changed.emit(self.items.len());
    }

    /// Remove all items.
    pub fn clear(&mut self) {
        self.items.clear();
        self.changed.emit(0);
    }
}
