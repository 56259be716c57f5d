#![forbid(unsafe_code)]

//! Windower for sequences of uniform item height.
//!
//! With one constant height the window is pure arithmetic: no cache, no
//! measurement, `offset(i) = i * h` and `total = len * h`.

use crate::window::{Window, clamp_scroll};

/// Computes render windows for items of one known, constant height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWindower {
    item_height: f64,
    len: usize,
}

impl FixedWindower {
    /// Create a windower over `len` items of `item_height` logical pixels.
    ///
    /// A non-positive height is degenerate; such a windower reports zero
    /// extent and realizes nothing.
    #[must_use]
    pub fn new(len: usize, item_height: f64) -> Self {
        Self { item_height, len }
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The constant per-item height.
    #[must_use]
    pub fn item_height(&self) -> f64 {
        self.item_height
    }

    /// Update the sequence length (the host passes each frame's length).
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
    }

    /// Height of the whole content.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        if self.item_height <= 0.0 {
            return 0.0;
        }
        self.len as f64 * self.item_height
    }

    /// Top edge of `index` in content coordinates (clamped to the end).
    #[must_use]
    pub fn offset_of(&self, index: usize) -> f64 {
        if self.item_height <= 0.0 {
            return 0.0;
        }
        index.min(self.len) as f64 * self.item_height
    }

    /// Compute the render window for the given scroll offset.
    ///
    /// The first realized index is the item whose extent contains the
    /// (clamped) offset, widened upward by `overscan`; an offset landing
    /// exactly on an item boundary starts at that item (floor, not
    /// round). The window covers `ceil(viewport / h)` visible items plus
    /// `overscan` on each side, clamped to the sequence bounds.
    #[must_use]
    pub fn window(&self, scroll_offset: f64, viewport_height: f64, overscan: usize) -> Window {
        if self.len == 0 || self.item_height <= 0.0 {
            return Window::EMPTY;
        }
        let total_height = self.total_height();
        let scroll = clamp_scroll(scroll_offset, total_height, viewport_height);

        let visible_count = (viewport_height / self.item_height).ceil() as usize;
        let start = ((scroll / self.item_height).floor() as usize).saturating_sub(overscan);
        let last = (start + visible_count + 2 * overscan).min(self.len - 1);

        Window {
            start,
            end: last + 1,
            offset_y: start as f64 * self.item_height,
            total_height,
        }
    }
}
