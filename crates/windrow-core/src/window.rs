#![forbid(unsafe_code)]

//! The render window shared by the fixed and dynamic windowers.

use std::ops::Range;

/// A computed render window over an item sequence.
///
/// `start..end` is the half-open index range to realize: the strictly
/// visible range widened by overscan and clamped to the sequence bounds.
/// `offset_y` is the translation to apply to the realized slice so it
/// lands at its true position inside a spacer of height `total_height`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Window {
    /// First index to realize.
    pub start: usize,
    /// One past the last index to realize.
    pub end: usize,
    /// Top edge of `start` in content coordinates.
    pub offset_y: f64,
    /// Height of the whole content (spacer/scrollbar length).
    pub total_height: f64,
}

impl Window {
    /// The window of an empty sequence: nothing to realize, zero extent.
    pub const EMPTY: Self = Self {
        start: 0,
        end: 0,
        offset_y: 0.0,
        total_height: 0.0,
    };

    /// Number of indices in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the window realizes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `index` is realized by this window.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// The realized index range.
    #[must_use]
    pub fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The last realized index, if any.
    #[must_use]
    pub fn last_included(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.end - 1)
        }
    }

    /// Whether a height change at `index` can shift this window.
    ///
    /// A change inside or above the window moves the window's pixel
    /// position (its index bounds may or may not move), so the window
    /// must be recomputed. A change strictly below the window only
    /// stretches the total content height.
    #[must_use]
    pub fn affected_by_height_change(&self, index: usize) -> bool {
        index < self.end
    }
}

/// Clamp a scroll offset into `[0, total_height - viewport_height]`.
///
/// Scroll containers report transient out-of-bound offsets during
/// rubber-band and overscroll animations; those are clamped silently
/// rather than surfaced as errors. Content shorter than the viewport
/// clamps to 0.
#[must_use]
pub fn clamp_scroll(scroll_offset: f64, total_height: f64, viewport_height: f64) -> f64 {
    let max = (total_height - viewport_height).max(0.0);
    scroll_offset.max(0.0).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ─── Window accessors ─────────────────────────────────────────

    #[test]
    fn empty_window() {
        let w = Window::EMPTY;
        assert!(w.is_empty());
        assert_eq!(w.len(), 0);
        assert_eq!(w.last_included(), None);
        assert!(!w.contains(0));
    }

    #[test]
    fn default_is_empty() {
        assert_eq!(Window::default(), Window::EMPTY);
    }

    #[test]
    fn contains_and_len() {
        let w = Window {
            start: 8,
            end: 19,
            offset_y: 400.0,
            total_height: 5000.0,
        };
        assert_eq!(w.len(), 11);
        assert!(w.contains(8));
        assert!(w.contains(18));
        assert!(!w.contains(19));
        assert!(!w.contains(7));
        assert_eq!(w.last_included(), Some(18));
        assert_eq!(w.indices(), 8..19);
    }

    // ─── Height-change impact rule ────────────────────────────────

    #[test]
    fn height_change_above_or_inside_window_shifts_it() {
        let w = Window {
            start: 10,
            end: 20,
            offset_y: 500.0,
            total_height: 5000.0,
        };
        assert!(w.affected_by_height_change(0)); // above
        assert!(w.affected_by_height_change(10)); // first realized
        assert!(w.affected_by_height_change(19)); // last realized
        assert!(!w.affected_by_height_change(20)); // strictly below
        assert!(!w.affected_by_height_change(99));
    }

    // ─── Scroll clamping ──────────────────────────────────────────

    #[test]
    fn clamp_negative_offset() {
        assert_eq!(clamp_scroll(-120.0, 5000.0, 300.0), 0.0);
    }

    #[test]
    fn clamp_past_end() {
        assert_eq!(clamp_scroll(10_000.0, 5000.0, 300.0), 4700.0);
    }

    #[test]
    fn clamp_in_range_is_identity() {
        assert_eq!(clamp_scroll(505.0, 5000.0, 300.0), 505.0);
    }

    #[test]
    fn clamp_short_content() {
        // Content shorter than the viewport pins the offset to 0.
        assert_eq!(clamp_scroll(40.0, 100.0, 300.0), 0.0);
        assert_eq!(clamp_scroll(-40.0, 100.0, 300.0), 0.0);
    }
}
