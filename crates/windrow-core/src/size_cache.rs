#![forbid(unsafe_code)]

//! Per-index measured heights with an estimate fallback.
//!
//! The cache stores one `Option<f64>` per index: `None` means "not yet
//! measured" and falls back to the estimate; a measured height of 0 is a
//! legal value (collapsed rows), distinct from unmeasured — absence is
//! the sentinel, never a number.
//!
//! # Cost model
//!
//! Totals are maintained incrementally: every mutation moves the running
//! total by exactly the delta it introduces, and the full sum is never
//! recomputed by rescanning. Offset queries keep a `{index, offset}`
//! cursor from the most recent query and walk forward or backward from
//! it, so the scroll common case (small deltas) costs O(delta); a large
//! jump degrades to a linear walk. The cursor is a query memo held in a
//! `Cell`, not observable state, so lookups stay `&self`.

use std::cell::Cell;

/// Memoized prefix-sum position: top edge of `index` is `offset`.
#[derive(Debug, Clone, Copy)]
struct OffsetCursor {
    index: usize,
    offset: f64,
}

const CURSOR_START: OffsetCursor = OffsetCursor {
    index: 0,
    offset: 0.0,
};

/// Measured heights for a sequence of items, with an estimate for
/// indices not yet measured.
#[derive(Debug, Clone)]
pub struct SizeCache {
    /// Measured heights; `None` = unmeasured, falls back to `estimate`.
    measured: Vec<Option<f64>>,
    /// Fallback height for unmeasured indices.
    estimate: f64,
    /// Running sum of `height_of(i)` over all indices.
    total: f64,
    /// Last prefix-sum query position.
    cursor: Cell<OffsetCursor>,
}

impl SizeCache {
    /// Create a cache for `len` items, all unmeasured.
    ///
    /// A negative estimate is clamped to 0 (heights are non-negative).
    #[must_use]
    pub fn new(len: usize, estimate: f64) -> Self {
        let estimate = estimate.max(0.0);
        Self {
            measured: vec![None; len],
            estimate,
            total: len as f64 * estimate,
            cursor: Cell::new(CURSOR_START),
        }
    }

    /// Number of indices tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.measured.len()
    }

    /// Whether the cache tracks no indices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.measured.is_empty()
    }

    /// The fallback height for unmeasured indices.
    #[must_use]
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Whether `index` holds a measured height.
    #[must_use]
    pub fn is_measured(&self, index: usize) -> bool {
        self.measured.get(index).is_some_and(Option::is_some)
    }

    /// Height of `index`: the measured value if present, else the
    /// estimate. Out-of-range indices report the estimate (a sequence
    /// can shrink between a scheduled recomputation and its execution).
    #[must_use]
    pub fn height_of(&self, index: usize) -> f64 {
        self.measured
            .get(index)
            .map_or(self.estimate, |m| m.unwrap_or(self.estimate))
    }

    /// Height of the whole content, estimates included.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.total
    }

    /// Store the measured height for `index`, returning the delta this
    /// applies to the total so callers can shift any dependent sums
    /// without rescanning.
    ///
    /// Negative heights clamp to 0. An index at or past the end is
    /// ignored (returns 0): the next recomputation, triggered by the
    /// length change that caused it, corrects the window.
    pub fn record_height(&mut self, index: usize, height: f64) -> f64 {
        if index >= self.measured.len() {
            return 0.0;
        }
        let height = height.max(0.0);
        let previous = self.measured[index].unwrap_or(self.estimate);
        self.measured[index] = Some(height);
        let delta = height - previous;
        self.total += delta;

        // The cursor's offset is the sum of heights before its index, so
        // a change strictly above it shifts it by the same delta.
        let mut cursor = self.cursor.get();
        if index < cursor.index {
            cursor.offset += delta;
            self.cursor.set(cursor);
        }
        delta
    }

    /// Top edge of `index` in content coordinates: the sum of
    /// `height_of(k)` for `k < index`. `offset_of(len)` is the total;
    /// indices past the end clamp there.
    #[must_use]
    pub fn offset_of(&self, index: usize) -> f64 {
        let target = index.min(self.measured.len());
        let mut cursor = self.cursor.get();
        while cursor.index < target {
            cursor.offset += self.height_raw(cursor.index);
            cursor.index += 1;
        }
        while cursor.index > target {
            cursor.index -= 1;
            cursor.offset -= self.height_raw(cursor.index);
        }
        self.cursor.set(cursor);
        cursor.offset
    }

    /// Largest index whose top edge is at or above `offset` — the first
    /// item visible when scrolled to `offset`. An offset landing exactly
    /// on an item boundary selects that item (floor semantics). Clamped
    /// to `[0, len - 1]`; 0 for an empty cache.
    #[must_use]
    pub fn index_at(&self, offset: f64) -> usize {
        let len = self.measured.len();
        if len == 0 {
            return 0;
        }
        let offset = offset.max(0.0);
        let mut cursor = self.cursor.get();
        while cursor.index > 0 && (cursor.index >= len || cursor.offset > offset) {
            cursor.index -= 1;
            cursor.offset -= self.height_raw(cursor.index);
        }
        while cursor.index + 1 < len && cursor.offset + self.height_raw(cursor.index) <= offset {
            cursor.offset += self.height_raw(cursor.index);
            cursor.index += 1;
        }
        self.cursor.set(cursor);
        cursor.index
    }

    /// Track a new sequence length. Growth adds unmeasured indices at
    /// the estimate; shrinking removes exactly the dropped indices'
    /// contributions. Surviving measurements are kept — stale values are
    /// corrected on re-measurement, which beats flicker.
    pub fn resize(&mut self, new_len: usize) {
        let old_len = self.measured.len();
        if new_len == old_len {
            return;
        }
        if new_len > old_len {
            self.total += (new_len - old_len) as f64 * self.estimate;
            self.measured.resize(new_len, None);
        } else {
            for index in new_len..old_len {
                self.total -= self.measured[index].unwrap_or(self.estimate);
            }
            self.measured.truncate(new_len);
            if self.cursor.get().index > new_len {
                self.cursor.set(CURSOR_START);
            }
        }
    }

    /// Drop every measurement, keeping the length. Used when the host
    /// signals that item identity changed incompatibly (index reuse for
    /// different logical items).
    pub fn invalidate(&mut self) {
        self.measured.fill(None);
        self.total = self.measured.len() as f64 * self.estimate;
        self.cursor.set(CURSOR_START);
    }

    /// Height of an in-range index without the bounds fallback.
    fn height_raw(&self, index: usize) -> f64 {
        self.measured[index].unwrap_or(self.estimate)
    }
}
