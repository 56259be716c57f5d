#![forbid(unsafe_code)]

//! Windower for sequences of variable item height.
//!
//! Heights come from a [`SizeCache`]: measured where the host has
//! reported real layout sizes, the estimate everywhere else. Windows
//! computed over estimates are corrected one frame later when the
//! measurements arrive; that transient is expected behavior, not a
//! defect.
//!
//! # Cost model
//!
//! The start search and offset queries walk from the cache's cursor, so
//! a scroll tick moving by a few items costs O(delta). A scrollbar drag
//! or programmatic jump across the whole strip degrades to a linear
//! walk — a known scalability limit for sequences of tens of thousands
//! of items, accepted here and not optimized further.

use crate::size_cache::SizeCache;
use crate::window::{Window, clamp_scroll};

/// Computes render windows for items of varying height.
#[derive(Debug, Clone)]
pub struct DynamicWindower {
    cache: SizeCache,
}

impl DynamicWindower {
    /// Create a windower over `len` items, none measured yet, using
    /// `estimated_height` for every index until real sizes arrive.
    #[must_use]
    pub fn new(len: usize, estimated_height: f64) -> Self {
        Self {
            cache: SizeCache::new(len, estimated_height),
        }
    }

    /// The backing size cache.
    #[must_use]
    pub fn cache(&self) -> &SizeCache {
        &self.cache
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// The fallback height for unmeasured items.
    #[must_use]
    pub fn estimate(&self) -> f64 {
        self.cache.estimate()
    }

    /// Height of the whole content, estimates included.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.cache.total_height()
    }

    /// Store a measured height, returning the delta applied to the
    /// total. See [`SizeCache::record_height`].
    pub fn record_height(&mut self, index: usize, height: f64) -> f64 {
        self.cache.record_height(index, height)
    }

    /// Track a new sequence length. See [`SizeCache::resize`].
    pub fn resize(&mut self, new_len: usize) {
        self.cache.resize(new_len);
    }

    /// Drop every measurement. See [`SizeCache::invalidate`].
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// Compute the render window for the given scroll offset.
    ///
    /// The first realized index is the item under the (clamped) offset,
    /// widened upward by `overscan`. The window then grows downward
    /// until the accumulated bottom edge passes
    /// `scroll + viewport + estimate * overscan`, including the item
    /// whose top edge crosses that limit, clamped to the sequence.
    #[must_use]
    pub fn window(&self, scroll_offset: f64, viewport_height: f64, overscan: usize) -> Window {
        let len = self.cache.len();
        if len == 0 {
            return Window::EMPTY;
        }
        let total_height = self.cache.total_height();
        let scroll = clamp_scroll(scroll_offset, total_height, viewport_height);

        let start = self.cache.index_at(scroll).saturating_sub(overscan);
        let offset_y = self.cache.offset_of(start);
        let limit = scroll + viewport_height + self.cache.estimate() * overscan as f64;

        let mut end = start;
        let mut edge = offset_y;
        while end < len && edge < limit {
            edge += self.cache.height_of(end);
            end += 1;
        }
        // `end` is now the first index whose top edge reached the
        // limit; it is part of the window.
        let end = (end + 1).min(len);

        Window {
            start,
            end,
            offset_y,
            total_height,
        }
    }
}
