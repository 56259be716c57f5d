#![forbid(unsafe_code)]

//! The host-facing windowed list controller.
//!
//! [`WindowedList`] owns the per-viewport state — scroll offset,
//! viewport height, overscan, the height model, observer subscriptions —
//! and turns each frame's item slice into a [`RenderPlan`]: which rows
//! to realize, where to translate them, and how tall the spacer is. It
//! never owns or mutates the items; the host passes the current,
//! already-ordered slice on every render.
//!
//! Each list instance is fully independent: two windowed lists on
//! screen share no cache and no scroll state.

use windrow_core::{DynamicWindower, FixedWindower, Window};

use crate::observe::{MeasureEffect, ObserverBridge, SizeObservation};

/// Extra items realized beyond each edge of the strictly visible range,
/// unless the host overrides it. Hides pop-in during fast scrolling.
pub const DEFAULT_OVERSCAN: usize = 3;

/// Fallback height for unmeasured items in dynamic mode, unless the
/// host supplies one.
pub const DEFAULT_ESTIMATED_ITEM_HEIGHT: f64 = 80.0;

/// One realized row of a [`RenderPlan`].
#[derive(Debug, Clone, PartialEq)]
pub struct Row<S> {
    /// Index into the item sequence.
    pub index: usize,
    /// Host-stable identity from the key extractor, so the same logical
    /// item keeps its component-local state even after being windowed
    /// out and back in.
    pub key: String,
    /// Height to lay the row out at: the constant height in fixed mode
    /// (rows clip to it), the measured-or-estimated height in dynamic
    /// mode.
    pub height: f64,
    /// Whatever the host's `render_item` produced.
    pub surface: S,
}

/// Everything the host needs to realize one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan<S> {
    /// The computed window (indices, translation, content height).
    pub window: Window,
    /// Rows for `window.indices()`, in order.
    pub rows: Vec<Row<S>>,
}

impl<S> RenderPlan<S> {
    /// Height of the full-content spacer.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        self.window.total_height
    }

    /// Translation to apply to the realized rows inside the spacer.
    #[must_use]
    pub fn offset_y(&self) -> f64 {
        self.window.offset_y
    }
}

/// Height model, selected at construction the way the original host
/// selects a variant: a constant height, or an estimate refined by
/// measurement.
#[derive(Debug, Clone)]
enum Mode {
    Fixed(FixedWindower),
    Dynamic(DynamicWindower),
}

/// A windowed ("virtualized") list over items of type `T`.
pub struct WindowedList<T> {
    scroll_offset: f64,
    viewport_height: f64,
    overscan: usize,
    mode: Mode,
    bridge: ObserverBridge,
    window: Window,
    key_extractor: Box<dyn Fn(&T, usize) -> String>,
}

impl<T> std::fmt::Debug for WindowedList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowedList")
            .field("scroll_offset", &self.scroll_offset)
            .field("viewport_height", &self.viewport_height)
            .field("overscan", &self.overscan)
            .field("mode", &self.mode)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

impl<T> WindowedList<T> {
    /// Create a fixed-mode list: every item is `item_height` tall, no
    /// measurement happens, no observers are registered.
    ///
    /// `key_extractor` maps `(item, index)` to a stable identity and is
    /// required — there is no sensible default for item identity.
    #[must_use]
    pub fn fixed(
        viewport_height: f64,
        item_height: f64,
        key_extractor: impl Fn(&T, usize) -> String + 'static,
    ) -> Self {
        Self::with_mode(viewport_height, Mode::Fixed(FixedWindower::new(0, item_height)), key_extractor)
    }

    /// Create a dynamic-mode list: items start at `estimated_item_height`
    /// and are corrected as real measurements arrive through
    /// [`apply_measurements`](Self::apply_measurements).
    #[must_use]
    pub fn dynamic(
        viewport_height: f64,
        estimated_item_height: f64,
        key_extractor: impl Fn(&T, usize) -> String + 'static,
    ) -> Self {
        Self::with_mode(
            viewport_height,
            Mode::Dynamic(DynamicWindower::new(0, estimated_item_height)),
            key_extractor,
        )
    }

    fn with_mode(
        viewport_height: f64,
        mode: Mode,
        key_extractor: impl Fn(&T, usize) -> String + 'static,
    ) -> Self {
        Self {
            scroll_offset: 0.0,
            viewport_height,
            overscan: DEFAULT_OVERSCAN,
            mode,
            bridge: ObserverBridge::new(),
            window: Window::EMPTY,
            key_extractor: Box::new(key_extractor),
        }
    }

    /// Set the overscan (0 disables it).
    #[must_use]
    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Current overscan.
    #[must_use]
    pub fn overscan(&self) -> usize {
        self.overscan
    }

    /// Whether heights come from measurements rather than a constant.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        matches!(self.mode, Mode::Dynamic(_))
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Record the viewport's scroll position. Negative offsets clamp to
    /// 0 immediately; the upper bound is clamped at render time against
    /// the then-current content height, so a sequence shrink between
    /// events self-corrects on the next recomputation.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = offset.max(0.0);
    }

    /// Current viewport height.
    #[must_use]
    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Update the viewport height (container resize).
    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height.max(0.0);
    }

    /// Content height as of the last render.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        match &self.mode {
            Mode::Fixed(windower) => windower.total_height(),
            Mode::Dynamic(windower) => windower.total_height(),
        }
    }

    /// The most recently computed window.
    #[must_use]
    pub fn window(&self) -> Window {
        self.window
    }

    /// Drop every measurement. The host calls this when item identities
    /// changed incompatibly (e.g. a filter change reusing indices for
    /// different logical items); the engine never guesses staleness
    /// from the slice it is handed.
    pub fn invalidate_measurements(&mut self) {
        if let Mode::Dynamic(windower) = &mut self.mode {
            windower.invalidate();
        }
    }

    /// Compute the window for `items` at the current scroll offset and
    /// realize its rows through `render_item`.
    ///
    /// Safe to call many times per frame: recomputation is idempotent,
    /// and observer subscriptions are only diffed, never re-issued. In
    /// dynamic mode every realized index gets a size-observation
    /// subscription and every departed index is released; fixed mode
    /// registers no observers at all.
    pub fn render<S>(
        &mut self,
        items: &[T],
        mut render_item: impl FnMut(&T, usize) -> S,
        observer: &mut dyn SizeObservation<S>,
    ) -> RenderPlan<S> {
        match &mut self.mode {
            Mode::Fixed(windower) => windower.set_len(items.len()),
            Mode::Dynamic(windower) => windower.resize(items.len()),
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "render_plan",
            items = items.len(),
            scroll = self.scroll_offset,
            viewport = self.viewport_height,
            overscan = self.overscan,
        )
        .entered();

        self.window = match &self.mode {
            Mode::Fixed(windower) => {
                windower.window(self.scroll_offset, self.viewport_height, self.overscan)
            }
            Mode::Dynamic(windower) => {
                windower.window(self.scroll_offset, self.viewport_height, self.overscan)
            }
        };

        let mut rows = Vec::with_capacity(self.window.len());
        for index in self.window.indices() {
            let item = &items[index];
            let height = match &self.mode {
                Mode::Fixed(windower) => windower.item_height(),
                Mode::Dynamic(windower) => windower.cache().height_of(index),
            };
            rows.push(Row {
                index,
                key: (self.key_extractor)(item, index),
                height,
                surface: render_item(item, index),
            });
        }

        if self.is_dynamic() {
            self.bridge.sync(&rows, observer);
        }

        RenderPlan {
            window: self.window,
            rows,
        }
    }

    /// Feed a batch of `(index, height)` size-change reports back into
    /// the height model (dynamic mode only; a fixed list has nothing to
    /// measure and reports [`MeasureEffect::Unchanged`]).
    ///
    /// Returns what the batch changed so the host can schedule the
    /// right amount of work: nothing, a spacer/scrollbar update, or a
    /// re-render of a recomputed window (already recomputed here and
    /// visible via [`window`](Self::window)).
    pub fn apply_measurements(&mut self, entries: &[(usize, f64)]) -> MeasureEffect {
        match &mut self.mode {
            Mode::Fixed(_) => MeasureEffect::Unchanged,
            Mode::Dynamic(windower) => {
                let effect = self.bridge.apply(entries, windower, &self.window);
                if effect == MeasureEffect::Window {
                    self.window =
                        windower.window(self.scroll_offset, self.viewport_height, self.overscan);
                }
                effect
            }
        }
    }
}
