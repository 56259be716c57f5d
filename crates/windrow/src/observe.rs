#![forbid(unsafe_code)]

//! Size-change observation bridge.
//!
//! Variable-height rows report their real size only after the host's
//! layout pass. The bridge keeps one size-observation subscription per
//! currently realized index — subscribed when the index enters the
//! window, released the moment it leaves, so observers never accumulate
//! across scroll — and feeds reported measurements back into the height
//! model, deduplicating values that match the cache so a
//! measure → render → measure loop cannot sustain itself.
//!
//! The platform primitive is abstracted as [`SizeObservation`]; any
//! native size-observation API can implement it, as can a test double
//! or a manual measure-after-place call in a non-GUI host.

use std::collections::BTreeSet;

use windrow_core::{DynamicWindower, Window};

use crate::list::Row;

/// Host-implemented size-observation primitive.
///
/// `S` is the host's surface type, whatever `render_item` produces.
/// Subscriptions are keyed by index: the surface is only needed when
/// attaching, and an index leaving the window may have no live surface
/// left to hand back.
pub trait SizeObservation<S> {
    /// Start observing the surface realized for `index`.
    fn subscribe(&mut self, index: usize, surface: &S);

    /// Stop observing `index`.
    fn unsubscribe(&mut self, index: usize);
}

/// What a batch of measurements changed.
///
/// Ordered by severity so batches can fold with `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MeasureEffect {
    /// Every measurement matched the cache; nothing to re-render.
    Unchanged,
    /// Only content strictly below the window changed: the total height
    /// (scrollbar length) moved, the visible index range did not.
    TotalOnly,
    /// A height inside or above the window changed; the window must be
    /// recomputed.
    Window,
}

/// Tracks which indices currently hold a size-observation subscription.
#[derive(Debug, Clone, Default)]
pub struct ObserverBridge {
    observed: BTreeSet<usize>,
}

impl ObserverBridge {
    /// A bridge observing nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Whether `index` holds a live subscription.
    #[must_use]
    pub fn is_observing(&self, index: usize) -> bool {
        self.observed.contains(&index)
    }

    /// Reconcile subscriptions with the rows realized this frame:
    /// unsubscribe indices that left the window, subscribe the newly
    /// entered ones. Indices already observed are left alone.
    pub fn sync<S>(&mut self, rows: &[Row<S>], observer: &mut dyn SizeObservation<S>) {
        let current: BTreeSet<usize> = rows.iter().map(|row| row.index).collect();
        let gone: Vec<usize> = self.observed.difference(&current).copied().collect();
        for index in gone {
            self.observed.remove(&index);
            observer.unsubscribe(index);
        }
        for row in rows {
            if self.observed.insert(row.index) {
                observer.subscribe(row.index, &row.surface);
            }
        }
    }

    /// Release every subscription (viewport unmount or mode teardown).
    pub fn clear<S>(&mut self, observer: &mut dyn SizeObservation<S>) {
        for index in std::mem::take(&mut self.observed) {
            observer.unsubscribe(index);
        }
    }

    /// Apply one batch of `(index, height)` measurements against the
    /// height model, returning the strongest effect in the batch.
    ///
    /// Entries for indices without a live subscription are dropped (the
    /// report raced with the row leaving the window). Entries equal to
    /// an already measured value are dropped too — that dedup is what
    /// terminates the measure → render → measure feedback loop.
    pub fn apply(
        &self,
        entries: &[(usize, f64)],
        windower: &mut DynamicWindower,
        window: &Window,
    ) -> MeasureEffect {
        let mut effect = MeasureEffect::Unchanged;
        for &(index, height) in entries {
            if !self.observed.contains(&index) {
                continue;
            }
            let height = height.max(0.0);
            let cache = windower.cache();
            if cache.is_measured(index) && cache.height_of(index) == height {
                continue;
            }
            windower.record_height(index, height);
            effect = effect.max(if window.affected_by_height_change(index) {
                MeasureEffect::Window
            } else {
                MeasureEffect::TotalOnly
            });
        }
        effect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Observer double recording every call.
    #[derive(Debug, Default)]
    struct Recorder {
        subscribed: Vec<usize>,
        unsubscribed: Vec<usize>,
    }

    impl SizeObservation<&'static str> for Recorder {
        fn subscribe(&mut self, index: usize, _surface: &&'static str) {
            self.subscribed.push(index);
        }

        fn unsubscribe(&mut self, index: usize) {
            self.unsubscribed.push(index);
        }
    }

    fn rows(indices: &[usize]) -> Vec<Row<&'static str>> {
        indices
            .iter()
            .map(|&index| Row {
                index,
                key: index.to_string(),
                height: 60.0,
                surface: "surface",
            })
            .collect()
    }

    // ─── Subscription diffing ─────────────────────────────────────

    #[test]
    fn sync_subscribes_entering_indices_once() {
        let mut bridge = ObserverBridge::new();
        let mut observer = Recorder::default();

        bridge.sync(&rows(&[3, 4, 5]), &mut observer);
        assert_eq!(observer.subscribed, vec![3, 4, 5]);

        // Same window again: no churn.
        bridge.sync(&rows(&[3, 4, 5]), &mut observer);
        assert_eq!(observer.subscribed, vec![3, 4, 5]);
        assert!(observer.unsubscribed.is_empty());
        assert_eq!(bridge.observed_count(), 3);
    }

    #[test]
    fn sync_releases_departed_indices() {
        let mut bridge = ObserverBridge::new();
        let mut observer = Recorder::default();

        bridge.sync(&rows(&[3, 4, 5]), &mut observer);
        bridge.sync(&rows(&[5, 6]), &mut observer);

        assert_eq!(observer.unsubscribed, vec![3, 4]);
        assert_eq!(observer.subscribed, vec![3, 4, 5, 6]);
        assert!(bridge.is_observing(5));
        assert!(bridge.is_observing(6));
        assert!(!bridge.is_observing(3));
    }

    #[test]
    fn clear_releases_everything() {
        let mut bridge = ObserverBridge::new();
        let mut observer = Recorder::default();

        bridge.sync(&rows(&[0, 1]), &mut observer);
        bridge.clear(&mut observer);

        assert_eq!(bridge.observed_count(), 0);
        assert_eq!(observer.unsubscribed, vec![0, 1]);
    }

    // ─── Measurement application ──────────────────────────────────

    #[test]
    fn apply_ignores_unobserved_indices() {
        let mut bridge = ObserverBridge::new();
        let mut observer = Recorder::default();
        bridge.sync(&rows(&[0, 1]), &mut observer);

        let mut windower = DynamicWindower::new(10, 60.0);
        let window = windower.window(0.0, 120.0, 0);
        let effect = bridge.apply(&[(7, 300.0)], &mut windower, &window);

        assert_eq!(effect, MeasureEffect::Unchanged);
        assert!(!windower.cache().is_measured(7));
    }

    #[test]
    fn apply_dedupes_repeated_measurements() {
        let mut bridge = ObserverBridge::new();
        let mut observer = Recorder::default();
        bridge.sync(&rows(&[0, 1, 2]), &mut observer);

        let mut windower = DynamicWindower::new(10, 60.0);
        let window = windower.window(0.0, 120.0, 0);

        let first = bridge.apply(&[(1, 95.0)], &mut windower, &window);
        assert_eq!(first, MeasureEffect::Window);

        // The re-measure after the corrective render reports the same
        // height; the loop must settle here.
        let second = bridge.apply(&[(1, 95.0)], &mut windower, &window);
        assert_eq!(second, MeasureEffect::Unchanged);
    }

    #[test]
    fn estimate_equal_measurement_still_records() {
        // The estimate is not a measurement: a row that really is
        // estimate-sized must still move from "unmeasured" to "measured".
        let mut bridge = ObserverBridge::new();
        let mut observer = Recorder::default();
        bridge.sync(&rows(&[0]), &mut observer);

        let mut windower = DynamicWindower::new(10, 60.0);
        let window = windower.window(0.0, 120.0, 0);
        let effect = bridge.apply(&[(0, 60.0)], &mut windower, &window);

        assert_eq!(effect, MeasureEffect::Window);
        assert!(windower.cache().is_measured(0));
        assert_eq!(windower.total_height(), 600.0);
    }

    #[test]
    fn apply_classifies_below_window_as_total_only() {
        let mut bridge = ObserverBridge::new();
        let mut observer = Recorder::default();
        // Observe a wider set than the window to exercise the split.
        bridge.sync(&rows(&[0, 1, 2, 8]), &mut observer);

        let mut windower = DynamicWindower::new(10, 60.0);
        let window = windower.window(0.0, 120.0, 0); // realizes 0..=2

        assert_eq!(
            bridge.apply(&[(8, 200.0)], &mut windower, &window),
            MeasureEffect::TotalOnly
        );
        assert_eq!(
            bridge.apply(&[(1, 90.0)], &mut windower, &window),
            MeasureEffect::Window
        );
    }

    #[test]
    fn batch_folds_to_strongest_effect() {
        let mut bridge = ObserverBridge::new();
        let mut observer = Recorder::default();
        bridge.sync(&rows(&[0, 1, 2, 8]), &mut observer);

        let mut windower = DynamicWindower::new(10, 60.0);
        let window = windower.window(0.0, 120.0, 0);

        let effect = bridge.apply(&[(8, 200.0), (0, 45.0)], &mut windower, &window);
        assert_eq!(effect, MeasureEffect::Window);
        // Both entries landed in one pass.
        assert!(windower.cache().is_measured(8));
        assert!(windower.cache().is_measured(0));
    }
}
