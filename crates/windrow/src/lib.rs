#![forbid(unsafe_code)]

//! Windowed list rendering for long sequences in a fixed-height
//! scrollable viewport.
//!
//! Instead of realizing all N items, a [`WindowedList`] computes the
//! index range currently worth rendering — the strictly visible items
//! plus an overscan margin — and recomputes it as the viewport scrolls.
//! Item heights are either uniform and known up front (fixed mode) or
//! variable and discovered only after layout (dynamic mode, backed by a
//! size cache with an estimate fallback and a size-change observer
//! bridge).
//!
//! The engine is renderer-agnostic: items are opaque, `render_item` is
//! a host callback producing an opaque surface, and size observation is
//! abstracted behind the [`SizeObservation`] trait. Everything runs
//! synchronously on the host's rendering thread; there is no background
//! work and no shared state between list instances.
//!
//! # Example
//!
//! A fixed-height list of 100 rows, 50px each, in a 300px viewport:
//!
//! ```
//! use windrow::{SizeObservation, WindowedList};
//!
//! // A host without a size-observation primitive (fixed mode never
//! // subscribes anyway).
//! struct NoObservation;
//! impl<S> SizeObservation<S> for NoObservation {
//!     fn subscribe(&mut self, _index: usize, _surface: &S) {}
//!     fn unsubscribe(&mut self, _index: usize) {}
//! }
//!
//! let items: Vec<String> = (0..100).map(|i| format!("row {i}")).collect();
//! let mut list = WindowedList::fixed(300.0, 50.0, |item: &String, _| item.clone());
//!
//! list.set_scroll_offset(505.0);
//! let plan = list.render(&items, |item, _| item.len(), &mut NoObservation);
//!
//! // floor(505/50) - 3 overscan = 7; ceil(300/50) visible + overscan
//! // on both sides reaches index 19.
//! assert_eq!(plan.window.start, 7);
//! assert_eq!(plan.window.last_included(), Some(19));
//! assert_eq!(plan.offset_y(), 350.0);
//! assert_eq!(plan.total_height(), 5000.0);
//! assert_eq!(plan.rows.len(), 13);
//! ```
//!
//! For variable heights, construct with [`WindowedList::dynamic`], hand
//! each realized surface to the platform's size observation, and feed
//! reports back through [`WindowedList::apply_measurements`]; the first
//! frame uses the estimate and is corrected when measurements arrive.

pub mod list;
pub mod observe;

pub use list::{DEFAULT_ESTIMATED_ITEM_HEIGHT, DEFAULT_OVERSCAN, RenderPlan, Row, WindowedList};
pub use observe::{MeasureEffect, ObserverBridge, SizeObservation};
pub use windrow_core::{DynamicWindower, FixedWindower, SizeCache, Window, clamp_scroll};
