#![forbid(unsafe_code)]

//! Core windowing math for windrow.
//!
//! This crate computes which slice of a long ordered sequence is worth
//! realizing inside a fixed-height scrollable viewport. It knows nothing
//! about items, surfaces, or any UI stack; it works purely over index
//! ranges and `f64` logical-pixel extents.
//!
//! # Core types
//!
//! - [`Window`] - a computed render window: the half-open index range to
//!   realize, its top-edge translation, and the full content height.
//! - [`FixedWindower`] - windower for sequences where every item shares
//!   one known, constant height.
//! - [`SizeCache`] - per-index measured heights with an estimate fallback
//!   for unmeasured indices, incremental totals, and cursor-walked
//!   prefix-sum offsets.
//! - [`DynamicWindower`] - windower for variable-height sequences,
//!   backed by a [`SizeCache`].
//!
//! Out-of-range scroll offsets are clamped (see [`clamp_scroll`]);
//! degenerate input degrades to an empty or best-effort window, never
//! a panic.

pub mod dynamic;
pub mod fixed;
pub mod size_cache;
pub mod window;

pub use dynamic::DynamicWindower;
pub use fixed::FixedWindower;
pub use size_cache::SizeCache;
pub use window::{Window, clamp_scroll};
