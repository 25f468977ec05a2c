//! Height cache and window lookups for virtualized lists whose rows are measured lazily.
//!
//! A renderer that shows a window of a very long list needs to answer, on every scroll frame:
//! which index sits at this scroll offset, how far forward (or backward) it has to render to fill
//! the viewport, and where each of those items starts in pixels. Item heights are unknown until
//! an item is rendered once, so every unmeasured item is laid out with a default estimate until
//! its measurement arrives.
//!
//! [`HeightCache`] keeps the per-index heights together with a Fenwick tree over their resolved
//! values, so measurements and all lookups are `O(log n)`. The [`scan`] module has the same
//! lookups as linear functions over a borrowed `&[ItemHeight]` snapshot. Both sum heights on a
//! 1/1024 px grid, so positions are exact and the two always pick the same indexes.
//!
//! ```
//! use height_cache::HeightCache;
//!
//! let mut cache = HeightCache::new(10_000, 30.0);
//! cache.measure(0, 48.0);
//!
//! let range = cache.visible_range(100.0, 600.0).unwrap();
//! cache.for_each_item(range, |item| {
//!     // position row `item.index` at `item.top`
//!     let _ = (item.index, item.top);
//! });
//! ```
//!
//! This crate does no rendering and owns no scroll state; the UI layer supplies scroll offsets,
//! viewport sizes and measurements.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cache;
mod error;
mod fenwick;
mod height;
pub mod scan;
mod units;
mod window;


pub use cache::HeightCache;
pub use error::{LayoutError, LayoutResult};
pub use height::{ItemHeight, resolve_item_height};
pub use scan::{compute_top, find_index_after, find_index_before, find_start_index_with_offset};
pub use window::{ItemLayout, WindowRange};
