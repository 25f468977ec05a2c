//! Lookups over a borrowed height snapshot.
//!
//! These scan linearly and keep no state, so they suit small lists and one-off queries. For
//! large lists queried on every scroll frame, use the equivalent [`crate::HeightCache`] methods,
//! which answer the same questions in `O(log n)`.
//!
//! Sums are taken on the same 1/1024 px grid as the cache, so a scan and the matching cache
//! method agree exactly, including on exact-fit ties.
//!
//! All functions panic on violated preconditions (see [`crate::LayoutError`]).

use crate::error::{
    check_boundary, check_default_height, check_index, check_offset, check_viewport, fail_fast,
};
use crate::units::{ceil_units, resolve_units, to_px};
use crate::{ItemHeight, LayoutResult};

/// Pixel offset of the top edge of `index`: the sum of resolved heights of `[0, index)`, each
/// rounded to the layout grid.
///
/// `index == heights.len()` is accepted and returns the total height.
///
/// # Panics
///
/// Panics if `index > heights.len()` or `default_height` is not finite and positive.
#[track_caller]
pub fn compute_top(index: usize, heights: &[ItemHeight], default_height: f64) -> f64 {
    fail_fast(check_boundary(index, heights.len()).and(check_default_height(default_height)));
    let top = heights[..index]
        .iter()
        .fold(0u64, |acc, &h| acc.saturating_add(resolve_units(h, default_height)));
    to_px(top)
}

/// Last index needed to cover `viewport_size` pixels going forward from `start_index`.
///
/// Returns the smallest `j >= start_index` whose accumulated height from `start_index` reaches
/// `viewport_size`; reaching it exactly stops at `j`. Clamps to the last index.
///
/// # Panics
///
/// Panics if `start_index` is out of range, or `viewport_size`/`default_height` are not finite
/// and positive.
#[track_caller]
pub fn find_index_after(
    start_index: usize,
    viewport_size: f64,
    heights: &[ItemHeight],
    default_height: f64,
) -> usize {
    fail_fast(check_window(start_index, viewport_size, heights, default_height));
    let last = heights.len() - 1;
    let viewport = ceil_units(viewport_size);
    let mut acc = 0u64;
    let mut j = start_index;
    loop {
        acc = acc.saturating_add(resolve_units(heights[j], default_height));
        if acc >= viewport || j == last {
            return j;
        }
        j += 1;
    }
}

/// First index needed to cover `viewport_size` pixels going backward from `end_index`.
///
/// Mirror of [`find_index_after`]; clamps to `0`.
///
/// # Panics
///
/// Same conditions as [`find_index_after`].
#[track_caller]
pub fn find_index_before(
    end_index: usize,
    viewport_size: f64,
    heights: &[ItemHeight],
    default_height: f64,
) -> usize {
    fail_fast(check_window(end_index, viewport_size, heights, default_height));
    let viewport = ceil_units(viewport_size);
    let mut acc = 0u64;
    let mut i = end_index;
    loop {
        acc = acc.saturating_add(resolve_units(heights[i], default_height));
        if acc >= viewport || i == 0 {
            return i;
        }
        i -= 1;
    }
}

/// Anchor index for a scroll offset: the greatest index whose top is strictly above `offset`.
///
/// When `offset` lands exactly on an item boundary, the item ending there stays the anchor.
/// Returns `0` for `offset == 0` and for an empty snapshot, and the last index for offsets past
/// the end.
///
/// # Panics
///
/// Panics if `offset` is negative or not finite, or `default_height` is not finite and positive.
#[track_caller]
pub fn find_start_index_with_offset(
    offset: f64,
    heights: &[ItemHeight],
    default_height: f64,
) -> usize {
    fail_fast(check_offset(offset).and(check_default_height(default_height)));
    let offset = ceil_units(offset);
    let mut top = 0u64;
    for (i, &h) in heights.iter().enumerate() {
        let bottom = top.saturating_add(resolve_units(h, default_height));
        if bottom >= offset {
            return i;
        }
        top = bottom;
    }
    heights.len().saturating_sub(1)
}

fn check_window(
    index: usize,
    viewport_size: f64,
    heights: &[ItemHeight],
    default_height: f64,
) -> LayoutResult<()> {
    check_index(index, heights.len())?;
    check_viewport(viewport_size)?;
    check_default_height(default_height)
}
