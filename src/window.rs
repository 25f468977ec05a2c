use alloc::vec::Vec;
use core::cmp;
use core::ops::RangeInclusive;

use crate::error::{check_viewport, fail_fast};
use crate::units::to_px;
use crate::{HeightCache, LayoutResult};

/// An inclusive run of item indexes, `start_index..=end_index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    pub start_index: usize,
    pub end_index: usize, // inclusive
}

impl WindowRange {
    pub fn len(&self) -> usize {
        if self.start_index > self.end_index {
            return 0;
        }
        self.end_index - self.start_index + 1
    }

    pub fn is_empty(&self) -> bool {
        self.start_index > self.end_index
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index <= self.end_index
    }

    pub fn indexes(&self) -> RangeInclusive<usize> {
        self.start_index..=self.end_index
    }

    /// Widens the range by `overscan` items on each side, clamped to `[0, count)`.
    ///
    /// Returns an empty range when `count == 0`.
    pub fn with_overscan(self, overscan: usize, count: usize) -> Self {
        if count == 0 {
            return Self {
                start_index: 1,
                end_index: 0,
            };
        }
        let last = count - 1;
        Self {
            start_index: self.start_index.saturating_sub(overscan),
            end_index: cmp::min(last, self.end_index.saturating_add(overscan)),
        }
    }
}

/// Placement of one item along the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemLayout {
    pub index: usize,
    /// Offset of the item's top edge from the start of the list.
    pub top: f64,
    /// Resolved height (measurement or default).
    pub height: f64,
}

impl ItemLayout {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

impl HeightCache {
    /// Items to render for a scroll position: the anchor at `offset` through the last index
    /// needed to fill `viewport_size` below it.
    ///
    /// Returns `None` for an empty cache.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is negative or not finite, or `viewport_size` is not finite and
    /// positive.
    #[track_caller]
    pub fn visible_range(&self, offset: f64, viewport_size: f64) -> Option<WindowRange> {
        fail_fast(self.try_visible_range(offset, viewport_size))
    }

    pub fn try_visible_range(
        &self,
        offset: f64,
        viewport_size: f64,
    ) -> LayoutResult<Option<WindowRange>> {
        check_viewport(viewport_size)?;
        let start_index = self.try_find_start_index_with_offset(offset)?;
        if self.is_empty() {
            return Ok(None);
        }
        let end_index = self.try_find_index_after(start_index, viewport_size)?;
        vtrace!(offset, viewport_size, start_index, end_index, "visible_range");
        Ok(Some(WindowRange {
            start_index,
            end_index,
        }))
    }

    /// Items to render when the viewport's bottom edge is pinned to `end_index` (chat-style,
    /// bottom-anchored lists).
    ///
    /// # Panics
    ///
    /// Panics if `end_index` is out of range or `viewport_size` is not finite and positive.
    #[track_caller]
    pub fn range_ending_at(&self, end_index: usize, viewport_size: f64) -> WindowRange {
        fail_fast(self.try_range_ending_at(end_index, viewport_size))
    }

    pub fn try_range_ending_at(
        &self,
        end_index: usize,
        viewport_size: f64,
    ) -> LayoutResult<WindowRange> {
        let start_index = self.try_find_index_before(end_index, viewport_size)?;
        vtrace!(end_index, viewport_size, start_index, "range_ending_at");
        Ok(WindowRange {
            start_index,
            end_index,
        })
    }

    /// Placement of a single item.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[track_caller]
    pub fn item_layout(&self, index: usize) -> ItemLayout {
        fail_fast(self.try_item_layout(index))
    }

    pub fn try_item_layout(&self, index: usize) -> LayoutResult<ItemLayout> {
        self.check_range_end(index)?;
        Ok(ItemLayout {
            index,
            top: to_px(self.top_units(index)),
            height: to_px(self.height_units(index)),
        })
    }

    /// Calls `f` with the placement of every item in `range`, in index order.
    ///
    /// One prefix query places the first item; the rest accumulate from it. An empty range calls
    /// nothing.
    ///
    /// # Panics
    ///
    /// Panics if a non-empty `range` ends out of range.
    #[track_caller]
    pub fn for_each_item(&self, range: WindowRange, mut f: impl FnMut(ItemLayout)) {
        if range.is_empty() {
            return;
        }
        fail_fast(self.check_range_end(range.end_index));
        let mut top = self.top_units(range.start_index);
        for index in range.indexes() {
            let height = self.height_units(index);
            f(ItemLayout {
                index,
                top: to_px(top),
                height: to_px(height),
            });
            top = top.saturating_add(height);
        }
    }

    /// Collects [`Self::for_each_item`] into `out` (clears `out` first).
    ///
    /// For hot paths prefer `for_each_item` and reuse a scratch buffer.
    #[track_caller]
    pub fn collect_items(&self, range: WindowRange, out: &mut Vec<ItemLayout>) {
        out.clear();
        out.reserve(range.len());
        self.for_each_item(range, |item| out.push(item));
    }
}
