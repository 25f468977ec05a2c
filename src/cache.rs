use alloc::vec::Vec;
use core::cmp;

use crate::error::{
    check_boundary, check_default_height, check_index, check_offset, check_viewport, fail_fast,
};
use crate::fenwick::Fenwick;
use crate::units::{UNITS_PER_PX, ceil_units, resolve_units, to_px, to_units};
use crate::{ItemHeight, LayoutResult};

/// Per-index item heights plus an `O(log n)` prefix-sum index over their resolved values.
///
/// The renderer owns one cache per list. It reports measurements through [`Self::measure`] and
/// asks the lookups on every scroll or resize:
///
/// - [`Self::find_start_index_with_offset`] turns a scroll offset into an anchor index.
/// - [`Self::find_index_after`] / [`Self::find_index_before`] find the other end of the window.
/// - [`Self::compute_top`] places an index in pixels.
///
/// Positions are summed on a 1/1024 px grid: each resolved height is rounded to the grid once,
/// and all prefix sums and threshold comparisons are exact from there on. The [`crate::scan`]
/// functions use the same grid, so both always return the same indexes.
///
/// Queries take `&self` and writes take `&mut self`, so a query never sees a half-applied
/// measurement.
#[derive(Clone, Debug)]
pub struct HeightCache {
    heights: Vec<ItemHeight>,
    default_height: f64,
    sums: Fenwick,
    measured: usize,
}

impl HeightCache {
    /// Creates a cache of `len` unmeasured items.
    ///
    /// # Panics
    ///
    /// Panics if `default_height` is not finite and positive.
    #[track_caller]
    pub fn new(len: usize, default_height: f64) -> Self {
        fail_fast(Self::try_new(len, default_height))
    }

    pub fn try_new(len: usize, default_height: f64) -> LayoutResult<Self> {
        Self::try_from_heights(core::iter::repeat_n(ItemHeight::Unresolved, len), default_height)
    }

    /// Creates a cache from existing entries (e.g. a list that was partially measured before).
    ///
    /// # Panics
    ///
    /// Panics if `default_height` is not finite and positive.
    #[track_caller]
    pub fn from_heights(
        heights: impl IntoIterator<Item = ItemHeight>,
        default_height: f64,
    ) -> Self {
        fail_fast(Self::try_from_heights(heights, default_height))
    }

    pub fn try_from_heights(
        heights: impl IntoIterator<Item = ItemHeight>,
        default_height: f64,
    ) -> LayoutResult<Self> {
        check_default_height(default_height)?;
        let heights: Vec<ItemHeight> = heights
            .into_iter()
            .map(|h| h.get().map_or(ItemHeight::Unresolved, ItemHeight::Measured))
            .collect();
        let measured = heights.iter().filter(|h| h.is_measured()).count();
        vdebug!(len = heights.len(), measured, default_height, "HeightCache::new");
        let mut cache = Self {
            heights,
            default_height,
            sums: Fenwick::new(),
            measured,
        };
        cache.rebuild_sums();
        Ok(cache)
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn default_height(&self) -> f64 {
        self.default_height
    }

    /// Read-only view of the stored entries, usable with the snapshot functions in
    /// [`crate::scan`].
    pub fn heights(&self) -> &[ItemHeight] {
        &self.heights
    }

    pub fn get(&self, index: usize) -> Option<ItemHeight> {
        self.heights.get(index).copied()
    }

    /// Height used for layout at `index` (snapped to the layout grid), or `None` when out of
    /// range.
    pub fn resolved_height(&self, index: usize) -> Option<f64> {
        self.get(index)
            .map(|h| to_px(resolve_units(h, self.default_height)))
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.get(index).is_some_and(ItemHeight::is_measured)
    }

    /// Number of entries holding a real measurement.
    pub fn measured_count(&self) -> usize {
        self.measured
    }

    /// Sum of all resolved heights.
    pub fn total_height(&self) -> f64 {
        to_px(self.sums.total())
    }

    /// Changes the estimate used for unmeasured items.
    ///
    /// # Panics
    ///
    /// Panics if `default_height` is not finite and positive.
    #[track_caller]
    pub fn set_default_height(&mut self, default_height: f64) {
        fail_fast(self.try_set_default_height(default_height));
    }

    pub fn try_set_default_height(&mut self, default_height: f64) -> LayoutResult<()> {
        check_default_height(default_height)?;
        if self.default_height == default_height {
            return Ok(());
        }
        self.default_height = default_height;
        if self.measured < self.heights.len() {
            self.rebuild_sums();
        }
        Ok(())
    }

    /// Grows (with unmeasured entries) or shrinks the sequence. Entries below `len` keep their
    /// index and value.
    pub fn set_len(&mut self, len: usize) {
        let cur = self.heights.len();
        match len.cmp(&cur) {
            cmp::Ordering::Equal => return,
            cmp::Ordering::Greater => {
                self.heights.resize(len, ItemHeight::Unresolved);
                let default_units = to_units(self.default_height);
                for _ in cur..len {
                    self.sums.push_value(default_units);
                }
            }
            cmp::Ordering::Less => {
                let removed = self.heights[len..]
                    .iter()
                    .filter(|h| h.is_measured())
                    .count();
                self.measured -= removed;
                self.heights.truncate(len);
                self.sums.truncate(len);
            }
        }
        vdebug!(from = cur, to = len, "HeightCache::set_len");
    }

    /// Records the measured height of `index` and returns the change in total height.
    ///
    /// Reporting the same value again is a no-op returning `0.0`. Updates are exact, so measuring
    /// an item back to an earlier value restores the earlier layout bit for bit.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or `height` is negative or not finite.
    #[track_caller]
    pub fn measure(&mut self, index: usize, height: f64) -> f64 {
        fail_fast(self.try_measure(index, height))
    }

    pub fn try_measure(&mut self, index: usize, height: f64) -> LayoutResult<f64> {
        check_index(index, self.heights.len())?;
        let next = ItemHeight::measured(height)?;
        let prev = self.heights[index];
        if prev == next {
            return Ok(0.0);
        }
        if !prev.is_measured() {
            self.measured += 1;
        }
        self.heights[index] = next;

        let prev_units = resolve_units(prev, self.default_height);
        let delta = to_units(height) as i64 - prev_units as i64;
        vtrace!(index, height, delta, "HeightCache::measure");
        if delta != 0 {
            self.sums.add(index, delta);
        }
        Ok(delta as f64 / UNITS_PER_PX)
    }

    /// Applies several measurements and returns the summed change in total height.
    ///
    /// # Panics
    ///
    /// Panics on the first invalid entry; entries before it stay applied.
    #[track_caller]
    pub fn measure_many(&mut self, measurements: impl IntoIterator<Item = (usize, f64)>) -> f64 {
        fail_fast(self.try_measure_many(measurements))
    }

    /// Checked form of [`Self::measure_many`]. Stops at the first invalid entry; entries before
    /// it stay applied.
    pub fn try_measure_many(
        &mut self,
        measurements: impl IntoIterator<Item = (usize, f64)>,
    ) -> LayoutResult<f64> {
        let mut total = 0.0;
        for (index, height) in measurements {
            total += self.try_measure(index, height)?;
        }
        Ok(total)
    }

    /// Pixel offset of the top edge of `index`.
    ///
    /// `index == len()` is accepted and returns [`Self::total_height`].
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    #[track_caller]
    pub fn compute_top(&self, index: usize) -> f64 {
        fail_fast(self.try_compute_top(index))
    }

    pub fn try_compute_top(&self, index: usize) -> LayoutResult<f64> {
        check_boundary(index, self.heights.len())?;
        Ok(to_px(self.sums.prefix_sum(index)))
    }

    /// Last index needed to cover `viewport_size` pixels starting at `start_index`.
    ///
    /// Reaching `viewport_size` exactly stops at that index; any overshoot needs the index that
    /// produced it. Clamps to the last index when the list runs out first.
    ///
    /// # Panics
    ///
    /// Panics if `start_index` is out of range or `viewport_size` is not finite and positive.
    #[track_caller]
    pub fn find_index_after(&self, start_index: usize, viewport_size: f64) -> usize {
        fail_fast(self.try_find_index_after(start_index, viewport_size))
    }

    pub fn try_find_index_after(
        &self,
        start_index: usize,
        viewport_size: f64,
    ) -> LayoutResult<usize> {
        check_index(start_index, self.heights.len())?;
        check_viewport(viewport_size)?;
        // Smallest `j` with prefix(j + 1) >= target is one past the largest count below it.
        let target = self
            .sums
            .prefix_sum(start_index)
            .saturating_add(ceil_units(viewport_size));
        let end = self.sums.count_below(target);
        Ok(end.clamp(start_index, self.heights.len() - 1))
    }

    /// First index needed to cover `viewport_size` pixels ending at `end_index`.
    ///
    /// Clamps to `0` when there is not enough content before `end_index`. This is not an exact
    /// inverse of [`Self::find_index_after`] near either end of the list.
    ///
    /// # Panics
    ///
    /// Panics if `end_index` is out of range or `viewport_size` is not finite and positive.
    #[track_caller]
    pub fn find_index_before(&self, end_index: usize, viewport_size: f64) -> usize {
        fail_fast(self.try_find_index_before(end_index, viewport_size))
    }

    pub fn try_find_index_before(
        &self,
        end_index: usize,
        viewport_size: f64,
    ) -> LayoutResult<usize> {
        check_index(end_index, self.heights.len())?;
        check_viewport(viewport_size)?;
        // Largest `i` with prefix(end + 1) - prefix(i) >= viewport; none when the run from 0 is
        // still too short.
        let bottom = self.sums.prefix_sum(end_index + 1);
        let start = match bottom.checked_sub(ceil_units(viewport_size)) {
            Some(target) => self.sums.count_at_most(target),
            None => 0,
        };
        Ok(cmp::min(start, end_index))
    }

    /// Anchor index for a scroll offset: the greatest index whose top is strictly less than
    /// `offset`.
    ///
    /// On an exact boundary the item ending there stays the anchor, so a partially visible
    /// predecessor is never skipped. Returns `0` for `offset == 0` and for an empty cache, and the
    /// last index for offsets past the end.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is negative or not finite.
    #[track_caller]
    pub fn find_start_index_with_offset(&self, offset: f64) -> usize {
        fail_fast(self.try_find_start_index_with_offset(offset))
    }

    pub fn try_find_start_index_with_offset(&self, offset: f64) -> LayoutResult<usize> {
        check_offset(offset)?;
        let anchor = self.sums.count_below(ceil_units(offset));
        Ok(cmp::min(anchor, self.heights.len().saturating_sub(1)))
    }

    pub(crate) fn check_range_end(&self, end_index: usize) -> LayoutResult<()> {
        check_index(end_index, self.heights.len())
    }

    /// Top of `index` in layout units; `index` must be `<= len`.
    pub(crate) fn top_units(&self, index: usize) -> u64 {
        self.sums.prefix_sum(index)
    }

    /// Resolved height of `index` in layout units; `index` must be `< len`.
    pub(crate) fn height_units(&self, index: usize) -> u64 {
        resolve_units(self.heights[index], self.default_height)
    }

    fn rebuild_sums(&mut self) {
        let default_height = self.default_height;
        self.sums = Fenwick::from_values(
            self.heights
                .iter()
                .map(|&h| resolve_units(h, default_height)),
        );
    }
}
