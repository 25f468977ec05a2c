//! Fixed-point layout units.
//!
//! Layout sums run on integer multiples of 1/1024 px. Scaling by a power of two is exact in
//! `f64`, so each height is rounded once when it enters layout; every sum, difference and
//! comparison after that is exact and independent of evaluation order.

use crate::ItemHeight;

/// Layout grid resolution: units per pixel.
pub(crate) const UNITS_PER_PX: f64 = 1024.0;

// Per-item cap (about 4.4e12 px); keeps single-item deltas inside `i64`.
const MAX_ITEM_UNITS: f64 = (1u64 << 52) as f64;

/// Nearest grid value for a height.
pub(crate) fn to_units(px: f64) -> u64 {
    (px * UNITS_PER_PX).round().clamp(0.0, MAX_ITEM_UNITS) as u64
}

/// Smallest `u` with `to_px(u) >= px`.
///
/// For any grid value `s`: `s >= px` iff `s >= ceil_units(px)`, and `s < px` iff
/// `s < ceil_units(px)`. Thresholds (offsets, viewports) go through this, never `to_units`.
pub(crate) fn ceil_units(px: f64) -> u64 {
    // `as` saturates, so huge thresholds become `u64::MAX`.
    (px * UNITS_PER_PX).ceil().max(0.0) as u64
}

pub(crate) fn to_px(units: u64) -> f64 {
    units as f64 / UNITS_PER_PX
}

/// Grid value of an entry's resolved height.
pub(crate) fn resolve_units(stored: ItemHeight, default_height: f64) -> u64 {
    to_units(stored.resolve(default_height))
}

