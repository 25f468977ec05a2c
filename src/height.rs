use crate::error::{LayoutError, LayoutResult};

/// A stored item height: either a real measurement or "not measured yet".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemHeight {
    /// A measurement reported by the renderer. Always finite and `>= 0`.
    Measured(f64),
    /// The item has not been rendered and measured yet.
    #[default]
    Unresolved,
}

impl ItemHeight {
    /// Checked constructor for a measurement.
    ///
    /// Zero is a valid measurement (collapsed rows); negative, NaN and infinite values are not.
    pub fn measured(height: f64) -> LayoutResult<Self> {
        if height.is_finite() && height >= 0.0 {
            Ok(Self::Measured(height))
        } else {
            Err(LayoutError::InvalidHeight(height))
        }
    }

    /// Converts from the numeric encoding where any negative value marks an unmeasured item.
    ///
    /// Non-finite values are treated as unmeasured as well.
    pub fn from_raw(raw: f64) -> Self {
        Self::measured(raw).unwrap_or(Self::Unresolved)
    }

    pub fn is_measured(self) -> bool {
        self.get().is_some()
    }

    /// Returns the measurement, if any.
    pub fn get(self) -> Option<f64> {
        match self {
            Self::Measured(h) if h.is_finite() && h >= 0.0 => Some(h),
            _ => None,
        }
    }

    /// Effective layout height, falling back to `default_height` for unmeasured items.
    ///
    /// A `Measured` value built by hand with a negative or non-finite payload resolves like
    /// `Unresolved`.
    pub fn resolve(self, default_height: f64) -> f64 {
        self.get().unwrap_or(default_height)
    }
}

impl From<Option<f64>> for ItemHeight {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Unresolved, Self::from_raw)
    }
}

/// Returns the height used for layout: the stored measurement, or `default_height` when the item
/// has not been measured.
pub fn resolve_item_height(stored: ItemHeight, default_height: f64) -> f64 {
    stored.resolve(default_height)
}
