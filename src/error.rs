/// Result alias for the checked (`try_*`) operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// A violated caller obligation.
///
/// None of these are recoverable runtime conditions: they mean the integration passed a value the
/// layout engine is not defined for. Clamping at the edges of the sequence is normal behavior and
/// is never reported through this type.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq)]
pub enum LayoutError {
    #[error("index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("viewport size must be finite and positive (got {0})")]
    InvalidViewport(f64),

    #[error("default height must be finite and positive (got {0})")]
    InvalidDefaultHeight(f64),

    #[error("scroll offset must be finite and non-negative (got {0})")]
    InvalidOffset(f64),

    #[error("measured height must be finite and non-negative (got {0})")]
    InvalidHeight(f64),
}

pub(crate) fn check_index(index: usize, len: usize) -> LayoutResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(LayoutError::IndexOutOfRange { index, len })
    }
}

/// Like [`check_index`] but also accepts `index == len` (the slot one past the last item).
pub(crate) fn check_boundary(index: usize, len: usize) -> LayoutResult<()> {
    if index <= len {
        Ok(())
    } else {
        Err(LayoutError::IndexOutOfRange { index, len })
    }
}

pub(crate) fn check_viewport(viewport_size: f64) -> LayoutResult<()> {
    if viewport_size.is_finite() && viewport_size > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidViewport(viewport_size))
    }
}

pub(crate) fn check_default_height(default_height: f64) -> LayoutResult<()> {
    if default_height.is_finite() && default_height > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidDefaultHeight(default_height))
    }
}

pub(crate) fn check_offset(offset: f64) -> LayoutResult<()> {
    if offset.is_finite() && offset >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidOffset(offset))
    }
}

/// Unwraps a checked result, turning a violated precondition into a panic at the caller.
#[track_caller]
pub(crate) fn fail_fast<T>(result: LayoutResult<T>) -> T {
    match result {
        Ok(v) => v,
        Err(err) => panic!("{err}"),
    }
}
