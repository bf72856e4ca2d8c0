use super::MathError;
use std::f64::consts::PI;

/// Builds a uniformly spaced grid over `[low, high)`.
///
/// The step is not a free parameter: it is `π / max_reciprocal`, the largest step that
/// still resolves the Fourier-dual variable up to `max_reciprocal` without aliasing.
///
/// # Errors
///
/// Returns [`MathError::InvalidResolution`] if `max_reciprocal` is not positive and finite,
/// and [`MathError::InvalidBounds`] if `high <= low`.
pub fn uniform_grid(low: f64, high: f64, max_reciprocal: f64) -> Result<Vec<f64>, MathError> {
    if !(max_reciprocal.is_finite() && max_reciprocal > 0.0) {
        return Err(MathError::InvalidResolution(max_reciprocal));
    }
    if !(low.is_finite() && high.is_finite()) || high <= low {
        return Err(MathError::InvalidBounds { low, high });
    }

    let step = grid_step(max_reciprocal);
    let count = ((high - low) / step).ceil() as usize;

    Ok((0..count)
        .map(|i| low + i as f64 * step)
        .take_while(|&x| x < high)
        .collect())
}

#[inline]
pub fn grid_step(max_reciprocal: f64) -> f64 {
    PI / max_reciprocal
}
