//! Continuous Fourier transform approximated with a discrete FFT.
//!
//! The forward transform follows the convention `F(ω) = ∫ f(t) e^{-iωt} dt` and the
//! inverse `f(t) = (1/2π) ∫ F(ω) e^{iωt} dω`. Both take the uniform grid of the
//! original variable; the reciprocal axis is returned in ascending order.

use super::MathError;
use num_complex::Complex64;
use rustfft::FftPlanner;
use std::f64::consts::PI;

/// Approximates the continuous Fourier transform of `values` sampled on the uniform grid `iv`.
///
/// The discrete transform assumes the first sample sits at the origin, so the result is
/// multiplied by `exp(-i·rv·iv[0])` to account for grids that start elsewhere.
///
/// # Return
///
/// The ascending reciprocal axis and the transform sampled on it.
///
/// # Errors
///
/// Fails if fewer than two samples are given, the lengths of `iv` and `values`
/// disagree, or the grid spacing is zero.
pub fn continuous_fourier_transform(
    iv: &[f64],
    values: &[Complex64],
) -> Result<(Vec<f64>, Vec<Complex64>), MathError> {
    let spacing = validate_grid(iv, values.len())?;
    let n = iv.len();

    let mut buffer = values.to_vec();
    FftPlanner::<f64>::new()
        .plan_fft_forward(n)
        .process(&mut buffer);
    buffer.rotate_left(n.div_ceil(2));

    let rv = reciprocal_axis(n, spacing);
    let origin = iv[0];
    let transformed = buffer
        .into_iter()
        .zip(&rv)
        .map(|(x, &w)| x * spacing * Complex64::from_polar(1.0, -w * origin))
        .collect();

    Ok((rv, transformed))
}

/// Inverts [`continuous_fourier_transform`].
///
/// `iv` is the grid of the original variable (the same grid that was passed to the
/// forward transform) and `spectrum` holds samples on the ascending reciprocal axis.
/// Returns `iv` together with the reconstructed samples.
pub fn inverse_continuous_fourier_transform(
    iv: &[f64],
    spectrum: &[Complex64],
) -> Result<(Vec<f64>, Vec<Complex64>), MathError> {
    let spacing = validate_grid(iv, spectrum.len())?;
    let n = iv.len();
    let rv = reciprocal_axis(n, spacing);
    let origin = iv[0];

    let mut buffer: Vec<Complex64> = spectrum
        .iter()
        .zip(&rv)
        .map(|(&x, &w)| x * Complex64::from_polar(1.0, w * origin))
        .collect();
    buffer.rotate_right(n.div_ceil(2));
    FftPlanner::<f64>::new()
        .plan_fft_inverse(n)
        .process(&mut buffer);

    // rustfft leaves the inverse unnormalized.
    let scale = 1.0 / (n as f64 * spacing);
    let values = buffer.into_iter().map(|x| x * scale).collect();

    Ok((iv.to_vec(), values))
}

/// Ascending angular reciprocal axis `2πk / (nΔ)` for `k = -⌊n/2⌋ ..= ⌈n/2⌉ - 1`.
pub fn reciprocal_axis(n: usize, spacing: f64) -> Vec<f64> {
    let half = (n / 2) as isize;
    let dw = 2.0 * PI / (n as f64 * spacing);
    (0..n)
        .map(|j| (j as isize - half) as f64 * dw)
        .collect()
}

fn validate_grid(iv: &[f64], len: usize) -> Result<f64, MathError> {
    if iv.len() < 2 {
        return Err(MathError::TooFewSamples {
            required: 2,
            found: iv.len(),
        });
    }
    if iv.len() != len {
        return Err(MathError::LengthMismatch {
            values: len,
            grid: iv.len(),
        });
    }
    let spacing = iv[1] - iv[0];
    if spacing == 0.0 || !spacing.is_finite() {
        return Err(MathError::InvalidSpacing(spacing));
    }
    Ok(spacing)
}
