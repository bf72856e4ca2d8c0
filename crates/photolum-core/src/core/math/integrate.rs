use super::MathError;
use std::ops::{Add, Mul};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spacing {
    /// All intervals share the spacing of the first one.
    #[default]
    Uniform,
    /// Each interval uses its own local spacing.
    NonUniform,
}

/// Trapezoidal-rule integral of `values` sampled on `iv`.
///
/// Works for any sample type that can be summed and scaled by a real spacing, so both
/// real curves and complex spectra integrate through the same code path.
pub fn trapezoid<T>(values: &[T], iv: &[f64], spacing: Spacing) -> Result<T, MathError>
where
    T: Copy + Default + Add<Output = T> + Mul<f64, Output = T>,
{
    if values.len() != iv.len() {
        return Err(MathError::LengthMismatch {
            values: values.len(),
            grid: iv.len(),
        });
    }
    if iv.len() < 2 {
        return Err(MathError::TooFewSamples {
            required: 2,
            found: iv.len(),
        });
    }

    let n = values.len();
    match spacing {
        Spacing::Uniform => {
            let div = iv[1] - iv[0];
            let interior = values[1..n - 1]
                .iter()
                .fold(T::default(), |acc, &v| acc + v);
            Ok((interior * 2.0 + values[0] + values[n - 1]) * (div / 2.0))
        }
        Spacing::NonUniform => Ok(iv
            .windows(2)
            .zip(values.windows(2))
            .fold(T::default(), |acc, (x, y)| {
                acc + (y[1] + y[0]) * ((x[1] - x[0]) / 2.0)
            })),
    }
}
