//! # Math Module
//!
//! Stateless numerical primitives shared by the Huang-Rhys engine and the spectral
//! pipeline.
//!
//! ## Key Components
//!
//! - [`grid`] - Uniform grids whose step is derived from the desired reciprocal-space resolution
//! - [`fourier`] - Continuous Fourier transform approximated with a discrete FFT
//! - [`integrate`] - Trapezoidal integration on uniform and non-uniform grids
//! - [`kernels`] - Unit-area Gaussian and Lorentzian broadening kernels
//! - [`units`] - Frequency, energy, and time unit conversions

use thiserror::Error;

pub mod fourier;
pub mod grid;
pub mod integrate;
pub mod kernels;
pub mod units;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid grid bounds: low = {low}, high = {high} (high must exceed low)")]
    InvalidBounds { low: f64, high: f64 },

    #[error("Invalid maximum reciprocal value: {0} (must be positive and finite)")]
    InvalidResolution(f64),

    #[error("At least {required} samples are required, got {found}")]
    TooFewSamples { required: usize, found: usize },

    #[error("Length mismatch: {values} values sampled on a grid of {grid} points")]
    LengthMismatch { values: usize, grid: usize },

    #[error("Grid spacing must be non-zero and finite, got {0}")]
    InvalidSpacing(f64),
}
