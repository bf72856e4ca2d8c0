//! Generating-function route from a Huang-Rhys spectrum to the luminescence lineshape.
//!
//! Each stage is a pure function of the previous stage's output:
//! `S(E)` → `S(t)` → `G(t)` → `A(E)` → `L(E)`. Energies are in meV and the
//! internal time unit is meV⁻¹ (ħ = 1), with femtoseconds reported alongside.

use num_complex::Complex64;
use tracing::debug;

use super::config::{BroadeningConfig, EmissionWindow, SpectrumConfig};
use super::error::EngineError;
use super::huang_rhys::HuangRhysSpectrum;
use crate::core::math::fourier::continuous_fourier_transform;
use crate::core::math::grid::uniform_grid;
use crate::core::math::integrate::{Spacing, trapezoid};
use crate::core::math::units::{TimeDirection, scale_time};

/// Broadened phonon spectral function `S(E)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralFunction {
    pub energies_mev: Vec<f64>,
    pub values: Vec<f64>,
}

impl SpectralFunction {
    /// `(E, S(E))` at the largest value, or `None` for an empty grid.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.energies_mev
            .iter()
            .copied()
            .zip(self.values.iter().copied())
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeDomainSpectralFunction {
    pub times_inv_mev: Vec<f64>,
    pub times_fs: Vec<f64>,
    /// Fourier transform of the broadened `S(E)`.
    pub approximate: Vec<Complex64>,
    /// `Σ S_k exp(−i E_k t)` evaluated directly from the discrete spectrum.
    pub exact: Vec<Complex64>,
}

/// Optical spectral function `A(E)`.
#[derive(Debug, Clone, PartialEq)]
pub struct OpticalSpectrum {
    pub energies_mev: Vec<f64>,
    pub values: Vec<Complex64>,
}

/// Normalized luminescence lineshape `L(E)` restricted to the emission window.
#[derive(Debug, Clone, PartialEq)]
pub struct Luminescence {
    pub energies_mev: Vec<f64>,
    pub values: Vec<Complex64>,
}

impl Luminescence {
    pub fn intensities(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.norm()).collect()
    }

    /// `(E, |L(E)|)` at the largest magnitude.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.energies_mev
            .iter()
            .zip(&self.values)
            .map(|(&e, v)| (e, v.norm()))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Uniform energy grid `[0, E_max)` whose spacing resolves `t_max`.
///
/// `E_max` is `energy_max_factor · ZPL`, or the fallback bound when the zero-phonon
/// line is exactly zero.
pub fn energy_grid(config: &SpectrumConfig) -> Result<Vec<f64>, EngineError> {
    let e_max = if config.zpl == 0.0 {
        config.energy_grid.fallback_max
    } else {
        config.energy_grid.max_factor * config.zpl
    };
    let t_max = scale_time(config.t_max_fs, TimeDirection::FemtosecondsToInverseMev);
    let grid = uniform_grid(0.0, e_max, t_max)?;
    debug!(
        "Energy grid: {} points on [0, {:.1}) meV (t_max = {:.4} meV^-1).",
        grid.len(),
        e_max,
        t_max
    );
    Ok(grid)
}

/// `S(E) = Σ_k S_k K(E, E_k, σ)`.
pub fn phonon_spectral_function(
    hr: &HuangRhysSpectrum,
    energies: &[f64],
    broadening: &BroadeningConfig,
) -> SpectralFunction {
    let BroadeningConfig { kernel, sigma } = *broadening;
    let values = energies
        .iter()
        .map(|&e| {
            hr.modes()
                .map(|(e_k, s_k)| s_k * kernel.evaluate(e, e_k, sigma))
                .sum::<f64>()
        })
        .collect();
    SpectralFunction {
        energies_mev: energies.to_vec(),
        values,
    }
}

pub fn time_domain_spectral_function(
    hr: &HuangRhysSpectrum,
    s_e: &SpectralFunction,
) -> Result<TimeDomainSpectralFunction, EngineError> {
    EngineError::check_len(
        "phonon spectral function",
        s_e.energies_mev.len(),
        s_e.values.len(),
    )?;
    let samples: Vec<Complex64> = s_e.values.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    let (times, approximate) = continuous_fourier_transform(&s_e.energies_mev, &samples)?;

    let exact = times
        .iter()
        .map(|&t| {
            hr.modes()
                .map(|(e_k, s_k)| Complex64::from_polar(s_k, -e_k * t))
                .sum::<Complex64>()
        })
        .collect();
    let times_fs = times
        .iter()
        .map(|&t| scale_time(t, TimeDirection::InverseMevToFemtoseconds))
        .collect();

    Ok(TimeDomainSpectralFunction {
        times_inv_mev: times,
        times_fs,
        approximate,
        exact,
    })
}

/// `G(t) = exp(S(t) − S)` where `S` is the total Huang-Rhys factor.
pub fn generating_function(total: f64, s_t: &[Complex64]) -> Vec<Complex64> {
    s_t.iter().map(|&s| (s - total).exp()).collect()
}

/// `A(E)`: Fourier transform of `G(t) exp(i ZPL t) exp(−γ|t|)`, divided by the number
/// of time samples.
pub fn optical_spectral_function(
    g: &[Complex64],
    times: &[f64],
    zpl: f64,
    gamma: f64,
) -> Result<OpticalSpectrum, EngineError> {
    EngineError::check_len("generating function", times.len(), g.len())?;
    let damped: Vec<Complex64> = g
        .iter()
        .zip(times)
        .map(|(&g, &t)| g * Complex64::from_polar((-gamma * t.abs()).exp(), zpl * t))
        .collect();
    let (energies, values) = continuous_fourier_transform(times, &damped)?;
    let n = times.len() as f64;
    Ok(OpticalSpectrum {
        energies_mev: energies,
        values: values.into_iter().map(|v| v / n).collect(),
    })
}

/// Keeps `A(E)` inside the emission window, weights it by `E³` and normalizes the
/// result to unit trapezoidal integral.
///
/// # Errors
///
/// - [`EngineError::DegenerateWindow`] if fewer than two energies fall in the window.
/// - [`EngineError::DegenerateNormalization`] if the weighted integral is not finite or
///   vanishes to rounding.
pub fn luminescence(
    optical: &OpticalSpectrum,
    zpl: f64,
    window: &EmissionWindow,
) -> Result<Luminescence, EngineError> {
    EngineError::check_len(
        "optical spectrum",
        optical.energies_mev.len(),
        optical.values.len(),
    )?;
    let (low, high) = window.bounds(zpl);
    let (energies, weighted): (Vec<f64>, Vec<Complex64>) = optical
        .energies_mev
        .iter()
        .zip(&optical.values)
        .filter(|&(&e, _)| e >= low && e <= high)
        .map(|(&e, &a)| (e, a * e.powi(3)))
        .unzip();

    if energies.len() < 2 {
        return Err(EngineError::DegenerateWindow {
            points: energies.len(),
            low,
            high,
        });
    }

    let integral = trapezoid(&weighted, &energies, Spacing::Uniform)?;
    let span = energies[energies.len() - 1] - energies[0];
    if is_negligible(integral, &weighted, span) {
        return Err(EngineError::DegenerateNormalization(integral));
    }
    debug!(
        "Emission window [{:.1}, {:.1}] meV: {} points, integral {}.",
        low,
        high,
        energies.len(),
        integral
    );

    Ok(Luminescence {
        energies_mev: energies,
        values: weighted.into_iter().map(|v| v / integral).collect(),
    })
}

/// True when `integral` is not finite or lies within rounding of zero, given the
/// largest integrand magnitude over an interval of width `span`.
fn is_negligible(integral: Complex64, integrand: &[Complex64], span: f64) -> bool {
    let scale = integrand.iter().map(|v| v.norm()).fold(0.0, f64::max) * span;
    !integral.is_finite() || integral.norm() <= f64::EPSILON * scale
}
