use std::f64::consts::PI;

use nalgebra::{Point3, Vector3};
use tracing::debug;

use super::error::EngineError;
use crate::core::models::geometry::Geometry;
use crate::core::models::phonon::PhononSet;

/// One amu·Å² in units of 1e-46 kg·m².
const AMU_ANGSTROM_SQ: f64 = 0.166;
/// Reduced Planck constant in units of 1e-34 J·s.
const HBAR_JS: f64 = 1.05457;

/// Projects the mass-weighted displacement between the two geometries onto each mode.
///
/// `q_k = Σ_a sqrt(m_a) (R_es,a − R_gs,a) · e_k,a`, in amu^½·Å.
///
/// # Errors
///
/// Returns [`EngineError::ShapeMismatch`] if either geometry or any mode does not
/// carry one entry per mass.
pub fn configuration_coordinates(
    masses: &[f64],
    excited: &[Point3<f64>],
    ground: &[Point3<f64>],
    modes: &[Vec<Vector3<f64>>],
) -> Result<Vec<f64>, EngineError> {
    EngineError::check_len("excited-state positions", masses.len(), excited.len())?;
    EngineError::check_len("ground-state positions", masses.len(), ground.len())?;
    for mode in modes {
        EngineError::check_len("mode eigenvector", masses.len(), mode.len())?;
    }

    let weighted: Vec<Vector3<f64>> = masses
        .iter()
        .zip(excited.iter().zip(ground))
        .map(|(&m, (es, gs))| (es - gs) * m.sqrt())
        .collect();

    Ok(modes
        .iter()
        .map(|mode| mode.iter().zip(&weighted).map(|(e, d)| e.dot(d)).sum::<f64>())
        .collect())
}

/// Partial Huang-Rhys factor of each mode, `S_k = ω_k q_k² / 2ħ` with `ω_k = 2π f_k`.
///
/// Frequencies are in THz and coordinates in amu^½·Å.
pub fn partial_huang_rhys(frequencies: &[f64], q: &[f64]) -> Result<Vec<f64>, EngineError> {
    EngineError::check_len("configuration coordinates", frequencies.len(), q.len())?;
    Ok(frequencies
        .iter()
        .zip(q)
        .map(|(&f, &q)| 2.0 * PI * f * q * q * AMU_ANGSTROM_SQ / (2.0 * HBAR_JS))
        .collect())
}

/// Discrete electron-phonon coupling spectrum: one `(E_k, q_k, S_k)` entry per mode.
#[derive(Debug, Clone, PartialEq)]
pub struct HuangRhysSpectrum {
    pub energies_mev: Vec<f64>,
    pub configuration_coordinates: Vec<f64>,
    pub partial_factors: Vec<f64>,
}

impl HuangRhysSpectrum {
    pub fn compute(
        ground: &Geometry,
        excited: &Geometry,
        phonons: &PhononSet,
    ) -> Result<Self, EngineError> {
        ground.ensure_comparable(excited)?;

        let q = configuration_coordinates(
            phonons.masses(),
            excited.positions(),
            ground.positions(),
            phonons.eigenvectors(),
        )?;
        let partial_factors = partial_huang_rhys(phonons.frequencies(), &q)?;
        debug!(
            "Computed {} partial Huang-Rhys factors over {} atoms.",
            partial_factors.len(),
            phonons.num_atoms()
        );

        Ok(Self {
            energies_mev: phonons.energies(),
            configuration_coordinates: q,
            partial_factors,
        })
    }

    /// Total Huang-Rhys factor `S = Σ S_k`.
    pub fn total(&self) -> f64 {
        self.partial_factors.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.partial_factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partial_factors.is_empty()
    }

    /// Iterates over `(E_k, S_k)` pairs.
    pub fn modes(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.energies_mev
            .iter()
            .copied()
            .zip(self.partial_factors.iter().copied())
    }
}
