use crate::core::math::units::frequency_to_energy;
use nalgebra::Vector3;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhononError {
    #[error("{frequencies} frequencies but {modes} eigenvector sets")]
    ModeCountMismatch { frequencies: usize, modes: usize },
    #[error("Mode {mode} has {found} atomic components, expected {expected} (one per mass)")]
    AtomCountMismatch {
        mode: usize,
        expected: usize,
        found: usize,
    },
    #[error("Cannot keep the distinct half of an odd mode list ({0} modes)")]
    OddModeCount(usize),
}

/// Gamma-point phonons of the ground electronic state.
///
/// Frequencies are in THz; eigenvectors are indexed `(mode, atom)` with one
/// Cartesian triple per atom. Imaginary (negative) frequencies are clamped to zero
/// on construction so that unstable modes do not contribute.
#[derive(Debug, Clone, PartialEq)]
pub struct PhononSet {
    masses: Vec<f64>,
    frequencies: Vec<f64>,
    eigenvectors: Vec<Vec<Vector3<f64>>>,
}

impl PhononSet {
    pub fn new(
        masses: Vec<f64>,
        mut frequencies: Vec<f64>,
        eigenvectors: Vec<Vec<Vector3<f64>>>,
    ) -> Result<Self, PhononError> {
        if frequencies.len() != eigenvectors.len() {
            return Err(PhononError::ModeCountMismatch {
                frequencies: frequencies.len(),
                modes: eigenvectors.len(),
            });
        }
        if let Some((mode, atoms)) = eigenvectors
            .iter()
            .enumerate()
            .find(|(_, atoms)| atoms.len() != masses.len())
        {
            return Err(PhononError::AtomCountMismatch {
                mode,
                expected: masses.len(),
                found: atoms.len(),
            });
        }

        let mut clamped = 0;
        for f in frequencies.iter_mut().filter(|f| **f < 0.0) {
            *f = 0.0;
            clamped += 1;
        }
        if clamped > 0 {
            warn!("Clamped {} imaginary phonon frequencies to zero.", clamped);
        }

        Ok(Self {
            masses,
            frequencies,
            eigenvectors,
        })
    }

    /// Keeps the first half of the mode list.
    ///
    /// Gamma-point `band.yaml` listings along a path repeat every physically distinct
    /// mode, once per endpoint. The mode count must therefore be even; anything else
    /// means the listing is not the duplicated one this step expects.
    pub fn distinct_half(&self) -> Result<PhononSet, PhononError> {
        let n = self.num_modes();
        if n % 2 != 0 {
            return Err(PhononError::OddModeCount(n));
        }
        Ok(Self {
            masses: self.masses.clone(),
            frequencies: self.frequencies[..n / 2].to_vec(),
            eigenvectors: self.eigenvectors[..n / 2].to_vec(),
        })
    }

    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn eigenvectors(&self) -> &[Vec<Vector3<f64>>] {
        &self.eigenvectors
    }

    pub fn num_atoms(&self) -> usize {
        self.masses.len()
    }

    pub fn num_modes(&self) -> usize {
        self.frequencies.len()
    }

    /// Mode energies in meV.
    pub fn energies(&self) -> Vec<f64> {
        self.frequencies
            .iter()
            .map(|&f| frequency_to_energy(f))
            .collect()
    }
}
