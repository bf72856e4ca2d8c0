use std::path::PathBuf;

use num_complex::Complex64;
use thiserror::Error;

use super::config::ConfigError;
use crate::core::io::band_yaml::BandYamlError;
use crate::core::io::poscar::PoscarError;
use crate::core::math::MathError;
use crate::core::models::geometry::GeometryError;
use crate::core::models::phonon::PhononError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read structure from '{}': {source}", path.display())]
    Structure {
        path: PathBuf,
        #[source]
        source: PoscarError,
    },

    #[error("Failed to read phonons from '{}': {source}", path.display())]
    Phonons {
        path: PathBuf,
        #[source]
        source: BandYamlError,
    },

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Phonon data error: {0}")]
    Phonon(#[from] PhononError),

    #[error("Numerical error: {0}")]
    Math(#[from] MathError),

    #[error("Shape mismatch in {what}: expected {expected}, found {found}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error(
        "Emission window [{low}, {high}] meV holds {points} energy point(s); at least 2 are required"
    )]
    DegenerateWindow { points: usize, low: f64, high: f64 },

    #[error("Luminescence normalization integral is {0}, cannot normalize")]
    DegenerateNormalization(Complex64),
}

impl EngineError {
    pub(crate) fn check_len(what: &'static str, expected: usize, found: usize) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(EngineError::ShapeMismatch {
                what,
                expected,
                found,
            })
        }
    }
}
