//! Provides readers for the precomputed inputs of the photoluminescence calculation.
//!
//! Geometries of the ground and excited states come from VASP POSCAR/CONTCAR files,
//! Gamma-point phonons from phonopy `band.yaml` files. Both readers implement the
//! [`traits::InputFile`] trait.

pub mod band_yaml;
pub mod poscar;
pub mod traits;
