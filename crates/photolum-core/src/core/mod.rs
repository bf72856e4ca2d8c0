//! # Core Module
//!
//! Stateless building blocks of the photoluminescence calculation: the input data
//! models, the file readers that produce them, and the numerical primitives the
//! engine is assembled from.
//!
//! ## Architecture
//!
//! - **Input Models** ([`models`]) - Ground/excited-state geometries and Gamma-point phonons
//! - **File I/O** ([`io`]) - POSCAR/CONTCAR and phonopy `band.yaml` readers
//! - **Numerics** ([`math`]) - Grids, continuous Fourier transforms, integration,
//!   broadening kernels, and unit conversions
//!
//! Nothing in this module holds state between calls; every function is a pure
//! transformation of its arguments.

pub mod io;
pub mod math;
pub mod models;
