//! # photolum
//!
//! Photoluminescence lineshapes of point defects from first-principles inputs, using the
//! generating-function approach for a multi-mode displaced harmonic oscillator.
//!
//! Given the relaxed ground- and excited-state structures (POSCAR/CONTCAR) and the
//! ground-state Γ-point phonons (phonopy `band.yaml`), the library computes partial
//! Huang-Rhys factors, the phonon spectral function `S(E)`, its time-domain counterpart
//! `S(t)`, the generating function `G(t)`, the optical spectral function `A(E)` and the
//! normalized luminescence `L(E)`.
//!
//! ## Layers
//!
//! - **[`core`]** - data models, file loaders and numerical utilities (grids,
//!   continuous Fourier transforms, quadrature, broadening kernels, units).
//! - **[`engine`]** - the Huang-Rhys calculation and the spectral pipeline, each stage
//!   a pure function, plus run configuration and progress reporting.
//! - **[`workflows`]** - end-to-end entry points such as [`workflows::emission::run`].

pub mod core;
pub mod engine;
pub mod workflows;
