//! # Core Models Module
//!
//! Immutable input data for the photoluminescence calculation.
//!
//! ## Key Components
//!
//! - [`geometry`] - Equilibrium atomic positions of one electronic state, with species counts
//! - [`phonon`] - Gamma-point phonon masses, frequencies, and eigenvectors
//!
//! Both types validate their shape on construction, so every downstream stage can rely
//! on consistent atom and mode counts.

pub mod geometry;
pub mod phonon;
