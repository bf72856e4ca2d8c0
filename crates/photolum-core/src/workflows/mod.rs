//! High-level entry points that chain loading, the Huang-Rhys engine and the
//! spectral stages into one emission calculation.

pub mod emission;
