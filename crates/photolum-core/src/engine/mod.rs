//! # Engine Module
//!
//! Computational layer between the stateless `core` and the `workflows` entry points.
//!
//! - **Configuration** ([`config`]) - validated run parameters and their builder
//! - **Huang-Rhys** ([`huang_rhys`]) - configuration coordinates and partial factors
//! - **Spectrum** ([`spectrum`]) - the generating-function stages from `S(E)` to `L(E)`
//! - **Progress** ([`progress`]) - stage notifications for front ends
//! - **Errors** ([`error`]) - [`error::EngineError`], which every core error converts into

pub mod config;
pub mod error;
pub mod huang_rhys;
pub mod progress;
pub mod spectrum;
