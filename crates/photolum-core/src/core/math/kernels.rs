use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Half-width scale applied to the Lorentzian so that, for the same `sigma`, its
/// width is comparable to the Gaussian's.
pub const LORENTZIAN_WIDTH_SCALE: f64 = 0.8;

/// Broadening kernel used to replace each Dirac delta of a discrete spectrum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Kernel {
    #[default]
    Gaussian,
    Lorentzian,
}

impl Kernel {
    #[inline]
    pub fn evaluate(self, x: f64, x0: f64, sigma: f64) -> f64 {
        match self {
            Kernel::Gaussian => gaussian(x, x0, sigma),
            Kernel::Lorentzian => lorentzian(x, x0, sigma),
        }
    }
}

#[inline]
pub fn gaussian(x: f64, x0: f64, sigma: f64) -> f64 {
    let d = x - x0;
    (-(d * d) / (2.0 * sigma * sigma)).exp() / (2.0 * PI * sigma * sigma).sqrt()
}

#[inline]
pub fn lorentzian(x: f64, x0: f64, sigma: f64) -> f64 {
    let gamma = LORENTZIAN_WIDTH_SCALE * sigma;
    let d = x - x0;
    (gamma / PI) / (gamma * gamma + d * d)
}
