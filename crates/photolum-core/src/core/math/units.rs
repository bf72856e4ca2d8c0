/// Energy in meV of one THz of vibrational frequency (Planck constant in meV/THz).
pub const THZ_TO_MEV: f64 = 4.13566;

/// Reduced Planck constant in meV·fs.
pub const HBAR_MEV_FS: f64 = 658.2119;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeDirection {
    /// Femtoseconds to the energy-domain time unit (meV⁻¹).
    FemtosecondsToInverseMev,
    /// Energy-domain time (meV⁻¹) back to femtoseconds.
    InverseMevToFemtoseconds,
}

#[inline]
pub fn frequency_to_energy(frequency_thz: f64) -> f64 {
    THZ_TO_MEV * frequency_thz
}

#[inline]
pub fn scale_time(t: f64, direction: TimeDirection) -> f64 {
    match direction {
        TimeDirection::FemtosecondsToInverseMev => t / HBAR_MEV_FS,
        TimeDirection::InverseMevToFemtoseconds => t * HBAR_MEV_FS,
    }
}
