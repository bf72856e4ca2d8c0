use crate::core::math::kernels::Kernel;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value {value} for parameter '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Which part of the phonon mode listing enters the Huang-Rhys sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeSelection {
    /// Keep the first half of the listing, which holds each distinct mode once.
    #[default]
    FirstHalf,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BroadeningConfig {
    pub kernel: Kernel,
    /// Kernel width in meV.
    pub sigma: f64,
}

impl Default for BroadeningConfig {
    fn default() -> Self {
        Self {
            kernel: Kernel::Gaussian,
            sigma: 6.0,
        }
    }
}

/// Energy range around the zero-phonon line kept in the luminescence lineshape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmissionWindow {
    pub below_zpl: f64,
    pub above_zpl: f64,
}

impl EmissionWindow {
    /// Inclusive `(low, high)` bounds in meV for the given zero-phonon line.
    pub fn bounds(&self, zpl: f64) -> (f64, f64) {
        (zpl - self.below_zpl, zpl + self.above_zpl)
    }
}

impl Default for EmissionWindow {
    fn default() -> Self {
        Self {
            below_zpl: 500.0,
            above_zpl: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyGridConfig {
    /// Upper grid bound as a multiple of the zero-phonon line.
    pub max_factor: f64,
    /// Upper grid bound in meV used when the zero-phonon line is exactly zero.
    pub fallback_max: f64,
}

impl Default for EnergyGridConfig {
    fn default() -> Self {
        Self {
            max_factor: 2.5,
            fallback_max: 5000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumConfig {
    /// Zero-phonon line in meV.
    pub zpl: f64,
    /// Time-domain extent in fs; fixes the energy resolution.
    pub t_max_fs: f64,
    /// Homogeneous damping of the generating function in meV.
    pub gamma: f64,
    pub broadening: BroadeningConfig,
    pub window: EmissionWindow,
    pub energy_grid: EnergyGridConfig,
    pub mode_selection: ModeSelection,
}

#[derive(Default, Clone)]
pub struct SpectrumConfigBuilder {
    zpl: Option<f64>,
    t_max_fs: Option<f64>,
    gamma: Option<f64>,
    kernel: Option<Kernel>,
    sigma: Option<f64>,
    below_zpl: Option<f64>,
    above_zpl: Option<f64>,
    max_factor: Option<f64>,
    fallback_max: Option<f64>,
    mode_selection: Option<ModeSelection>,
}

impl SpectrumConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zpl(mut self, zpl: f64) -> Self {
        self.zpl = Some(zpl);
        self
    }
    pub fn t_max_fs(mut self, t_max_fs: f64) -> Self {
        self.t_max_fs = Some(t_max_fs);
        self
    }
    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = Some(gamma);
        self
    }
    pub fn kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = Some(kernel);
        self
    }
    pub fn sigma(mut self, sigma: f64) -> Self {
        self.sigma = Some(sigma);
        self
    }
    pub fn window(mut self, below_zpl: f64, above_zpl: f64) -> Self {
        self.below_zpl = Some(below_zpl);
        self.above_zpl = Some(above_zpl);
        self
    }
    pub fn energy_max_factor(mut self, factor: f64) -> Self {
        self.max_factor = Some(factor);
        self
    }
    pub fn fallback_energy_max(mut self, energy: f64) -> Self {
        self.fallback_max = Some(energy);
        self
    }
    pub fn mode_selection(mut self, selection: ModeSelection) -> Self {
        self.mode_selection = Some(selection);
        self
    }

    pub fn build(self) -> Result<SpectrumConfig, ConfigError> {
        let zpl = self.zpl.ok_or(ConfigError::MissingParameter("zpl"))?;
        let t_max_fs = self
            .t_max_fs
            .ok_or(ConfigError::MissingParameter("t_max_fs"))?;
        let gamma = self.gamma.ok_or(ConfigError::MissingParameter("gamma"))?;

        let broadening_defaults = BroadeningConfig::default();
        let window_defaults = EmissionWindow::default();
        let grid_defaults = EnergyGridConfig::default();

        let config = SpectrumConfig {
            zpl: non_negative("zpl", zpl)?,
            t_max_fs: positive("t_max_fs", t_max_fs)?,
            gamma: non_negative("gamma", gamma)?,
            broadening: BroadeningConfig {
                kernel: self.kernel.unwrap_or(broadening_defaults.kernel),
                sigma: positive("sigma", self.sigma.unwrap_or(broadening_defaults.sigma))?,
            },
            window: EmissionWindow {
                below_zpl: non_negative(
                    "window_below_zpl",
                    self.below_zpl.unwrap_or(window_defaults.below_zpl),
                )?,
                above_zpl: non_negative(
                    "window_above_zpl",
                    self.above_zpl.unwrap_or(window_defaults.above_zpl),
                )?,
            },
            energy_grid: EnergyGridConfig {
                max_factor: positive(
                    "energy_max_factor",
                    self.max_factor.unwrap_or(grid_defaults.max_factor),
                )?,
                fallback_max: positive(
                    "fallback_energy_max",
                    self.fallback_max.unwrap_or(grid_defaults.fallback_max),
                )?,
            },
            mode_selection: self.mode_selection.unwrap_or_default(),
        };
        Ok(config)
    }
}

impl From<&SpectrumConfig> for SpectrumConfigBuilder {
    fn from(config: &SpectrumConfig) -> Self {
        Self {
            zpl: Some(config.zpl),
            t_max_fs: Some(config.t_max_fs),
            gamma: Some(config.gamma),
            kernel: Some(config.broadening.kernel),
            sigma: Some(config.broadening.sigma),
            below_zpl: Some(config.window.below_zpl),
            above_zpl: Some(config.window.above_zpl),
            max_factor: Some(config.energy_grid.max_factor),
            fallback_max: Some(config.energy_grid.fallback_max),
            mode_selection: Some(config.mode_selection),
        }
    }
}

fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            value,
            reason: "must be finite and greater than zero",
        })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            value,
            reason: "must be finite and not negative",
        })
    }
}
