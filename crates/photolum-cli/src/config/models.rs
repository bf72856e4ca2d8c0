use photolum::engine::config::SpectrumConfig;
use photolum::workflows::emission::InputPaths;
use std::collections::HashSet;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub inputs: InputPaths,
    pub output_dir: PathBuf,
    pub spectrum: SpectrumConfig,
}

/// A base configuration plus the ZPL and damping values to combine with it.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub base: AppConfig,
    pub zpls: Vec<f64>,
    pub gammas: Vec<f64>,
}

impl SweepConfig {
    /// Every distinct `(zpl, gamma)` pair, ZPL-major, in first-seen order.
    ///
    /// Each pair owns one output directory, so repeated values are dropped.
    pub fn parameter_sets(&self) -> Vec<(f64, f64)> {
        let mut seen = HashSet::new();
        self.zpls
            .iter()
            .flat_map(|&zpl| self.gammas.iter().map(move |&gamma| (zpl, gamma)))
            .filter(|&(zpl, gamma)| seen.insert((zpl.to_bits(), gamma.to_bits())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep(zpls: &[f64], gammas: &[f64]) -> SweepConfig {
        SweepConfig {
            base: AppConfig {
                inputs: InputPaths::default(),
                output_dir: PathBuf::from("out"),
                spectrum: photolum::engine::config::SpectrumConfigBuilder::new()
                    .zpl(1945.0)
                    .gamma(4.0)
                    .t_max_fs(2000.0)
                    .build()
                    .unwrap(),
            },
            zpls: zpls.to_vec(),
            gammas: gammas.to_vec(),
        }
    }

    #[test]
    fn parameter_sets_are_zpl_major() {
        assert_eq!(
            sweep(&[1900.0, 1950.0], &[2.0, 4.0]).parameter_sets(),
            vec![(1900.0, 2.0), (1900.0, 4.0), (1950.0, 2.0), (1950.0, 4.0)]
        );
    }

    #[test]
    fn repeated_values_yield_each_pair_once() {
        assert_eq!(
            sweep(&[1945.0, 1900.0, 1945.0], &[4.0, 4.0]).parameter_sets(),
            vec![(1945.0, 4.0), (1900.0, 4.0)]
        );
    }
}
