use crate::error::{CliError, Result};
use photolum::core::math::kernels::Kernel;
use photolum::engine::config::ModeSelection;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileInputsConfig {
    pub ground: Option<PathBuf>,
    pub excited: Option<PathBuf>,
    pub phonons: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSpectrumConfig {
    pub zpl: Option<f64>,
    pub gamma: Option<f64>,
    pub t_max: Option<f64>,
    pub mode_selection: Option<ModeSelection>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileBroadeningConfig {
    pub kernel: Option<Kernel>,
    pub sigma: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileWindowConfig {
    pub below_zpl: Option<f64>,
    pub above_zpl: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileEnergyGridConfig {
    pub max_factor: Option<f64>,
    pub fallback_max: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSweepConfig {
    pub zpl: Option<Vec<f64>>,
    pub gamma: Option<Vec<f64>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub inputs: Option<FileInputsConfig>,
    pub spectrum: Option<FileSpectrumConfig>,
    pub broadening: Option<FileBroadeningConfig>,
    pub window: Option<FileWindowConfig>,
    pub energy_grid: Option<FileEnergyGridConfig>,
    pub sweep: Option<FileSweepConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_every_section() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photolum.toml");
        fs::write(
            &path,
            r#"
            [inputs]
            ground = "relaxed/CONTCAR_GS"
            excited = "relaxed/CONTCAR_ES"
            phonons = "phonopy/band.yaml"
            output = "lineshape"

            [spectrum]
            zpl = 1950.0
            gamma = 3.5
            t-max = 1500.0
            mode-selection = "all"

            [broadening]
            kernel = "lorentzian"
            sigma = 4.0

            [window]
            below-zpl = 400.0
            above-zpl = 50.0

            [energy-grid]
            max-factor = 3.0
            fallback-max = 6000.0

            [sweep]
            zpl = [1900.0, 1950.0]
            gamma = [2.0, 4.0, 8.0]
            "#,
        )
        .unwrap();

        let config = FileConfig::from_file(&path).unwrap();

        let inputs = config.inputs.unwrap();
        assert_eq!(inputs.phonons, Some(PathBuf::from("phonopy/band.yaml")));
        let spectrum = config.spectrum.unwrap();
        assert_eq!(spectrum.zpl, Some(1950.0));
        assert_eq!(spectrum.t_max, Some(1500.0));
        assert_eq!(spectrum.mode_selection, Some(ModeSelection::All));
        assert_eq!(config.broadening.unwrap().kernel, Some(Kernel::Lorentzian));
        assert_eq!(config.window.unwrap().below_zpl, Some(400.0));
        assert_eq!(config.energy_grid.unwrap().fallback_max, Some(6000.0));
        assert_eq!(config.sweep.unwrap().gamma, Some(vec![2.0, 4.0, 8.0]));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[spectrum]\nzero-phonon-line = 1945.0\n").unwrap();

        assert!(matches!(
            FileConfig::from_file(&path),
            Err(CliError::FileParsing { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            FileConfig::from_file(&dir.path().join("absent.toml")),
            Err(CliError::Io(_))
        ));
    }
}
