use std::borrow::Cow;
use std::path::{Path, PathBuf};

use num_complex::Complex64;
use tracing::{info, instrument};

use crate::core::io::band_yaml::BandYamlFile;
use crate::core::io::poscar::PoscarFile;
use crate::core::io::traits::InputFile;
use crate::core::models::geometry::Geometry;
use crate::core::models::phonon::PhononSet;
use crate::engine::config::{ModeSelection, SpectrumConfig};
use crate::engine::error::EngineError;
use crate::engine::huang_rhys::HuangRhysSpectrum;
use crate::engine::progress::{Progress, ProgressReporter, Stage};
use crate::engine::spectrum::{
    self, Luminescence, OpticalSpectrum, SpectralFunction, TimeDomainSpectralFunction,
};

#[derive(Debug, Clone)]
pub struct EmissionResult {
    pub huang_rhys: HuangRhysSpectrum,
    pub spectral_function: SpectralFunction,
    pub time_domain: TimeDomainSpectralFunction,
    /// `G(t)` on the time grid of [`EmissionResult::time_domain`].
    pub generating_function: Vec<Complex64>,
    pub optical_spectrum: OpticalSpectrum,
    pub luminescence: Luminescence,
}

/// Locations of the three input files of an emission run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub ground: PathBuf,
    pub excited: PathBuf,
    pub phonons: PathBuf,
}

impl Default for InputPaths {
    fn default() -> Self {
        Self {
            ground: PathBuf::from("CONTCAR_GS"),
            excited: PathBuf::from("CONTCAR_ES"),
            phonons: PathBuf::from("band.yaml"),
        }
    }
}

pub struct Inputs {
    pub ground: Geometry,
    pub excited: Geometry,
    pub phonons: PhononSet,
}

/// Reads both structures and the phonon listing, attaching the offending path to
/// any loader error.
pub fn load_inputs(paths: &InputPaths) -> Result<Inputs, EngineError> {
    let read_structure = |path: &Path| {
        PoscarFile::read_from_path(path).map_err(|source| EngineError::Structure {
            path: path.to_path_buf(),
            source,
        })
    };
    let ground = read_structure(paths.ground.as_path())?;
    let excited = read_structure(paths.excited.as_path())?;
    let phonons =
        BandYamlFile::read_from_path(&paths.phonons).map_err(|source| EngineError::Phonons {
            path: paths.phonons.clone(),
            source,
        })?;
    info!(
        "Loaded {} atoms and {} phonon modes.",
        ground.num_atoms(),
        phonons.num_modes()
    );
    Ok(Inputs {
        ground,
        excited,
        phonons,
    })
}

#[instrument(skip_all, name = "emission_workflow")]
pub fn run_from_paths(
    paths: &InputPaths,
    config: &SpectrumConfig,
    reporter: &ProgressReporter,
) -> Result<EmissionResult, EngineError> {
    reporter.report(Progress::RunStart {
        stages: 2 + Stage::SPECTRAL.len() as u64,
    });
    let inputs = reporter.stage(Stage::Loading, || load_inputs(paths))?;
    let result = emission_stages(&inputs.ground, &inputs.excited, &inputs.phonons, config, reporter);
    reporter.report(Progress::RunFinish);
    result
}

#[instrument(skip_all, name = "emission_workflow")]
pub fn run(
    ground: &Geometry,
    excited: &Geometry,
    phonons: &PhononSet,
    config: &SpectrumConfig,
    reporter: &ProgressReporter,
) -> Result<EmissionResult, EngineError> {
    reporter.report(Progress::RunStart {
        stages: 1 + Stage::SPECTRAL.len() as u64,
    });
    let result = emission_stages(ground, excited, phonons, config, reporter);
    reporter.report(Progress::RunFinish);
    result
}

/// Runs the spectral stages on an already computed Huang-Rhys spectrum.
///
/// Parameter sweeps over ZPL and damping reuse one spectrum this way.
#[instrument(skip_all, name = "spectral_stages", fields(zpl = config.zpl, gamma = config.gamma))]
pub fn run_spectrum(
    hr: &HuangRhysSpectrum,
    config: &SpectrumConfig,
    reporter: &ProgressReporter,
) -> Result<EmissionResult, EngineError> {
    let energies = reporter.stage(Stage::EnergyGrid, || spectrum::energy_grid(config))?;

    let spectral_function = reporter.stage(Stage::PhononSpectralFunction, || {
        Ok::<_, EngineError>(spectrum::phonon_spectral_function(
            hr,
            &energies,
            &config.broadening,
        ))
    })?;
    if let Some((e, s)) = spectral_function.peak() {
        info!("S(E) peaks at {:.2} meV (S = {:.4e} / meV).", e, s);
    }

    let time_domain = reporter.stage(Stage::TimeDomain, || {
        spectrum::time_domain_spectral_function(hr, &spectral_function)
    })?;

    let generating_function = reporter.stage(Stage::GeneratingFunction, || {
        Ok::<_, EngineError>(spectrum::generating_function(
            hr.total(),
            &time_domain.approximate,
        ))
    })?;

    let optical_spectrum = reporter.stage(Stage::OpticalSpectrum, || {
        spectrum::optical_spectral_function(
            &generating_function,
            &time_domain.times_inv_mev,
            config.zpl,
            config.gamma,
        )
    })?;

    let luminescence = reporter.stage(Stage::Luminescence, || {
        spectrum::luminescence(&optical_spectrum, config.zpl, &config.window)
    })?;
    if let Some((e, l)) = luminescence.peak() {
        info!("Luminescence peaks at {:.2} meV (|L| = {:.4e} / meV).", e, l);
    }

    Ok(EmissionResult {
        huang_rhys: hr.clone(),
        spectral_function,
        time_domain,
        generating_function,
        optical_spectrum,
        luminescence,
    })
}

/// Huang-Rhys spectrum of the retained modes, as the first stage of a run.
pub fn huang_rhys(
    ground: &Geometry,
    excited: &Geometry,
    phonons: &PhononSet,
    selection: ModeSelection,
) -> Result<HuangRhysSpectrum, EngineError> {
    let retained: Cow<'_, PhononSet> = match selection {
        ModeSelection::FirstHalf => Cow::Owned(phonons.distinct_half()?),
        ModeSelection::All => Cow::Borrowed(phonons),
    };
    let hr = HuangRhysSpectrum::compute(ground, excited, &retained)?;
    info!(
        "Total Huang-Rhys factor: {:.4} over {} modes.",
        hr.total(),
        hr.len()
    );
    Ok(hr)
}

fn emission_stages(
    ground: &Geometry,
    excited: &Geometry,
    phonons: &PhononSet,
    config: &SpectrumConfig,
    reporter: &ProgressReporter,
) -> Result<EmissionResult, EngineError> {
    let hr = reporter.stage(Stage::HuangRhys, || {
        huang_rhys(ground, excited, phonons, config.mode_selection)
    })?;
    reporter.report(Progress::Message(format!(
        "Total Huang-Rhys factor {:.4} over {} modes",
        hr.total(),
        hr.len()
    )));
    run_spectrum(&hr, config, reporter)
}
