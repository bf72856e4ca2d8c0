use crate::cli::SweepArgs;
use crate::config::{SweepConfig, build_sweep_config};
use crate::error::Result;
use crate::output;
use crate::utils::progress::CliProgressHandler;
use photolum::engine::config::SpectrumConfigBuilder;
use photolum::engine::huang_rhys::HuangRhysSpectrum;
use photolum::engine::progress::ProgressReporter;
use photolum::workflows::emission;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct SweepOutcome {
    pub zpl: f64,
    pub gamma: f64,
    pub output_dir: PathBuf,
    pub peak: Option<(f64, f64)>,
}

/// Subdirectory name for one parameter set, e.g. `zpl-1945_gamma-4`.
pub fn run_dir_name(zpl: f64, gamma: f64) -> String {
    format!("zpl-{}_gamma-{}", zpl, gamma)
}

pub fn run(args: &SweepArgs) -> Result<()> {
    let sweep = build_sweep_config(args)?;
    let parameter_sets = sweep.parameter_sets();
    info!(
        "Sweeping {} parameter set(s): ZPL {:?} meV x gamma {:?} meV.",
        parameter_sets.len(),
        sweep.zpls,
        sweep.gammas
    );

    let inputs = emission::load_inputs(&sweep.base.inputs)?;
    let hr = emission::huang_rhys(
        &inputs.ground,
        &inputs.excited,
        &inputs.phonons,
        sweep.base.spectrum.mode_selection,
    )?;

    println!(
        "Total Huang-Rhys factor: {:.4} over {} modes",
        hr.total(),
        hr.len()
    );
    let outcomes = run_parameter_sets(&sweep, &hr, &parameter_sets)?;

    for outcome in &outcomes {
        match outcome.peak {
            Some((energy, magnitude)) => println!(
                "  ZPL {:>8.2} meV, gamma {:>6.2} meV: peak {:.2} meV (|L| = {:.4e}) -> {}",
                outcome.zpl,
                outcome.gamma,
                energy,
                magnitude,
                outcome.output_dir.display()
            ),
            None => println!(
                "  ZPL {:>8.2} meV, gamma {:>6.2} meV -> {}",
                outcome.zpl,
                outcome.gamma,
                outcome.output_dir.display()
            ),
        }
    }
    println!(
        "✓ {} lineshape(s) written under: {}",
        outcomes.len(),
        sweep.base.output_dir.display()
    );
    Ok(())
}

/// Runs the spectral stages for every `(zpl, gamma)` pair in parallel, reusing `hr`.
pub fn run_parameter_sets(
    sweep: &SweepConfig,
    hr: &HuangRhysSpectrum,
    parameter_sets: &[(f64, f64)],
) -> Result<Vec<SweepOutcome>> {
    let pb = CliProgressHandler::sweep_bar(parameter_sets.len() as u64);
    let silent = ProgressReporter::new();

    let outcomes = parameter_sets
        .par_iter()
        .map(|&(zpl, gamma)| -> Result<SweepOutcome> {
            let config = SpectrumConfigBuilder::from(&sweep.base.spectrum)
                .zpl(zpl)
                .gamma(gamma)
                .build()
                .map_err(photolum::engine::error::EngineError::from)?;
            let result = emission::run_spectrum(hr, &config, &silent)?;

            let output_dir = sweep.base.output_dir.join(run_dir_name(zpl, gamma));
            output::write_results(&output_dir, &result)?;
            pb.inc(1);

            Ok(SweepOutcome {
                zpl,
                gamma,
                output_dir,
                peak: result.luminescence.peak(),
            })
        })
        .collect::<Result<Vec<_>>>();

    pb.finish_and_clear();
    outcomes
}
