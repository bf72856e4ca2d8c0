use crate::cli::SpectrumArgs;
use crate::config::build_spectrum_config;
use crate::error::Result;
use crate::output;
use crate::utils::progress::CliProgressHandler;
use photolum::engine::progress::ProgressReporter;
use photolum::workflows::emission;
use tracing::info;

pub fn run(args: &SpectrumArgs) -> Result<()> {
    let config = build_spectrum_config(args)?;
    info!(
        "Computing emission lineshape: ZPL = {} meV, gamma = {} meV, t_max = {} fs.",
        config.spectrum.zpl, config.spectrum.gamma, config.spectrum.t_max_fs
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting lineshape calculation...");
    let result = emission::run_from_paths(&config.inputs, &config.spectrum, &reporter)?;

    let luminescence_path = output::write_results(&config.output_dir, &result)?;

    if let Some((energy, magnitude)) = result.luminescence.peak() {
        println!(
            "Luminescence peak: {:.2} meV (|L| = {:.4e} / meV)",
            energy, magnitude
        );
    }
    println!(
        "✓ Lineshape written to: {}",
        luminescence_path.display()
    );

    Ok(())
}
