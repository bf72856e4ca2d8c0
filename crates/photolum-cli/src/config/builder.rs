use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{AppConfig, SweepConfig};
use crate::cli::{CommonArgs, SpectrumArgs, SweepArgs};
use crate::error::{CliError, Result};
use photolum::engine::config::{EmissionWindow, ModeSelection, SpectrumConfigBuilder};
use photolum::workflows::emission::InputPaths;
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::de::value::StrDeserializer;
use std::path::PathBuf;

pub fn build_spectrum_config(args: &SpectrumArgs) -> Result<AppConfig> {
    let mut file_config = load_file_config(&args.common)?;
    let spectrum = file_config.spectrum.get_or_insert_with(Default::default);
    if args.zpl.is_some() {
        spectrum.zpl = args.zpl;
    }
    if args.gamma.is_some() {
        spectrum.gamma = args.gamma;
    }
    let file_config = apply_set_values(file_config, &args.common.set_values)?;
    resolve(file_config)
}

pub fn build_sweep_config(args: &SweepArgs) -> Result<SweepConfig> {
    let mut file_config = load_file_config(&args.common)?;
    let sweep = file_config.sweep.get_or_insert_with(Default::default);
    if !args.zpl.is_empty() {
        sweep.zpl = Some(args.zpl.clone());
    }
    if !args.gamma.is_empty() {
        sweep.gamma = Some(args.gamma.clone());
    }
    let mut file_config = apply_set_values(file_config, &args.common.set_values)?;

    let defaults = DefaultsConfig::default();
    let sweep = file_config.sweep.take().unwrap_or_default();
    let spectrum = file_config.spectrum.clone().unwrap_or_default();
    let zpls = sweep
        .zpl
        .unwrap_or_else(|| vec![spectrum.zpl.unwrap_or(defaults.zpl)]);
    let gammas = sweep
        .gamma
        .unwrap_or_else(|| vec![spectrum.gamma.unwrap_or(defaults.gamma)]);
    if zpls.is_empty() || gammas.is_empty() {
        return Err(CliError::Argument(
            "a sweep needs at least one ZPL and one damping value".to_string(),
        ));
    }

    Ok(SweepConfig {
        base: resolve(file_config)?,
        zpls,
        gammas,
    })
}

fn load_file_config(args: &CommonArgs) -> Result<FileConfig> {
    let mut config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };

    let inputs = config.inputs.get_or_insert_with(Default::default);
    overlay(&mut inputs.ground, &args.ground);
    overlay(&mut inputs.excited, &args.excited);
    overlay(&mut inputs.phonons, &args.phonons);
    overlay(&mut inputs.output, &args.output);

    let spectrum = config.spectrum.get_or_insert_with(Default::default);
    overlay(&mut spectrum.t_max, &args.t_max);
    if args.all_modes {
        spectrum.mode_selection = Some(ModeSelection::All);
    }

    let broadening = config.broadening.get_or_insert_with(Default::default);
    overlay(&mut broadening.kernel, &args.kernel.map(Into::into));
    overlay(&mut broadening.sigma, &args.sigma);

    Ok(config)
}

fn overlay<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if let Some(v) = value {
        *target = Some(v.clone());
    }
}

fn resolve(mut file_config: FileConfig) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let inputs = file_config.inputs.take().unwrap_or_default();
    let spectrum = file_config.spectrum.take().unwrap_or_default();
    let broadening = file_config.broadening.take().unwrap_or_default();
    let window = file_config.window.take().unwrap_or_default();
    let energy_grid = file_config.energy_grid.take().unwrap_or_default();

    let mut builder = SpectrumConfigBuilder::new()
        .zpl(spectrum.zpl.unwrap_or(defaults.zpl))
        .gamma(spectrum.gamma.unwrap_or(defaults.gamma))
        .t_max_fs(spectrum.t_max.unwrap_or(defaults.t_max_fs))
        .mode_selection(spectrum.mode_selection.unwrap_or_default());
    if let Some(kernel) = broadening.kernel {
        builder = builder.kernel(kernel);
    }
    if let Some(sigma) = broadening.sigma {
        builder = builder.sigma(sigma);
    }
    if let Some(factor) = energy_grid.max_factor {
        builder = builder.energy_max_factor(factor);
    }
    if let Some(energy) = energy_grid.fallback_max {
        builder = builder.fallback_energy_max(energy);
    }
    if window.below_zpl.is_some() || window.above_zpl.is_some() {
        let core_defaults = EmissionWindow::default();
        builder = builder.window(
            window.below_zpl.unwrap_or(core_defaults.below_zpl),
            window.above_zpl.unwrap_or(core_defaults.above_zpl),
        );
    }

    let spectrum = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        inputs: InputPaths {
            ground: inputs.ground.unwrap_or(defaults.ground),
            excited: inputs.excited.unwrap_or(defaults.excited),
            phonons: inputs.phonons.unwrap_or(defaults.phonons),
        },
        output_dir: inputs.output.unwrap_or(defaults.output_dir),
        spectrum,
    })
}

fn parse_float(key: &str, value: &str) -> Result<f64> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid float value for {}: {}", key, value)))
}

fn parse_float_list(key: &str, value: &str) -> Result<Vec<f64>> {
    value
        .split(',')
        .map(|item| parse_float(key, item.trim()))
        .collect()
}

/// Parses a kebab-case keyword such as `lorentzian` or `first-half`.
fn parse_keyword<T: DeserializeOwned>(key: &str, value: &str) -> Result<T> {
    let deserializer: StrDeserializer<'_, serde::de::value::Error> = value.into_deserializer();
    T::deserialize(deserializer)
        .map_err(|e| CliError::Config(format!("Invalid value for {}: {}", key, e)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();
        let value_str = value_str.trim();

        let as_path = || PathBuf::from(value_str);
        match key {
            "inputs.ground" => {
                config.inputs.get_or_insert_with(Default::default).ground = Some(as_path());
            }
            "inputs.excited" => {
                config.inputs.get_or_insert_with(Default::default).excited = Some(as_path());
            }
            "inputs.phonons" => {
                config.inputs.get_or_insert_with(Default::default).phonons = Some(as_path());
            }
            "inputs.output" => {
                config.inputs.get_or_insert_with(Default::default).output = Some(as_path());
            }
            "spectrum.zpl" => {
                config.spectrum.get_or_insert_with(Default::default).zpl =
                    Some(parse_float(key, value_str)?);
            }
            "spectrum.gamma" => {
                config.spectrum.get_or_insert_with(Default::default).gamma =
                    Some(parse_float(key, value_str)?);
            }
            "spectrum.t-max" => {
                config.spectrum.get_or_insert_with(Default::default).t_max =
                    Some(parse_float(key, value_str)?);
            }
            "spectrum.mode-selection" => {
                config
                    .spectrum
                    .get_or_insert_with(Default::default)
                    .mode_selection = Some(parse_keyword(key, value_str)?);
            }
            "broadening.kernel" => {
                config.broadening.get_or_insert_with(Default::default).kernel =
                    Some(parse_keyword(key, value_str)?);
            }
            "broadening.sigma" => {
                config.broadening.get_or_insert_with(Default::default).sigma =
                    Some(parse_float(key, value_str)?);
            }
            "window.below-zpl" => {
                config.window.get_or_insert_with(Default::default).below_zpl =
                    Some(parse_float(key, value_str)?);
            }
            "window.above-zpl" => {
                config.window.get_or_insert_with(Default::default).above_zpl =
                    Some(parse_float(key, value_str)?);
            }
            "energy-grid.max-factor" => {
                config
                    .energy_grid
                    .get_or_insert_with(Default::default)
                    .max_factor = Some(parse_float(key, value_str)?);
            }
            "energy-grid.fallback-max" => {
                config
                    .energy_grid
                    .get_or_insert_with(Default::default)
                    .fallback_max = Some(parse_float(key, value_str)?);
            }
            "sweep.zpl" => {
                config.sweep.get_or_insert_with(Default::default).zpl =
                    Some(parse_float_list(key, value_str)?);
            }
            "sweep.gamma" => {
                config.sweep.get_or_insert_with(Default::default).gamma =
                    Some(parse_float_list(key, value_str)?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
