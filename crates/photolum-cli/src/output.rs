//! CSV tables for every stage of an emission result.

use crate::error::{CliError, Result};
use photolum::workflows::emission::EmissionResult;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const HUANG_RHYS_FILE: &str = "huang_rhys.csv";
pub const SPECTRAL_FUNCTION_FILE: &str = "spectral_function.csv";
pub const TIME_DOMAIN_FILE: &str = "time_domain.csv";
pub const GENERATING_FUNCTION_FILE: &str = "generating_function.csv";
pub const OPTICAL_SPECTRUM_FILE: &str = "optical_spectrum.csv";
pub const LUMINESCENCE_FILE: &str = "luminescence.csv";

#[derive(Serialize)]
struct HuangRhysRow {
    energy_mev: f64,
    configuration_coordinate: f64,
    partial_huang_rhys: f64,
}

#[derive(Serialize)]
struct SpectralFunctionRow {
    energy_mev: f64,
    spectral_function: f64,
}

#[derive(Serialize)]
struct TimeDomainRow {
    time_fs: f64,
    time_inv_mev: f64,
    approximate_re: f64,
    approximate_im: f64,
    exact_re: f64,
    exact_im: f64,
}

#[derive(Serialize)]
struct GeneratingFunctionRow {
    time_fs: f64,
    re: f64,
    im: f64,
}

#[derive(Serialize)]
struct SpectrumRow {
    energy_mev: f64,
    re: f64,
    im: f64,
    abs: f64,
}

fn write_rows<T: Serialize>(path: &Path, rows: impl IntoIterator<Item = T>) -> Result<()> {
    let to_output_error = |e: csv::Error| CliError::Output {
        path: path.to_path_buf(),
        source: e.into(),
    };
    let mut writer = csv::Writer::from_path(path).map_err(to_output_error)?;
    for row in rows {
        writer.serialize(row).map_err(to_output_error)?;
    }
    writer.flush()?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Writes the six result tables into `dir`, creating it if needed, and returns the
/// path of the luminescence table.
pub fn write_results(dir: &Path, result: &EmissionResult) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let hr = &result.huang_rhys;
    write_rows(
        &dir.join(HUANG_RHYS_FILE),
        hr.energies_mev
            .iter()
            .zip(&hr.configuration_coordinates)
            .zip(&hr.partial_factors)
            .map(|((&energy_mev, &q), &s)| HuangRhysRow {
                energy_mev,
                configuration_coordinate: q,
                partial_huang_rhys: s,
            }),
    )?;

    let s_e = &result.spectral_function;
    write_rows(
        &dir.join(SPECTRAL_FUNCTION_FILE),
        s_e.energies_mev
            .iter()
            .zip(&s_e.values)
            .map(|(&energy_mev, &spectral_function)| SpectralFunctionRow {
                energy_mev,
                spectral_function,
            }),
    )?;

    let s_t = &result.time_domain;
    write_rows(
        &dir.join(TIME_DOMAIN_FILE),
        (0..s_t.times_fs.len()).map(|i| TimeDomainRow {
            time_fs: s_t.times_fs[i],
            time_inv_mev: s_t.times_inv_mev[i],
            approximate_re: s_t.approximate[i].re,
            approximate_im: s_t.approximate[i].im,
            exact_re: s_t.exact[i].re,
            exact_im: s_t.exact[i].im,
        }),
    )?;

    write_rows(
        &dir.join(GENERATING_FUNCTION_FILE),
        s_t.times_fs
            .iter()
            .zip(&result.generating_function)
            .map(|(&time_fs, g)| GeneratingFunctionRow {
                time_fs,
                re: g.re,
                im: g.im,
            }),
    )?;

    let a = &result.optical_spectrum;
    write_rows(
        &dir.join(OPTICAL_SPECTRUM_FILE),
        a.energies_mev
            .iter()
            .zip(&a.values)
            .map(|(&energy_mev, v)| SpectrumRow {
                energy_mev,
                re: v.re,
                im: v.im,
                abs: v.norm(),
            }),
    )?;

    let lum = &result.luminescence;
    let luminescence_path = dir.join(LUMINESCENCE_FILE);
    write_rows(
        &luminescence_path,
        lum.energies_mev
            .iter()
            .zip(&lum.values)
            .zip(lum.intensities())
            .map(|((&energy_mev, v), abs)| SpectrumRow {
                energy_mev,
                re: v.re,
                im: v.im,
                abs,
            }),
    )?;

    Ok(luminescence_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use photolum::engine::huang_rhys::HuangRhysSpectrum;
    use photolum::engine::spectrum::{
        Luminescence, OpticalSpectrum, SpectralFunction, TimeDomainSpectralFunction,
    };
    use tempfile::tempdir;

    fn small_result() -> EmissionResult {
        let c = |re: f64, im: f64| Complex64::new(re, im);
        EmissionResult {
            huang_rhys: HuangRhysSpectrum {
                energies_mev: vec![50.0, 80.0],
                configuration_coordinates: vec![0.1, 0.05],
                partial_factors: vec![0.06, 0.02],
            },
            spectral_function: SpectralFunction {
                energies_mev: vec![0.0, 1.0, 2.0],
                values: vec![0.0, 0.5, 0.25],
            },
            time_domain: TimeDomainSpectralFunction {
                times_inv_mev: vec![-1.0, 0.0, 1.0],
                times_fs: vec![-658.2119, 0.0, 658.2119],
                approximate: vec![c(0.1, 0.2), c(0.08, 0.0), c(0.1, -0.2)],
                exact: vec![c(0.1, 0.2), c(0.08, 0.0), c(0.1, -0.2)],
            },
            generating_function: vec![c(0.9, 0.1), c(1.0, 0.0), c(0.9, -0.1)],
            optical_spectrum: OpticalSpectrum {
                energies_mev: vec![1944.0, 1945.0],
                values: vec![c(0.3, 0.0), c(0.4, 0.0)],
            },
            luminescence: Luminescence {
                energies_mev: vec![1944.0, 1945.0],
                values: vec![c(3.0, 4.0), c(0.0, 1.0)],
            },
        }
    }

    #[test]
    fn writes_all_tables_with_headers() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested").join("run");

        let lum_path = write_results(&out, &small_result()).unwrap();
        assert_eq!(lum_path, out.join(LUMINESCENCE_FILE));

        for file in [
            HUANG_RHYS_FILE,
            SPECTRAL_FUNCTION_FILE,
            TIME_DOMAIN_FILE,
            GENERATING_FUNCTION_FILE,
            OPTICAL_SPECTRUM_FILE,
            LUMINESCENCE_FILE,
        ] {
            assert!(out.join(file).is_file(), "{file} missing");
        }

        let hr = fs::read_to_string(out.join(HUANG_RHYS_FILE)).unwrap();
        let mut lines = hr.lines();
        assert_eq!(
            lines.next(),
            Some("energy_mev,configuration_coordinate,partial_huang_rhys")
        );
        assert_eq!(lines.next(), Some("50.0,0.1,0.06"));
        assert_eq!(lines.count(), 1);

        let lum = fs::read_to_string(&lum_path).unwrap();
        let mut lines = lum.lines();
        assert_eq!(lines.next(), Some("energy_mev,re,im,abs"));
        assert_eq!(lines.next(), Some("1944.0,3.0,4.0,5.0"));
    }

    #[test]
    fn time_domain_table_has_one_row_per_sample() {
        let dir = tempdir().unwrap();
        write_results(dir.path(), &small_result()).unwrap();

        let mut reader = csv::Reader::from_path(dir.path().join(TIME_DOMAIN_FILE)).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), 6);
        assert_eq!(&headers[0], "time_fs");
        assert_eq!(reader.records().count(), 3);
    }
}
