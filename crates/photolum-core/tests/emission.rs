use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use num_complex::Complex64;
use photolum::core::math::integrate::{Spacing, trapezoid};
use photolum::core::math::units::THZ_TO_MEV;
use photolum::engine::config::{ModeSelection, SpectrumConfig, SpectrumConfigBuilder};
use photolum::engine::progress::ProgressReporter;
use photolum::workflows::emission::{self, EmissionResult, InputPaths};
use tempfile::TempDir;

const ZPL: f64 = 1945.0;
const MODE_ENERGY: f64 = 50.0;

fn poscar(x: f64) -> String {
    format!(
        "single helium\n\
         1.0\n\
         10.0 0.0 0.0\n\
         0.0 10.0 0.0\n\
         0.0 0.0 10.0\n\
         He\n\
         1\n\
         Cartesian\n\
         {x:.6} 0.000000 0.000000\n"
    )
}

fn band_yaml(frequency: f64) -> String {
    let band = |index: usize| {
        format!(
            "  - # {index}\n    frequency: {frequency:.10}\n    eigenvector:\n    - # atom 1\n      - [  1.00000000000000,  0.00000000000000 ]\n      - [  0.00000000000000,  0.00000000000000 ]\n      - [  0.00000000000000,  0.00000000000000 ]\n"
        )
    };
    format!(
        "nqpoint: 2\nnatom: 1\npoints:\n- symbol: He # 1\n  coordinates: [ 0.0, 0.0, 0.0 ]\n  mass: 4.000000\n\nphonon:\n- q-position: [ 0.0, 0.0, 0.0 ]\n  band:\n{}{}",
        band(1),
        band(2)
    )
}

fn write_inputs(dir: &Path) -> InputPaths {
    let paths = InputPaths {
        ground: dir.join("CONTCAR_GS"),
        excited: dir.join("CONTCAR_ES"),
        phonons: dir.join("band.yaml"),
    };
    fs::write(&paths.ground, poscar(0.0)).unwrap();
    fs::write(&paths.excited, poscar(0.05)).unwrap();
    fs::write(&paths.phonons, band_yaml(MODE_ENERGY / THZ_TO_MEV)).unwrap();
    paths
}

fn config(selection: ModeSelection) -> SpectrumConfig {
    SpectrumConfigBuilder::new()
        .zpl(ZPL)
        .t_max_fs(2000.0)
        .gamma(4.0)
        .mode_selection(selection)
        .build()
        .unwrap()
}

fn run(selection: ModeSelection) -> EmissionResult {
    let dir = TempDir::new().unwrap();
    let paths = write_inputs(dir.path());
    emission::run_from_paths(&paths, &config(selection), &ProgressReporter::new()).unwrap()
}

fn magnitude_near(result: &EmissionResult, energy: f64) -> f64 {
    result
        .luminescence
        .energies_mev
        .iter()
        .zip(&result.luminescence.values)
        .min_by(|a, b| (a.0 - energy).abs().total_cmp(&(b.0 - energy).abs()))
        .map(|(_, v)| v.norm())
        .unwrap()
}

#[test]
fn single_mode_huang_rhys_factor_matches_closed_form() {
    let result = run(ModeSelection::FirstHalf);
    let hr = &result.huang_rhys;

    assert_eq!(hr.len(), 1);
    assert!((hr.energies_mev[0] - MODE_ENERGY).abs() < 1e-6);
    assert!((hr.configuration_coordinates[0] - 0.1).abs() < 1e-9);

    let frequency = MODE_ENERGY / THZ_TO_MEV;
    let expected = 2.0 * PI * frequency * 0.01 * 0.166 / (2.0 * 1.05457);
    assert!((hr.total() - expected).abs() < 1e-9);
    assert!((hr.total() - 0.0598).abs() < 1e-3);
}

#[test]
fn keeping_all_modes_double_counts_the_duplicated_listing() {
    let half = run(ModeSelection::FirstHalf).huang_rhys.total();
    let all = run(ModeSelection::All).huang_rhys.total();
    assert!((all - 2.0 * half).abs() < 1e-9);
}

#[test]
fn generating_function_starts_at_unity() {
    let result = run(ModeSelection::FirstHalf);
    let origin = result
        .time_domain
        .times_inv_mev
        .iter()
        .position(|&t| t == 0.0)
        .unwrap();
    assert!((result.generating_function[origin] - Complex64::new(1.0, 0.0)).norm() < 1e-4);
}

#[test]
fn luminescence_is_normalized_and_peaks_at_the_zero_phonon_line() {
    let result = run(ModeSelection::FirstHalf);
    let lum = &result.luminescence;

    assert!(lum.energies_mev.iter().all(|&e| (ZPL - 500.0..=ZPL + 100.0).contains(&e)));
    let integral = trapezoid(&lum.values, &lum.energies_mev, Spacing::Uniform).unwrap();
    assert!((integral - Complex64::new(1.0, 0.0)).norm() < 1e-6);

    let (e_peak, _) = lum.peak().unwrap();
    assert!((e_peak - ZPL).abs() < 1.5, "peak at {e_peak}");
}

#[test]
fn one_phonon_sideband_appears_one_mode_energy_below_the_zpl() {
    let result = run(ModeSelection::FirstHalf);
    let sideband = magnitude_near(&result, ZPL - MODE_ENERGY);
    let valley = magnitude_near(&result, ZPL - 30.0);
    let zpl = magnitude_near(&result, ZPL);

    assert!(sideband > valley, "sideband {sideband} vs valley {valley}");
    assert!(zpl > sideband);
}
