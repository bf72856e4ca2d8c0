use crate::core::io::traits::InputFile;
use crate::core::models::phonon::{PhononError, PhononSet};
use nalgebra::Vector3;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum BandYamlError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid band.yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Header declares natom = {declared} but {found} masses are listed")]
    AtomCountMismatch { declared: usize, found: usize },
    #[error("No {0} listed")]
    MissingRecord(&'static str),
    #[error(
        "Band {band} of q-point {qpoint} has no eigenvector (run phonopy with EIGENVECTORS = .TRUE.)"
    )]
    MissingEigenvector { qpoint: usize, band: usize },
    #[error("Eigenvector of band {band} at q-point {qpoint} has {found} atoms, expected {expected}")]
    EigenvectorLength {
        qpoint: usize,
        band: usize,
        expected: usize,
        found: usize,
    },
    #[error("Inconsistent data: {0}")]
    Inconsistency(#[from] PhononError),
}

mod raw {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub(super) struct BandYaml {
        pub natom: Option<usize>,
        #[serde(default)]
        pub points: Vec<Point>,
        #[serde(default)]
        pub phonon: Vec<QPoint>,
    }

    #[derive(Deserialize)]
    pub(super) struct Point {
        pub mass: f64,
    }

    #[derive(Deserialize)]
    pub(super) struct QPoint {
        #[serde(default)]
        pub band: Vec<Band>,
    }

    /// One mode; each eigenvector row is `[[re, im]; 3]` for one atom.
    #[derive(Deserialize)]
    pub(super) struct Band {
        pub frequency: f64,
        pub eigenvector: Option<Vec<[[f64; 2]; 3]>>,
    }
}

/// Reader for phonopy `band.yaml` files written with eigenvectors.
///
/// Every band of every q-point is read in file order, keeping the real part of
/// each eigenvector component. Selecting the distinct Gamma modes is left to
/// [`PhononSet::distinct_half`].
pub struct BandYamlFile;

impl InputFile for BandYamlFile {
    type Output = PhononSet;
    type Error = BandYamlError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let raw::BandYaml {
            natom,
            points,
            phonon,
        } = serde_yaml::from_reader(reader)?;

        let masses: Vec<f64> = points.into_iter().map(|p| p.mass).collect();
        if masses.is_empty() {
            return Err(BandYamlError::MissingRecord("mass"));
        }
        if let Some(declared) = natom.filter(|&n| n != masses.len()) {
            return Err(BandYamlError::AtomCountMismatch {
                declared,
                found: masses.len(),
            });
        }

        let mut frequencies = Vec::new();
        let mut eigenvectors = Vec::new();
        for (qpoint, q) in phonon.into_iter().enumerate() {
            for (band, mode) in q.band.into_iter().enumerate() {
                let rows = mode.eigenvector.ok_or(BandYamlError::MissingEigenvector {
                    qpoint: qpoint + 1,
                    band: band + 1,
                })?;
                if rows.len() != masses.len() {
                    return Err(BandYamlError::EigenvectorLength {
                        qpoint: qpoint + 1,
                        band: band + 1,
                        expected: masses.len(),
                        found: rows.len(),
                    });
                }
                frequencies.push(mode.frequency);
                eigenvectors.push(
                    rows.iter()
                        .map(|[x, y, z]| Vector3::new(x[0], y[0], z[0]))
                        .collect(),
                );
            }
        }
        if frequencies.is_empty() {
            return Err(BandYamlError::MissingRecord("frequency"));
        }

        debug!(
            "Parsed band.yaml with {} atoms and {} modes.",
            masses.len(),
            frequencies.len()
        );
        Ok(PhononSet::new(masses, frequencies, eigenvectors)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Write};
    use tempfile::NamedTempFile;

    fn parse(content: &str) -> Result<PhononSet, BandYamlError> {
        BandYamlFile::read_from(&mut BufReader::new(Cursor::new(content)))
    }

    const BAND_YAML: &str = "\
nqpoint: 1
npath: 1
natom: 1
points:
- symbol: C  # 1
  coordinates: [  0.000000000000000,  0.000000000000000,  0.000000000000000 ]
  mass: 12.010700

phonon:
- q-position: [    0.0000000,    0.0000000,    0.0000000 ]
  distance:    0.0000000
  band:
  - # 1
    frequency:   -0.0123000000
    eigenvector:
    - # atom 1
      - [  1.00000000000000,  0.00000000000000 ]
      - [  0.00000000000000,  0.00000000000000 ]
      - [  0.00000000000000,  0.00000000000000 ]
  - # 2
    frequency:   12.5000000000
    group_velocity: [ 0.0000000, 0.0000000, 0.0000000 ]
    eigenvector:
    - # atom 1
      - [  0.00000000000000,  0.00000000000000 ]
      - [  0.70710678118655, -0.10000000000000 ]
      - [-0.70710678118655,  0.00000000000000 ]
";

    #[test]
    fn reads_masses_frequencies_and_real_eigenvectors() {
        let set = parse(BAND_YAML).unwrap();
        assert_eq!(set.masses(), &[12.0107]);
        assert_eq!(set.frequencies(), &[0.0, 12.5]);
        assert_eq!(set.eigenvectors()[0][0], Vector3::new(1.0, 0.0, 0.0));
        let v = set.eigenvectors()[1][0];
        assert!((v - Vector3::new(0.0, 0.70710678118655, -0.70710678118655)).norm() < 1e-14);
    }

    #[test]
    fn layout_without_comments_or_key_order_reads_the_same() {
        let content = "\
natom: 1
phonon:
- band:
  - eigenvector: [[[1.0, 0.0], [0.0, 0.0], [0.0, 0.0]]]
    frequency: -0.0123
  - frequency: 12.5
    eigenvector:
    - - [0.0, 0.0]
      - [0.70710678118655, -0.1]
      - [-0.70710678118655, 0.0]
  q-position: [0.0, 0.0, 0.0]
points:
- mass: 12.0107
  symbol: C
";
        let reordered = parse(content).unwrap();
        let reference = parse(BAND_YAML).unwrap();
        assert_eq!(reordered.masses(), reference.masses());
        assert_eq!(reordered.frequencies(), reference.frequencies());
        assert_eq!(reordered.eigenvectors(), reference.eigenvectors());
    }

    #[test]
    fn natom_must_match_mass_count() {
        let content = BAND_YAML.replace("natom: 1", "natom: 2");
        assert!(matches!(
            parse(&content),
            Err(BandYamlError::AtomCountMismatch {
                declared: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn band_without_eigenvector_is_rejected() {
        let content: String = BAND_YAML
            .lines()
            .take(14)
            .map(|l| format!("{l}\n"))
            .collect();
        assert!(matches!(
            parse(&content),
            Err(BandYamlError::MissingEigenvector { qpoint: 1, band: 1 })
        ));
    }

    #[test]
    fn eigenvector_must_cover_every_atom() {
        let content = BAND_YAML.replace("natom: 1\n", "").replace(
            "  mass: 12.010700\n",
            "  mass: 12.010700\n- symbol: N\n  coordinates: [ 0.5, 0.5, 0.5 ]\n  mass: 14.0067\n",
        );
        assert!(matches!(
            parse(&content),
            Err(BandYamlError::EigenvectorLength {
                expected: 2,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn malformed_component_is_a_yaml_error() {
        let content = BAND_YAML.replace("[  0.70710678118655", "[  abc");
        assert!(matches!(parse(&content), Err(BandYamlError::Yaml(_))));
    }

    #[test]
    fn missing_masses_is_an_error() {
        let content = BAND_YAML.replace("mass:", "weight:");
        assert!(matches!(parse(&content), Err(BandYamlError::Yaml(_))));

        let content = BAND_YAML.replace("natom: 1\n", "").replace(
            "points:\n- symbol: C  # 1\n  coordinates: [  0.000000000000000,  0.000000000000000,  0.000000000000000 ]\n  mass: 12.010700\n",
            "",
        );
        assert!(matches!(
            parse(&content),
            Err(BandYamlError::MissingRecord("mass"))
        ));
    }

    #[test]
    fn read_from_path_parses_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", BAND_YAML).unwrap();
        let set = BandYamlFile::read_from_path(file.path()).unwrap();
        assert_eq!(set.num_modes(), 2);
    }
}
