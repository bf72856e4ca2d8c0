use crate::core::io::traits::InputFile;
use crate::core::models::geometry::{Geometry, GeometryError};
use nalgebra::{Matrix3, Point3, Vector3};
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PoscarError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Rejected by the POSCAR grammar; carries the reader's own message.
    #[error("Malformed POSCAR: {0}")]
    Format(String),
    #[error(
        "Species names must be given on their own line or as the comment ({groups} groups, comment: '{comment}')"
    )]
    MissingSpeciesNames { groups: usize, comment: String },
    #[error("Inconsistent data: {0}")]
    Inconsistency(#[from] GeometryError),
}

/// VASP POSCAR/CONTCAR reader producing Cartesian positions in Angstroms.
///
/// Selective-dynamics flags are accepted and ignored.
pub struct PoscarFile;

impl InputFile for PoscarFile {
    type Output = Geometry;
    type Error = PoscarError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let poscar = vasp_poscar::Poscar::from_reader(reader)
            .map_err(|e| PoscarError::Format(e.to_string()))?;

        let counts: Vec<usize> = poscar.group_counts().collect();
        let names: Vec<String> = match poscar.group_symbols() {
            Some(symbols) => symbols.map(str::to_string).collect(),
            // VASP 4 files; phonopy and ASE put the symbols in the comment.
            None => {
                let words: Vec<String> = poscar
                    .comment()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect();
                if words.len() != counts.len() {
                    return Err(PoscarError::MissingSpeciesNames {
                        groups: counts.len(),
                        comment: poscar.comment().to_string(),
                    });
                }
                words
            }
        };

        let [a, b, c] = poscar.scaled_lattice_vectors();
        let lattice = Matrix3::from_columns(&[Vector3::from(a), Vector3::from(b), Vector3::from(c)]);

        let (positions, kind): (Vec<Point3<f64>>, _) = match poscar.scaled_positions() {
            vasp_poscar::Coords::Cart(p) => (
                p.iter().map(|&xyz| Point3::from(Vector3::from(xyz))).collect(),
                "Cartesian",
            ),
            vasp_poscar::Coords::Frac(p) => (
                p.iter()
                    .map(|&f| Point3::from(lattice * Vector3::from(f)))
                    .collect(),
                "fractional",
            ),
        };

        debug!(
            "Parsed POSCAR with {} atoms ({} coordinates).",
            positions.len(),
            kind
        );

        Ok(Geometry::new(positions, names.into_iter().zip(counts).collect())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor, Write};
    use tempfile::NamedTempFile;

    fn parse(content: &str) -> Result<Geometry, PoscarError> {
        PoscarFile::read_from(&mut BufReader::new(Cursor::new(content)))
    }

    const DIRECT: &str = "\
NV center
2.0
2.0 0.0 0.0
1.0 2.0 0.0
0.0 0.0 3.0
C N
2 1
Direct
0.5 0.5 0.0
0.0 0.0 0.5
0.25 0.0 0.0
";

    #[test]
    fn direct_coordinates_are_converted_with_the_scaled_lattice() {
        let geometry = parse(DIRECT).unwrap();
        assert_eq!(geometry.num_atoms(), 3);
        assert_eq!(geometry.count_of("C"), Some(2));
        assert_eq!(geometry.count_of("N"), Some(1));

        let p = geometry.positions();
        assert!((p[0] - Point3::new(3.0, 2.0, 0.0)).norm() < 1e-12);
        assert!((p[1] - Point3::new(0.0, 0.0, 3.0)).norm() < 1e-12);
        assert!((p[2] - Point3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn cartesian_coordinates_are_scaled() {
        let content = DIRECT.replace("Direct", "Cartesian");
        let geometry = parse(&content).unwrap();
        assert!((geometry.positions()[0] - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn selective_dynamics_flags_are_accepted() {
        let content = DIRECT
            .replace("Direct\n", "Selective dynamics\nDirect\n")
            .replace("0.5 0.5 0.0\n", "0.5 0.5 0.0 T T F\n")
            .replace("0.0 0.0 0.5\n", "0.0 0.0 0.5 T T T\n")
            .replace("0.25 0.0 0.0\n", "0.25 0.0 0.0 F F F\n");
        let geometry = parse(&content).unwrap();
        assert!((geometry.positions()[0] - Point3::new(3.0, 2.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn species_may_come_from_the_comment_line() {
        let content = DIRECT.replace("NV center", "C N").replace("C N\n2 1", "2 1");
        let geometry = parse(&content).unwrap();
        assert_eq!(geometry.count_of("C"), Some(2));
        assert_eq!(geometry.count_of("N"), Some(1));
    }

    #[test]
    fn unnamed_species_are_rejected() {
        let content = DIRECT
            .replace("NV center", "NV center in diamond")
            .replace("C N\n2 1", "2 1");
        assert!(matches!(
            parse(&content),
            Err(PoscarError::MissingSpeciesNames { groups: 2, .. })
        ));
    }

    #[test]
    fn missing_coordinate_lines_are_a_format_error() {
        let content = DIRECT.replace("2 1", "2 3");
        assert!(matches!(parse(&content), Err(PoscarError::Format(_))));
    }

    #[test]
    fn invalid_lattice_value_is_a_format_error() {
        let content = DIRECT.replace("1.0 2.0 0.0", "1.0 two 0.0");
        assert!(matches!(parse(&content), Err(PoscarError::Format(_))));
    }

    #[test]
    fn truncated_header_is_a_format_error() {
        assert!(matches!(
            parse("comment\n1.0\n"),
            Err(PoscarError::Format(_))
        ));
    }

    #[test]
    fn read_from_path_parses_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", DIRECT).unwrap();
        let geometry = PoscarFile::read_from_path(file.path()).unwrap();
        assert_eq!(geometry.num_atoms(), 3);
    }
}
