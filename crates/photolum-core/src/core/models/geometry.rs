use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Species counts sum to {expected} atoms but {found} positions were given")]
    AtomCountMismatch { expected: usize, found: usize },
    #[error("Geometries are not comparable: {0}")]
    Incompatible(String),
}

/// Equilibrium geometry of one electronic state.
///
/// Positions are Cartesian, in Angstroms, ordered species by species in the same
/// order as [`Geometry::species`].
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    positions: Vec<Point3<f64>>,
    species: Vec<(String, usize)>,
}

impl Geometry {
    pub fn new(
        positions: Vec<Point3<f64>>,
        species: Vec<(String, usize)>,
    ) -> Result<Self, GeometryError> {
        let expected: usize = species.iter().map(|(_, count)| count).sum();
        if expected != positions.len() {
            return Err(GeometryError::AtomCountMismatch {
                expected,
                found: positions.len(),
            });
        }
        Ok(Self { positions, species })
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn species(&self) -> &[(String, usize)] {
        &self.species
    }

    pub fn num_atoms(&self) -> usize {
        self.positions.len()
    }

    pub fn count_of(&self, name: &str) -> Option<usize> {
        self.species
            .iter()
            .find(|(species, _)| species == name)
            .map(|&(_, count)| count)
    }

    /// Checks that `other` lists the same species with the same counts, so that atoms
    /// of the two geometries can be matched one to one.
    pub fn ensure_comparable(&self, other: &Geometry) -> Result<(), GeometryError> {
        if self.species != other.species {
            return Err(GeometryError::Incompatible(format!(
                "species {:?} vs {:?}",
                self.species, other.species
            )));
        }
        Ok(())
    }
}
