use crate::core::models::structure::Structure;
use crate::core::utils::geometry;
use crate::engine::energetics::EnergyRecord;
use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DescriptorError {
    #[error("Atom index {index} is out of range (valid: 0..={max} for {atom_count} atoms)", max = .atom_count.saturating_sub(1))]
    AtomIndexOutOfRange { index: usize, atom_count: usize },

    #[error("Angle {request} is undefined: two of its atoms coincide")]
    DegenerateGeometry { request: DescriptorRequest },

    #[error("Malformed descriptor '{0}'")]
    Malformed(String),
}

/// A geometric quantity evaluated uniformly across every structure.
///
/// Atom indices are 0-based and are validated against each structure's atom count when the
/// descriptor is evaluated, not when the file is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorRequest {
    /// Interatomic distance in Angstroms.
    Distance(usize, usize),
    /// Bond angle at the middle atom, in degrees.
    Angle(usize, usize, usize),
    /// Dihedral angle about the middle bond, in degrees.
    Dihedral(usize, usize, usize, usize),
}

impl DescriptorRequest {
    pub fn indices(&self) -> Vec<usize> {
        match *self {
            DescriptorRequest::Distance(i, j) => vec![i, j],
            DescriptorRequest::Angle(i, j, k) => vec![i, j, k],
            DescriptorRequest::Dihedral(i, j, k, l) => vec![i, j, k, l],
        }
    }

    /// Column header for tabulated output, e.g. `d(0,1) / Å`.
    pub fn label(&self) -> String {
        match *self {
            DescriptorRequest::Distance(i, j) => format!("d({},{}) / Å", i, j),
            DescriptorRequest::Angle(i, j, k) => format!("a({},{},{}) / °", i, j, k),
            DescriptorRequest::Dihedral(i, j, k, l) => {
                format!("dih({},{},{},{}) / °", i, j, k, l)
            }
        }
    }

    /// Builds a request from a kind name and a list of atom indices.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::Malformed`] if the number of indices does not match the
    /// kind or the kind is unknown.
    pub fn from_indices(kind: &str, indices: &[usize]) -> Result<Self, DescriptorError> {
        match (kind.to_ascii_lowercase().as_str(), indices) {
            ("distance", &[i, j]) => Ok(DescriptorRequest::Distance(i, j)),
            ("angle", &[i, j, k]) => Ok(DescriptorRequest::Angle(i, j, k)),
            ("dihedral", &[i, j, k, l]) => Ok(DescriptorRequest::Dihedral(i, j, k, l)),
            _ => Err(DescriptorError::Malformed(format!(
                "{}:{}",
                kind,
                indices
                    .iter()
                    .map(|i| i.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            ))),
        }
    }

    fn point(structure: &Structure, index: usize) -> Result<&Point3<f64>, DescriptorError> {
        structure
            .position(index)
            .ok_or(DescriptorError::AtomIndexOutOfRange {
                index,
                atom_count: structure.atom_count(),
            })
    }

    /// Evaluates the descriptor on one structure.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::AtomIndexOutOfRange`] for the first index that does not
    /// exist in the structure, and [`DescriptorError::DegenerateGeometry`] for angles whose
    /// arms have zero length.
    pub fn evaluate(&self, structure: &Structure) -> Result<f64, DescriptorError> {
        match *self {
            DescriptorRequest::Distance(i, j) => {
                let (a, b) = (Self::point(structure, i)?, Self::point(structure, j)?);
                Ok(geometry::distance(a, b))
            }
            DescriptorRequest::Angle(i, j, k) => {
                let a = Self::point(structure, i)?;
                let b = Self::point(structure, j)?;
                let c = Self::point(structure, k)?;
                geometry::angle(a, b, c)
                    .ok_or(DescriptorError::DegenerateGeometry { request: *self })
            }
            DescriptorRequest::Dihedral(i, j, k, l) => {
                let a = Self::point(structure, i)?;
                let b = Self::point(structure, j)?;
                let c = Self::point(structure, k)?;
                let d = Self::point(structure, l)?;
                Ok(geometry::dihedral(a, b, c, d))
            }
        }
    }
}

impl fmt::Display for DescriptorRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DescriptorRequest::Distance(i, j) => write!(f, "distance:{},{}", i, j),
            DescriptorRequest::Angle(i, j, k) => write!(f, "angle:{},{},{}", i, j, k),
            DescriptorRequest::Dihedral(i, j, k, l) => {
                write!(f, "dihedral:{},{},{},{}", i, j, k, l)
            }
        }
    }
}

impl FromStr for DescriptorRequest {
    type Err = DescriptorError;

    /// Parses `kind:i,j[,k[,l]]`, e.g. `dihedral:0,1,2,3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DescriptorError::Malformed(s.to_string());
        let (kind, list) = s.split_once(':').ok_or_else(invalid)?;
        let indices = list
            .split(',')
            .map(|t| t.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        Self::from_indices(kind.trim(), &indices).map_err(|_| invalid())
    }
}

/// A descriptor failure attributed to the rank of the structure it occurred on.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Descriptor {request} failed for rank {rank}: {source}")]
pub struct RankedDescriptorError {
    pub rank: usize,
    pub request: DescriptorRequest,
    #[source]
    pub source: DescriptorError,
}

/// Evaluates a descriptor for every record, in rank order.
///
/// The same request is applied to all structures, so the first failure aborts the whole
/// evaluation instead of leaving a gap in the rank-correlated output.
///
/// # Errors
///
/// Returns a [`RankedDescriptorError`] naming the rank whose structure could not be evaluated.
pub fn compute_for_records(
    records: &[EnergyRecord],
    structures: &[Structure],
    request: &DescriptorRequest,
) -> Result<Vec<f64>, RankedDescriptorError> {
    records
        .iter()
        .map(|record| {
            let structure = &structures[record.structure_index];
            request
                .evaluate(structure)
                .map_err(|source| RankedDescriptorError {
                    rank: record.rank,
                    request: *request,
                    source,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::engine::energetics;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn butane_like(index: usize, energy: f64, d_y: f64) -> Structure {
        Structure::new(
            index,
            energy,
            &energy.to_string(),
            vec![
                Atom::new("C", Point3::new(1.0, 0.0, 0.0)),
                Atom::new("C", Point3::new(0.0, 0.0, 0.0)),
                Atom::new("C", Point3::new(0.0, 0.0, 1.0)),
                Atom::new("C", Point3::new(0.0, d_y, 1.0)),
            ],
        )
    }

    #[test]
    fn evaluates_each_descriptor_kind() {
        let s = butane_like(0, -1.0, 1.0);
        let d = DescriptorRequest::Distance(0, 1).evaluate(&s).unwrap();
        assert!(f64_approx_equal(d, 1.0));
        let a = DescriptorRequest::Angle(0, 1, 2).evaluate(&s).unwrap();
        assert!(f64_approx_equal(a, 90.0));
        let t = DescriptorRequest::Dihedral(0, 1, 2, 3).evaluate(&s).unwrap();
        assert!(f64_approx_equal(t, 90.0));
    }

    #[test]
    fn distance_of_atom_to_itself_is_zero() {
        let s = butane_like(0, -1.0, 1.0);
        assert_eq!(DescriptorRequest::Distance(2, 2).evaluate(&s), Ok(0.0));
    }

    #[test]
    fn out_of_range_index_reports_index_and_count() {
        let s = butane_like(0, -1.0, 1.0);
        let err = DescriptorRequest::Dihedral(0, 1, 2, 4).evaluate(&s).unwrap_err();
        assert_eq!(
            err,
            DescriptorError::AtomIndexOutOfRange {
                index: 4,
                atom_count: 4
            }
        );
        assert_eq!(
            err.to_string(),
            "Atom index 4 is out of range (valid: 0..=3 for 4 atoms)"
        );
    }

    #[test]
    fn coincident_angle_atoms_are_degenerate() {
        let s = butane_like(0, -1.0, 1.0);
        let err = DescriptorRequest::Angle(1, 1, 2).evaluate(&s).unwrap_err();
        assert!(matches!(err, DescriptorError::DegenerateGeometry { .. }));
    }

    #[test]
    fn compute_for_records_follows_rank_order() {
        let structures = vec![
            butane_like(0, -1.0, 1.0),
            butane_like(1, -2.0, -1.0),
            butane_like(2, -1.5, 2.0),
        ];
        let records = energetics::compute(&structures, 298.15).unwrap();
        let values = compute_for_records(
            &records,
            &structures,
            &DescriptorRequest::Dihedral(0, 1, 2, 3),
        )
        .unwrap();
        assert_eq!(values.len(), 3);
        assert!(f64_approx_equal(values[0], -90.0));
        assert!(f64_approx_equal(values[1], 90.0));
        assert!(f64_approx_equal(values[2], 90.0));
    }

    #[test]
    fn compute_for_records_aborts_on_first_bad_structure() {
        let mut structures = vec![butane_like(0, -2.0, 1.0)];
        structures.push(Structure::new(
            1,
            -1.0,
            "-1.0",
            vec![Atom::new("H", Point3::origin()), Atom::new("H", Point3::new(0.74, 0.0, 0.0))],
        ));
        let records = energetics::compute(&structures, 298.15).unwrap();
        let err = compute_for_records(&records, &structures, &DescriptorRequest::Distance(0, 3))
            .unwrap_err();
        assert_eq!(err.rank, 2);
        assert_eq!(
            err.source,
            DescriptorError::AtomIndexOutOfRange {
                index: 3,
                atom_count: 2
            }
        );
    }

    #[test]
    fn parses_and_displays_descriptor_strings() {
        assert_eq!(
            "distance:0,1".parse::<DescriptorRequest>(),
            Ok(DescriptorRequest::Distance(0, 1))
        );
        assert_eq!(
            "Angle: 3, 4, 5".parse::<DescriptorRequest>(),
            Ok(DescriptorRequest::Angle(3, 4, 5))
        );
        let dihedral: DescriptorRequest = "dihedral:0,1,2,3".parse().unwrap();
        assert_eq!(dihedral.to_string(), "dihedral:0,1,2,3");
        assert_eq!(dihedral.indices(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn rejects_malformed_descriptor_strings() {
        for text in ["distance:0", "angle:0,1", "torsion:0,1,2,3", "distance", "distance:a,b"] {
            assert!(
                matches!(
                    text.parse::<DescriptorRequest>(),
                    Err(DescriptorError::Malformed(_))
                ),
                "'{}' should be rejected",
                text
            );
        }
    }

    #[test]
    fn labels_name_indices_and_units() {
        assert_eq!(DescriptorRequest::Distance(0, 1).label(), "d(0,1) / Å");
        assert_eq!(DescriptorRequest::Angle(0, 1, 2).label(), "a(0,1,2) / °");
        assert_eq!(
            DescriptorRequest::Dihedral(0, 1, 2, 3).label(),
            "dih(0,1,2,3) / °"
        );
    }
}
