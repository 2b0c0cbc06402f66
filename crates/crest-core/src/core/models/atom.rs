use nalgebra::Point3;

/// Represents a single atom of a parsed structure.
///
/// XYZ files carry no connectivity, charges or residue information, so an atom is fully
/// described by its element symbol and its Cartesian position.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element symbol as written in the file (e.g., "C", "Cl").
    pub element: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` from an element symbol and a position.
    ///
    /// # Arguments
    ///
    /// * `element` - The element symbol.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(element: &str, position: Point3<f64>) -> Self {
        Self {
            element: element.to_string(),
            position,
        }
    }
}
