use super::atom::Atom;
use nalgebra::Point3;

/// Represents one molecular geometry parsed from a multi-structure XYZ file.
///
/// A structure is created once by the parser and is read-only afterwards; every later stage
/// (energetics, descriptors, selection, extraction) only borrows it. The number of atoms is
/// always the count declared by the structure's header line.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    /// Zero-based position of the structure in the input file.
    source_index: usize,
    /// The energy in Hartree extracted from the comment line.
    energy: f64,
    /// The raw comment line, kept verbatim for extraction.
    comment: String,
    /// The atoms in file order.
    atoms: Vec<Atom>,
}

impl Structure {
    /// Creates a new structure.
    ///
    /// # Arguments
    ///
    /// * `source_index` - Zero-based position of the structure in its source file.
    /// * `energy` - The energy in Hartree.
    /// * `comment` - The comment line the energy was read from.
    /// * `atoms` - The atoms of the geometry.
    pub fn new(source_index: usize, energy: f64, comment: &str, atoms: Vec<Atom>) -> Self {
        Self {
            source_index,
            energy,
            comment: comment.to_string(),
            atoms,
        }
    }

    pub fn source_index(&self) -> usize {
        self.source_index
    }

    /// Returns the energy of the structure in Hartree.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns the number of atoms, as declared by the structure's header line.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Retrieves an atom by its zero-based index.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the index is in range, otherwise `None`.
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Retrieves the position of an atom by its zero-based index.
    pub fn position(&self, index: usize) -> Option<&Point3<f64>> {
        self.atoms.get(index).map(|atom| &atom.position)
    }

    /// Iterates over the element symbols in file order.
    pub fn elements(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().map(|atom| atom.element.as_str())
    }
}
