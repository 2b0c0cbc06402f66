//! # Core Models Module
//!
//! Data structures for parsed conformer geometries.
//!
//! - [`atom`] - A single atom: element symbol and Cartesian position
//! - [`structure`] - One molecular geometry with its energy and comment line
//!
//! ```ignore
//! use crestparse::core::models::{atom::Atom, structure::Structure};
//! use nalgebra::Point3;
//!
//! let atoms = vec![Atom::new("H", Point3::new(0.0, 0.0, 0.0))];
//! let structure = Structure::new(0, -0.5, "-0.5", atoms);
//! assert_eq!(structure.atom_count(), 1);
//! ```

pub mod atom;
pub mod structure;
