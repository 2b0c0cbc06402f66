//! # Core Module
//!
//! Fundamental building blocks for conformer-ensemble analysis.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Parsed structures and their atoms
//! - **File I/O** ([`io`]) - Reading and writing the multi-structure XYZ convention
//! - **Geometry** ([`utils`]) - Distances, bond angles and dihedral angles on 3D coordinates
//!
//! Everything in this module is stateless: structures are created once by the parser and are
//! never mutated afterwards.

pub mod io;
pub mod models;
pub mod utils;
