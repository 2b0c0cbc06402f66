//! Provides input/output functionality for the multi-structure XYZ convention.
//!
//! A multi-structure XYZ file is a plain concatenation of single XYZ blocks: an atom-count
//! line, a comment line carrying the energy, and one line per atom. The [`xyz`] module reads
//! whole ensembles and writes single structures back out; [`traits`] provides the path-based
//! convenience layer shared by readers and writers.

pub mod elements;
pub mod traits;
pub mod xyz;
