//! # crestparse Core Library
//!
//! A library for analyzing conformer ensembles stored as multi-structure XYZ files, as written
//! by conformer-search tools such as CREST.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so that parsing, numerics and orchestration stay
//! separately testable.
//!
//! - **[`core`]: The Foundation.** Immutable data models (`Structure`, `Atom`), the multi-structure
//!   XYZ reader/writer, and pure geometric functions.
//!
//! - **[`engine`]: The Logic Core.** Energetics (relative energies, Boltzmann populations and the
//!   canonical rank order), descriptor evaluation with index validation, the selector, and the
//!   explicit configuration object threaded through every stage.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into a single analysis
//!   pass whose result can be tabulated or used to extract selected structures.

pub mod core;
pub mod engine;
pub mod workflows;
