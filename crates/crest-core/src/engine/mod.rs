//! # Engine Module
//!
//! Turns a parsed conformer ensemble into ranked, weighted and filtered data.
//!
//! ## Overview
//!
//! Each submodule is one stage of the analysis pipeline. Stages take their parameters
//! explicitly through [`config::AnalysisConfig`] and return typed errors, so they can be
//! composed freely by the [`crate::workflows`] layer or used on their own.
//!
//! - **Configuration** ([`config`]) - Temperature, selection criteria and descriptor requests
//! - **Energetics** ([`energetics`]) - Rank ordering, relative energies and Boltzmann populations
//! - **Descriptors** ([`descriptors`]) - Index-validated geometric quantities per structure
//! - **Selection** ([`selection`]) - Energy cutoff and explicit rank filtering
//! - **Error Handling** ([`error`]) - The umbrella error raised by workflows

pub mod config;
pub mod descriptors;
pub mod energetics;
pub mod error;
pub mod selection;
