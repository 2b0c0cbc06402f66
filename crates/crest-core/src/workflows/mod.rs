//! # Workflows Module
//!
//! High-level entry points that chain the engine stages into a complete analysis.
//!
//! ## Overview
//!
//! A workflow validates its configuration up front, runs every stage in order and hands back
//! a result object that front ends can tabulate or extract from. Nothing is printed or
//! written here; presentation is left to the caller.
//!
//! - **Analysis Workflow** ([`analyze`]) - Energetics, optional geometric descriptor and
//!   selection over a parsed conformer ensemble.

pub mod analyze;
