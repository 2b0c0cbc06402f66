use crate::core::models::structure::Structure;
use crate::engine::config::AnalysisConfig;
use crate::engine::descriptors::{self, DescriptorRequest};
use crate::engine::energetics::{self, EnergyRecord};
use crate::engine::error::EngineError;
use crate::engine::selection;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// One rank-ordered line of the report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportRow {
    pub rank: usize,
    pub structure_index: usize,
    pub absolute_energy: f64,
    pub relative_energy_hartree: f64,
    pub relative_energy_kcal: f64,
    pub boltzmann_percent: f64,
    pub descriptor: Option<f64>,
}

/// The outcome of an analysis pass over one ensemble.
///
/// Borrows the structures it was computed from, so extraction can write the original
/// coordinates and comment lines without copying them.
#[derive(Debug, Clone)]
pub struct Analysis<'a> {
    structures: &'a [Structure],
    temperature_k: f64,
    records: Vec<EnergyRecord>,
    descriptor: Option<DescriptorRequest>,
    descriptor_values: Option<Vec<f64>>,
    selected_ranks: Vec<usize>,
}

impl<'a> Analysis<'a> {
    /// All records in rank order.
    pub fn records(&self) -> &[EnergyRecord] {
        &self.records
    }

    /// The temperature the populations were computed at, in Kelvin.
    pub fn temperature_k(&self) -> f64 {
        self.temperature_k
    }

    pub fn selected_ranks(&self) -> &[usize] {
        &self.selected_ranks
    }

    pub fn descriptor(&self) -> Option<&DescriptorRequest> {
        self.descriptor.as_ref()
    }

    pub fn record(&self, rank: usize) -> Option<&EnergyRecord> {
        rank.checked_sub(1).and_then(|i| self.records.get(i))
    }

    fn row_at(&self, position: usize) -> ReportRow {
        let record = &self.records[position];
        ReportRow {
            rank: record.rank,
            structure_index: record.structure_index,
            absolute_energy: record.absolute_energy,
            relative_energy_hartree: record.relative_energy_hartree,
            relative_energy_kcal: record.relative_energy_kcal,
            boltzmann_percent: record.boltzmann_percent,
            descriptor: self.descriptor_values.as_ref().map(|v| v[position]),
        }
    }

    /// Report rows for every structure, in rank order.
    pub fn rows(&self) -> Vec<ReportRow> {
        (0..self.records.len()).map(|i| self.row_at(i)).collect()
    }

    /// Report rows for the selected ranks only.
    pub fn selected_rows(&self) -> Vec<ReportRow> {
        self.selected_ranks
            .iter()
            .map(|&rank| self.row_at(rank - 1))
            .collect()
    }

    /// The structure holding the given 1-based rank.
    pub fn structure(&self, rank: usize) -> Option<&'a Structure> {
        let structures = self.structures;
        self.record(rank)
            .map(|record| &structures[record.structure_index])
    }

    /// The selected structures paired with their ranks, in ascending rank order.
    pub fn selected_structures(&self) -> Vec<(usize, &'a Structure)> {
        self.selected_ranks
            .iter()
            .filter_map(|&rank| self.structure(rank).map(|s| (rank, s)))
            .collect()
    }
}

/// Runs the full analysis pipeline on a parsed ensemble.
///
/// The configuration is validated before any computation, then energetics, the optional
/// descriptor and the selection are computed in that order. Populations always cover the
/// whole ensemble; selection only restricts what is reported.
///
/// # Arguments
///
/// * `structures` - The parsed structures in file order.
/// * `config` - The analysis parameters.
///
/// # Errors
///
/// Returns [`EngineError`] if the configuration is invalid, a descriptor index does not exist
/// in some structure, or an explicit rank is out of range. No partial result is returned.
#[instrument(skip_all, name = "analysis_workflow")]
pub fn run<'a>(
    structures: &'a [Structure],
    config: &AnalysisConfig,
) -> Result<Analysis<'a>, EngineError> {
    config.validate()?;
    info!(
        "Analyzing {} structures at {} K.",
        structures.len(),
        config.temperature_k
    );

    let records = energetics::compute(structures, config.temperature_k)?;
    if let Some(lowest) = records.first() {
        debug!(
            "Lowest energy {:.8} Eh (structure #{} in file).",
            lowest.absolute_energy,
            lowest.structure_index + 1
        );
    }

    let descriptor_values = config
        .descriptor
        .as_ref()
        .map(|request| {
            debug!("Evaluating descriptor {}.", request);
            descriptors::compute_for_records(&records, structures, request)
        })
        .transpose()?;

    let selected_ranks = selection::select(&records, &config.selection)?;

    if let Some(cutoff) = config.selection.cutoff_kcal {
        let within = records
            .iter()
            .filter(|r| selected_ranks.binary_search(&r.rank).is_ok())
            .count();
        info!(
            "Energy cutoff {} kcal/mol: {} structures remaining, {} removed.",
            cutoff,
            within,
            records.len() - within
        );
    }
    info!(
        "Selected {} of {} structures ({:.2} % of the population).",
        selected_ranks.len(),
        records.len(),
        energetics::population_sum(selected_ranks.iter().map(|&rank| &records[rank - 1]))
    );

    Ok(Analysis {
        structures,
        temperature_k: config.temperature_k,
        records,
        descriptor: config.descriptor,
        descriptor_values,
        selected_ranks,
    })
}
