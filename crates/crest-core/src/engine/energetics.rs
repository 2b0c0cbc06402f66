use crate::core::models::structure::Structure;
use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::debug;

/// Hartree to kcal/mol conversion factor.
pub const HARTREE_TO_KCAL_MOL: f64 = 627.5094740631;

/// Boltzmann constant in Hartree per Kelvin.
pub const BOLTZMANN_HARTREE_PER_K: f64 = 3.1668114e-6;

#[derive(Debug, Error, PartialEq, Clone, Copy)]
pub enum EnergeticsError {
    #[error("Temperature must be a finite value greater than 0 K (got {0})")]
    InvalidTemperature(f64),
}

/// Energy and population data for one structure, in canonical rank order.
///
/// Records are produced sorted by ascending absolute energy; `rank` is the 1-based position
/// in that order and `structure_index` points back into the parsed structure list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyRecord {
    pub rank: usize,
    pub structure_index: usize,
    pub absolute_energy: f64,
    pub relative_energy_hartree: f64,
    pub relative_energy_kcal: f64,
    pub boltzmann_percent: f64,
}

/// Converts an energy difference from Hartree to kcal/mol.
#[inline]
pub fn hartree_to_kcal(energy: f64) -> f64 {
    energy * HARTREE_TO_KCAL_MOL
}

/// Converts an energy difference from kcal/mol to Hartree.
#[inline]
pub fn kcal_to_hartree(energy: f64) -> f64 {
    energy / HARTREE_TO_KCAL_MOL
}

/// Computes ranked energy records with Boltzmann populations.
///
/// Structures are stably sorted by absolute energy, so equal energies keep their file order.
/// Each structure receives the weight `exp(-ΔE / (k_B T))` with `ΔE` in Hartree relative to
/// the minimum; the populations are the weights normalized to 100 %. The minimum always has
/// weight 1, which keeps the normalization well conditioned.
///
/// # Arguments
///
/// * `structures` - The parsed structures in file order.
/// * `temperature_k` - The temperature in Kelvin.
///
/// # Return
///
/// Returns one record per structure in rank order; an empty input yields an empty list.
///
/// # Errors
///
/// Returns [`EnergeticsError::InvalidTemperature`] if the temperature is not a finite,
/// strictly positive number.
pub fn compute(
    structures: &[Structure],
    temperature_k: f64,
) -> Result<Vec<EnergyRecord>, EnergeticsError> {
    if !(temperature_k.is_finite() && temperature_k > 0.0) {
        return Err(EnergeticsError::InvalidTemperature(temperature_k));
    }

    let mut order: Vec<usize> = (0..structures.len()).collect();
    order.sort_by(|&a, &b| {
        structures[a]
            .energy()
            .partial_cmp(&structures[b].energy())
            .unwrap_or(Ordering::Equal)
    });

    let Some(&lowest) = order.first() else {
        return Ok(Vec::new());
    };
    let min_energy = structures[lowest].energy();
    let kt = BOLTZMANN_HARTREE_PER_K * temperature_k;

    let weights: Vec<f64> = order
        .iter()
        .map(|&idx| boltzmann_weight(structures[idx].energy() - min_energy, kt))
        .collect();
    let weight_sum: f64 = weights.iter().sum();

    debug!(
        "Boltzmann weighting of {} structures at {} K (kT = {:.6e} Eh), partition sum {:.6}",
        structures.len(),
        temperature_k,
        kt,
        weight_sum
    );

    Ok(order
        .iter()
        .zip(weights)
        .enumerate()
        .map(|(position, (&idx, weight))| {
            let absolute_energy = structures[idx].energy();
            let relative_energy_hartree = absolute_energy - min_energy;
            EnergyRecord {
                rank: position + 1,
                structure_index: idx,
                absolute_energy,
                relative_energy_hartree,
                relative_energy_kcal: hartree_to_kcal(relative_energy_hartree),
                boltzmann_percent: 100.0 * weight / weight_sum,
            }
        })
        .collect())
}

/// `exp(-ΔE / kT)`, with structures degenerate with the minimum pinned to weight 1 even when
/// `kT` underflows to zero.
fn boltzmann_weight(delta_hartree: f64, kt: f64) -> f64 {
    if delta_hartree == 0.0 {
        1.0
    } else {
        (-delta_hartree / kt).exp()
    }
}

/// Sums the Boltzmann populations of a set of records, in percent.
pub fn population_sum<'a>(records: impl IntoIterator<Item = &'a EnergyRecord>) -> f64 {
    records.into_iter().map(|r| r.boltzmann_percent).sum()
}
