use super::config::SelectionCriteria;
use super::energetics::EnergyRecord;
use std::collections::BTreeSet;
use thiserror::Error;

/// Absorbs Hartree to kcal/mol conversion noise at the cutoff boundary.
const CUTOFF_TOLERANCE_KCAL: f64 = 1e-9;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SelectionError {
    #[error("Rank {rank} is out of range (valid: 1..={count})")]
    RankOutOfRange { rank: usize, count: usize },
}

fn within_cutoff(record: &EnergyRecord, cutoff_kcal: Option<f64>) -> bool {
    cutoff_kcal.is_none_or(|cutoff| record.relative_energy_kcal <= cutoff + CUTOFF_TOLERANCE_KCAL)
}

/// Resolves selection criteria against a ranked record list.
///
/// Records must be in rank order, as produced by [`super::energetics::compute`]. Explicit
/// ranks are de-duplicated and validated against the record count before the cutoff is
/// applied, so an out-of-range rank is reported even if the cutoff would have removed it.
///
/// # Return
///
/// Returns the selected 1-based ranks in ascending order.
///
/// # Errors
///
/// Returns [`SelectionError::RankOutOfRange`] for the smallest explicit rank outside
/// `1..=records.len()`.
pub fn select(
    records: &[EnergyRecord],
    criteria: &SelectionCriteria,
) -> Result<Vec<usize>, SelectionError> {
    let count = records.len();

    let Some(explicit) = &criteria.explicit_ranks else {
        return Ok(records
            .iter()
            .filter(|r| within_cutoff(r, criteria.cutoff_kcal))
            .map(|r| r.rank)
            .collect());
    };

    let requested: BTreeSet<usize> = explicit.iter().copied().collect();
    if let Some(&rank) = requested.iter().find(|&&rank| rank == 0 || rank > count) {
        return Err(SelectionError::RankOutOfRange { rank, count });
    }

    Ok(requested
        .into_iter()
        .filter(|&rank| within_cutoff(&records[rank - 1], criteria.cutoff_kcal))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::energetics::kcal_to_hartree;

    fn records_with_relative_kcal(relative: &[f64]) -> Vec<EnergyRecord> {
        relative
            .iter()
            .enumerate()
            .map(|(i, &kcal)| EnergyRecord {
                rank: i + 1,
                structure_index: i,
                absolute_energy: -10.0 + kcal_to_hartree(kcal),
                relative_energy_hartree: kcal_to_hartree(kcal),
                relative_energy_kcal: kcal,
                boltzmann_percent: 0.0,
            })
            .collect()
    }

    #[test]
    fn no_criteria_selects_every_rank() {
        let records = records_with_relative_kcal(&[0.0, 0.3, 0.6, 1.2]);
        assert_eq!(select(&records, &SelectionCriteria::all()), Ok(vec![1, 2, 3, 4]));
    }

    #[test]
    fn cutoff_keeps_ranks_within_window() {
        let records = records_with_relative_kcal(&[0.0, 0.3, 0.6, 1.2]);
        let criteria = SelectionCriteria::all().with_cutoff(0.5);
        assert_eq!(select(&records, &criteria), Ok(vec![1, 2]));
    }

    #[test]
    fn cutoff_boundary_is_inclusive() {
        let records = records_with_relative_kcal(&[0.0, 0.5, 0.5000001]);
        let criteria = SelectionCriteria::all().with_cutoff(0.5);
        assert_eq!(select(&records, &criteria), Ok(vec![1, 2]));
    }

    #[test]
    fn zero_cutoff_keeps_degenerate_minima() {
        let records = records_with_relative_kcal(&[0.0, 0.0, 0.1]);
        let criteria = SelectionCriteria::all().with_cutoff(0.0);
        assert_eq!(select(&records, &criteria), Ok(vec![1, 2]));
    }

    #[test]
    fn explicit_ranks_are_deduplicated_and_sorted() {
        let records = records_with_relative_kcal(&[0.0, 0.3, 0.6, 1.2, 2.0, 3.1]);
        let criteria = SelectionCriteria::all().with_ranks(vec![4, 3, 6, 3]);
        assert_eq!(select(&records, &criteria), Ok(vec![3, 4, 6]));
    }

    #[test]
    fn explicit_rank_out_of_range_is_reported() {
        let records = records_with_relative_kcal(&[0.0, 0.3, 0.6]);
        let criteria = SelectionCriteria::all().with_ranks(vec![1, 5]);
        let err = select(&records, &criteria).unwrap_err();
        assert_eq!(err, SelectionError::RankOutOfRange { rank: 5, count: 3 });
        assert_eq!(err.to_string(), "Rank 5 is out of range (valid: 1..=3)");
    }

    #[test]
    fn rank_zero_is_out_of_range() {
        let records = records_with_relative_kcal(&[0.0, 0.3]);
        let criteria = SelectionCriteria::all().with_ranks(vec![0]);
        assert_eq!(
            select(&records, &criteria),
            Err(SelectionError::RankOutOfRange { rank: 0, count: 2 })
        );
    }

    #[test]
    fn both_criteria_intersect() {
        let records = records_with_relative_kcal(&[0.0, 0.3, 0.6, 1.2]);
        let criteria = SelectionCriteria::all().with_cutoff(0.5).with_ranks(vec![2, 4]);
        assert_eq!(select(&records, &criteria), Ok(vec![2]));
    }

    #[test]
    fn out_of_range_rank_is_reported_even_when_cutoff_would_remove_it() {
        let records = records_with_relative_kcal(&[0.0, 0.3]);
        let criteria = SelectionCriteria::all().with_cutoff(0.1).with_ranks(vec![3]);
        assert!(matches!(
            select(&records, &criteria),
            Err(SelectionError::RankOutOfRange { rank: 3, .. })
        ));
    }
}
