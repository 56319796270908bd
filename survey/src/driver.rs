//! Per-size enumeration: build, invert, and extract for every combination.

use rayon::prelude::*;
use ring_toggle::{
    combination_count, extract, invert, toggle_matrix, Arity, Combination, Combinations,
    Inversion, SolutionVector, ToggleError,
};

/// An invertible combination and the press pattern it yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The toggle rule.
    pub combination: Combination,
    /// Presses that light only the canonical cell.
    pub solution: SolutionVector,
}

impl Record {
    /// Document key (offsets in enumeration order).
    #[must_use]
    pub fn key(&self) -> String {
        self.combination.key()
    }

    /// Document value (ascending button indices).
    #[must_use]
    pub fn value(&self) -> String {
        self.solution.value()
    }
}

/// Every invertible combination found for one ring size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeReport {
    /// Ring size `N`.
    pub size: usize,
    /// Number of combinations examined.
    pub examined: u128,
    /// Invertible combinations, in enumeration order.
    pub records: Vec<Record>,
}

impl SizeReport {
    /// Number of invertible combinations.
    #[must_use]
    pub fn invertible_count(&self) -> usize {
        self.records.len()
    }
}

/// Solves one combination; `None` when its toggle matrix is singular.
#[must_use]
pub fn solve_combination(combination: &Combination) -> Option<Record> {
    match invert(&toggle_matrix(combination)) {
        Inversion::Invertible(inverse) => Some(Record {
            solution: extract(&inverse),
            combination: combination.clone(),
        }),
        Inversion::Singular { .. } => None,
    }
}

/// Combinations pulled from the enumeration per parallel batch.
pub const CHUNK_SIZE: usize = 16_384;

/// Surveys every combination of the requested arity for one ring size.
///
/// Combinations are pulled from the enumeration in chunks of [`CHUNK_SIZE`]
/// and each chunk is solved in parallel on the current rayon pool; records
/// come back in enumeration order.
///
/// # Errors
///
/// Returns [`ToggleError::EmptyRing`] if `size` is zero.
pub fn survey_size(size: usize, arity: Arity) -> Result<SizeReport, ToggleError> {
    survey_size_chunked(size, arity, CHUNK_SIZE)
}

fn survey_size_chunked(
    size: usize,
    arity: Arity,
    chunk_size: usize,
) -> Result<SizeReport, ToggleError> {
    if size == 0 {
        return Err(ToggleError::EmptyRing);
    }
    let chunk_size = chunk_size.max(1);
    let mut records = Vec::new();
    for k in arity.range(size) {
        let mut pending = Combinations::new(size, k)?;
        loop {
            let chunk: Vec<Combination> = pending.by_ref().take(chunk_size).collect();
            if chunk.is_empty() {
                break;
            }
            records.par_extend(chunk.par_iter().filter_map(solve_combination));
        }
    }
    Ok(SizeReport {
        size,
        examined: combination_count(size, arity),
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn singular_combination_yields_nothing() {
        let c = Combination::new(5, vec![1, 2]).unwrap();
        assert!(solve_combination(&c).is_none());
    }

    #[test]
    fn invertible_combination_yields_record() {
        let c = Combination::new(4, vec![1]).unwrap();
        let record = solve_combination(&c).unwrap();
        assert_eq!(record.key(), "1");
        assert_eq!(record.value(), "3");
    }

    #[test]
    fn report_counts() {
        let report = survey_size(4, Arity::All).unwrap();
        assert_eq!(report.examined, 15);
        assert_eq!(report.invertible_count(), 8);
        assert!(report.records.len() as u128 <= report.examined);
    }

    #[test]
    fn records_keep_enumeration_order() {
        let report = survey_size(5, Arity::All).unwrap();
        let keys: Vec<String> = report.records.iter().map(Record::key).collect();
        let expected: Vec<String> = ring_toggle::enumerate(5, Arity::All)
            .unwrap()
            .filter(|c| solve_combination(c).is_some())
            .map(|c| c.key())
            .collect();
        assert_eq!(keys, expected);
        assert_eq!(keys.first().map(String::as_str), Some("0"));
    }

    #[test]
    fn chunked_survey_matches_sequential_order() {
        let sequential: Vec<Record> = ring_toggle::enumerate(8, Arity::All)
            .unwrap()
            .filter_map(|c| solve_combination(&c))
            .collect();
        for chunk_size in [1, 7, 64, CHUNK_SIZE] {
            let report = survey_size_chunked(8, Arity::All, chunk_size).unwrap();
            assert_eq!(report.records, sequential, "chunk size {chunk_size}");
            assert_eq!(report.examined, 255);
        }
    }

    #[test]
    fn chunked_survey_of_one_arity() {
        let whole = survey_size(9, Arity::Exactly(3)).unwrap();
        let chunked = survey_size_chunked(9, Arity::Exactly(3), 5).unwrap();
        assert_eq!(chunked, whole);
        assert_eq!(whole.examined, 84);
    }

    #[test]
    fn arity_outside_ring_is_empty() {
        let report = survey_size(3, Arity::Exactly(3)).unwrap();
        assert_eq!(report.examined, 0);
        assert!(report.records.is_empty());
        assert_eq!(survey_size(0, Arity::All), Err(ToggleError::EmptyRing));
    }

    #[test]
    fn invertible_count_matches_rank_test() {
        for size in 2..=7 {
            let report = survey_size(size, Arity::All).unwrap();
            let by_rank = ring_toggle::enumerate(size, Arity::All)
                .unwrap()
                .filter(|c| ring_toggle::is_invertible(&toggle_matrix(c)))
                .count();
            assert_eq!(report.invertible_count(), by_rank, "N = {size}");
            assert!((report.invertible_count() as u128) < (1u128 << size));
        }
    }
}
