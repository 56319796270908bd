//! Toggle-matrix construction.
//!
//! Row `i` of the toggle matrix is the effect of pressing button `i`:
//! column `j` is set exactly when `(j - i) mod N` is one of the offsets.
//! Every row is row 0 rotated right by `i`, so the matrix is circulant.
//!
//! ```text
//! N = 4, offsets {0, 1}
//!   1 1 0 0
//!   0 1 1 0
//!   0 0 1 1
//!   1 0 0 1
//! ```

use crate::combination::Combination;
use crate::error::ToggleError;
use crate::gf2::{BitRow, Gf2Matrix};

/// Builds the toggle matrix for a ring of `size` cells.
///
/// # Errors
///
/// Returns [`ToggleError::RingSizeMismatch`] if `combination` was validated
/// against a different ring size.
///
/// # Example
///
/// ```
/// use ring_toggle::{build, Combination};
///
/// let shift = Combination::new(4, vec![1]).unwrap();
/// let m = build(4, &shift).unwrap();
/// assert!(m.get(0, 1) && m.get(3, 0));
/// assert_eq!(m.row(2).count_ones(), 1);
/// ```
pub fn build(size: usize, combination: &Combination) -> Result<Gf2Matrix, ToggleError> {
    if combination.size() != size {
        return Err(ToggleError::RingSizeMismatch {
            expected: size,
            found: combination.size(),
        });
    }
    Ok(toggle_matrix(combination))
}

/// Validates raw offsets, then builds their toggle matrix.
///
/// # Errors
///
/// Any validation error from [`Combination::new`].
pub fn build_from_offsets(size: usize, offsets: &[usize]) -> Result<Gf2Matrix, ToggleError> {
    let combination = Combination::new(size, offsets.to_vec())?;
    Ok(toggle_matrix(&combination))
}

/// Builds the toggle matrix for a combination's own ring size.
#[must_use]
pub fn toggle_matrix(combination: &Combination) -> Gf2Matrix {
    let n = combination.size();
    let rows = (0..n)
        .map(|i| {
            let mut row = BitRow::zeros(n);
            for &k in combination.offsets() {
                row.set((i + k) % n);
            }
            row
        })
        .collect();
    Gf2Matrix::from_rows_unchecked(rows)
}

/// Returns true if every row is row 0 rotated right by its row index.
#[must_use]
pub fn is_circulant(matrix: &Gf2Matrix) -> bool {
    let n = matrix.size();
    let first = matrix.row(0);
    (1..n).all(|i| (0..n).all(|j| matrix.get(i, (i + j) % n) == first.get(j)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_offset_is_shift_permutation() {
        let m = build_from_offsets(4, &[1]).unwrap();
        for i in 0..4 {
            assert_eq!(m.row(i).ones().collect::<Vec<_>>(), vec![(i + 1) % 4]);
        }
    }

    #[test]
    fn offset_zero_is_identity() {
        assert!(build_from_offsets(7, &[0]).unwrap().is_identity());
    }

    #[test]
    fn empty_combination_is_zero_matrix() {
        let m = build_from_offsets(3, &[]).unwrap();
        assert_eq!(m, Gf2Matrix::zeros(3).unwrap());
    }

    #[test]
    fn row_weight_equals_offset_count() {
        let m = build_from_offsets(5, &[1, 2]).unwrap();
        assert!(m.rows().iter().all(|r| r.count_ones() == 2));
        assert!(is_circulant(&m));
    }

    #[test]
    fn entry_rule() {
        let offsets = [0, 2, 5];
        let n = 9;
        let m = build_from_offsets(n, &offsets).unwrap();
        for i in 0..n {
            for j in 0..n {
                let expected = offsets.contains(&((j + n - i) % n));
                assert_eq!(m.get(i, j), expected, "({i}, {j})");
            }
        }
    }

    #[test]
    fn offset_order_does_not_matter() {
        assert_eq!(
            build_from_offsets(8, &[6, 1, 3]).unwrap(),
            build_from_offsets(8, &[1, 3, 6]).unwrap()
        );
    }

    #[test]
    fn rejects_bad_configuration() {
        assert_eq!(build_from_offsets(0, &[]), Err(ToggleError::EmptyRing));
        assert_eq!(
            build_from_offsets(3, &[3]),
            Err(ToggleError::OffsetOutOfRange { offset: 3, size: 3 })
        );
        assert_eq!(
            build_from_offsets(3, &[1, 1]),
            Err(ToggleError::DuplicateOffset { offset: 1 })
        );
        let c = Combination::new(5, vec![1]).unwrap();
        assert_eq!(
            build(6, &c),
            Err(ToggleError::RingSizeMismatch {
                expected: 6,
                found: 5
            })
        );
    }

    #[test]
    fn non_circulant_detected() {
        let m = Gf2Matrix::from_fn(3, |r, c| r == 0 && c == 0).unwrap();
        assert!(!is_circulant(&m));
    }
}
