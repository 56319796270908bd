//! Matrix inversion over GF(2) by Gauss-Jordan elimination.
//!
//! The input is augmented with the identity and reduced column by column:
//!
//! 1. Find a row at or below the pivot with a `1` in the pivot column and
//!    swap it into place. No such row means the matrix is singular.
//! 2. XOR the pivot row into every other row with a `1` in that column.
//!
//! After `N` pivots the left half is the identity and the right half is the
//! inverse. The only nonzero element of GF(2) is its own inverse, so no
//! division or scaling step exists.

use crate::gf2::{BitRow, Gf2Matrix};

/// Outcome of [`invert`].
///
/// Most toggle rules are singular, so this is ordinary control flow rather
/// than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inversion {
    /// The matrix is invertible; holds its inverse.
    Invertible(Gf2Matrix),
    /// No inverse exists.
    Singular {
        /// First pivot column with no `1` at or below the pivot row.
        column: usize,
    },
}

impl Inversion {
    /// Returns true for [`Inversion::Invertible`].
    #[must_use]
    pub const fn is_invertible(&self) -> bool {
        matches!(self, Self::Invertible(_))
    }

    /// Borrows the inverse, if any.
    #[must_use]
    pub const fn inverse(&self) -> Option<&Gf2Matrix> {
        match self {
            Self::Invertible(inv) => Some(inv),
            Self::Singular { .. } => None,
        }
    }

    /// Takes the inverse, if any.
    #[must_use]
    pub fn into_inverse(self) -> Option<Gf2Matrix> {
        match self {
            Self::Invertible(inv) => Some(inv),
            Self::Singular { .. } => None,
        }
    }
}

/// Inverts `matrix` over GF(2).
///
/// # Example
///
/// ```
/// use ring_toggle::{build_from_offsets, invert, Inversion};
///
/// let m = build_from_offsets(5, &[0, 1, 3]).unwrap();
/// let inv = invert(&m).into_inverse().unwrap();
/// assert!(m.mul(&inv).unwrap().is_identity());
///
/// let zero = build_from_offsets(3, &[]).unwrap();
/// assert_eq!(invert(&zero), Inversion::Singular { column: 0 });
/// ```
#[must_use]
pub fn invert(matrix: &Gf2Matrix) -> Inversion {
    let n = matrix.size();
    let mut left: Vec<BitRow> = matrix.rows().to_vec();
    let mut right: Vec<BitRow> = (0..n).map(|i| BitRow::unit(n, i)).collect();

    for col in 0..n {
        let Some(pivot) = (col..n).find(|&r| left[r].get(col)) else {
            return Inversion::Singular { column: col };
        };
        if pivot != col {
            left.swap(pivot, col);
            right.swap(pivot, col);
        }

        let pivot_left = left[col].clone();
        let pivot_right = right[col].clone();
        for r in (0..n).filter(|&r| r != col) {
            if left[r].get(col) {
                left[r].xor_assign(&pivot_left);
                right[r].xor_assign(&pivot_right);
            }
        }
    }

    debug_assert!(left
        .iter()
        .enumerate()
        .all(|(i, row)| row.count_ones() == 1 && row.get(i)));
    Inversion::Invertible(Gf2Matrix::from_rows_unchecked(right))
}

/// Rank over GF(2).
#[must_use]
pub fn rank(matrix: &Gf2Matrix) -> usize {
    let n = matrix.size();
    let mut rows: Vec<BitRow> = matrix.rows().to_vec();
    let mut rank = 0;
    for col in 0..n {
        let Some(pivot) = (rank..n).find(|&r| rows[r].get(col)) else {
            continue;
        };
        rows.swap(pivot, rank);
        let pivot_row = rows[rank].clone();
        for row in rows.iter_mut().skip(rank + 1) {
            if row.get(col) {
                row.xor_assign(&pivot_row);
            }
        }
        rank += 1;
    }
    rank
}

/// Returns true if `matrix` has full rank.
#[must_use]
pub fn is_invertible(matrix: &Gf2Matrix) -> bool {
    rank(matrix) == matrix.size()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_from_offsets;

    #[test]
    fn identity_inverts_to_itself() {
        let id = Gf2Matrix::identity(6).unwrap();
        assert_eq!(invert(&id), Inversion::Invertible(id.clone()));
        assert_eq!(rank(&id), 6);
    }

    #[test]
    fn shift_inverse_is_reverse_shift() {
        let shift = build_from_offsets(4, &[1]).unwrap();
        let back = build_from_offsets(4, &[3]).unwrap();
        assert_eq!(invert(&shift).into_inverse(), Some(back));
    }

    #[test]
    fn needs_row_exchange() {
        // pivot (0, 0) is zero; rows must be swapped
        let swap = Gf2Matrix::from_fn(2, |r, c| r != c).unwrap();
        let inv = invert(&swap).into_inverse().unwrap();
        assert_eq!(inv, swap);
    }

    #[test]
    fn needs_elimination_above_and_below() {
        // upper unitriangular all-ones: inverse is the bidiagonal
        let m = Gf2Matrix::from_fn(4, |r, c| c >= r).unwrap();
        let inv = invert(&m).into_inverse().unwrap();
        let expected = Gf2Matrix::from_fn(4, |r, c| c == r || c == r + 1).unwrap();
        assert_eq!(inv, expected);
        assert!(m.mul(&inv).unwrap().is_identity());
    }

    #[test]
    fn zero_matrix_is_singular() {
        let zero = Gf2Matrix::zeros(3).unwrap();
        assert_eq!(invert(&zero), Inversion::Singular { column: 0 });
        assert_eq!(rank(&zero), 0);
        assert!(!is_invertible(&zero));
    }

    #[test]
    fn repeated_row_is_singular() {
        let m = Gf2Matrix::from_fn(3, |r, c| match r {
            0 | 2 => c != 1,
            _ => c == 1,
        })
        .unwrap();
        let outcome = invert(&m);
        assert!(!outcome.is_invertible());
        assert!(outcome.inverse().is_none());
        assert_eq!(rank(&m), 2);
    }

    #[test]
    fn singular_reports_failing_column() {
        // column 1 is all zero
        let m = Gf2Matrix::from_fn(3, |r, c| c != 1 && (r == c || (r == 1 && c == 2))).unwrap();
        assert_eq!(invert(&m), Inversion::Singular { column: 1 });
    }

    #[test]
    fn even_weight_rules_are_singular() {
        // every row has even weight, so the all-ones vector is in the kernel
        for n in 2..10 {
            let m = build_from_offsets(n, &[0, 1]).unwrap();
            assert!(!invert(&m).is_invertible(), "n = {n}");
            assert!(!is_invertible(&m));
        }
    }

    #[test]
    fn rank_agrees_with_inversion() {
        for n in 1..=8 {
            for a in 0..n {
                for b in 0..n {
                    let offsets: Vec<usize> = if a == b { vec![a] } else { vec![a, b] };
                    let m = build_from_offsets(n, &offsets).unwrap();
                    assert_eq!(invert(&m).is_invertible(), is_invertible(&m));
                }
            }
        }
    }
}
