//! Press patterns read from an inverse toggle matrix.
//!
//! With toggle matrix `M` (row `i` = effect of button `i`), a press set `p`
//! produces the toggle pattern `p · M`. The press set that lights exactly
//! cell `c` is therefore `e_c · M⁻¹`, which is row `c` of the inverse.
//!
//! # Canonical cell
//!
//! Cells are displayed in reverse order: natural cell `i` sits at display
//! position `N - 1 - i`. The canonical target is the last cell on display,
//! which is natural cell [`CANONICAL_CELL`] = 0, so [`extract`] reads row 0.
//!
//! ```text
//! N = 4, offsets {1}
//!   M        M⁻¹      row 0 of M⁻¹ → presses {3}
//!   0 1 0 0  0 0 0 1
//!   0 0 1 0  1 0 0 0
//!   0 0 0 1  0 1 0 0
//!   1 0 0 0  0 0 1 0
//! ```
//!
//! Pressing button 3 toggles cell `(3 + 1) mod 4 = 0`, the canonical cell.

use std::fmt;

use crate::combination::{join, Combination};
use crate::error::ToggleError;
use crate::gf2::{BitRow, Gf2Matrix};

/// Natural index of the canonical target cell.
pub const CANONICAL_CELL: usize = 0;

/// Display position of natural cell `cell` on a ring of `size` cells.
///
/// # Errors
///
/// Returns [`ToggleError::CellOutOfRange`] if `cell >= size`.
pub fn display_position(cell: usize, size: usize) -> Result<usize, ToggleError> {
    if cell >= size {
        return Err(ToggleError::CellOutOfRange { cell, size });
    }
    Ok(size - 1 - cell)
}

/// Ascending button indices whose combined presses light one target cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SolutionVector {
    presses: Vec<usize>,
}

impl SolutionVector {
    /// Button indices, ascending.
    #[must_use]
    pub fn presses(&self) -> &[usize] {
        &self.presses
    }

    /// Number of presses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.presses.len()
    }

    /// Returns true if no button is pressed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presses.is_empty()
    }

    /// Textual value: the indices joined with `", "`.
    #[must_use]
    pub fn value(&self) -> String {
        join(&self.presses)
    }

    /// The press set as a row vector of `size` elements.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError::CellOutOfRange`] if an index is not below `size`.
    pub fn to_row(&self, size: usize) -> Result<BitRow, ToggleError> {
        let mut row = BitRow::zeros(size);
        for &cell in &self.presses {
            if cell >= size {
                return Err(ToggleError::CellOutOfRange { cell, size });
            }
            row.set(cell);
        }
        Ok(row)
    }
}

impl fmt::Display for SolutionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value())
    }
}

/// Press pattern that lights only the canonical cell.
///
/// # Example
///
/// ```
/// use ring_toggle::{build_from_offsets, extract, invert};
///
/// let m = build_from_offsets(4, &[1]).unwrap();
/// let inv = invert(&m).into_inverse().unwrap();
/// assert_eq!(extract(&inv).presses(), &[3]);
/// ```
#[must_use]
pub fn extract(inverse: &Gf2Matrix) -> SolutionVector {
    SolutionVector {
        presses: inverse.row(CANONICAL_CELL).ones().collect(),
    }
}

/// Press pattern that lights only natural cell `cell`.
///
/// # Errors
///
/// Returns [`ToggleError::CellOutOfRange`] if `cell` is not below `N`.
pub fn press_pattern(inverse: &Gf2Matrix, cell: usize) -> Result<SolutionVector, ToggleError> {
    if cell >= inverse.size() {
        return Err(ToggleError::CellOutOfRange {
            cell,
            size: inverse.size(),
        });
    }
    Ok(SolutionVector {
        presses: inverse.row(cell).ones().collect(),
    })
}

/// Cells toggled by pressing every button in `solution` once.
///
/// # Errors
///
/// Returns [`ToggleError::CellOutOfRange`] if a press is outside the ring.
pub fn apply_presses(toggle: &Gf2Matrix, solution: &SolutionVector) -> Result<BitRow, ToggleError> {
    toggle.mul_row(&solution.to_row(toggle.size())?)
}

/// The toggle rule whose matrix is `inverse`.
///
/// The inverse of a circulant matrix is circulant, so its row 0 lists the
/// offsets of another toggle rule; building that rule reproduces `inverse`
/// exactly. For toggle inverses these offsets coincide with [`extract`].
/// Returns `None` if `inverse` is not circulant.
#[must_use]
pub fn inverse_rule(inverse: &Gf2Matrix) -> Option<Combination> {
    if !crate::builder::is_circulant(inverse) {
        return None;
    }
    let offsets = inverse.row(0).ones().collect();
    Some(Combination::from_parts_unchecked(inverse.size(), offsets))
}
