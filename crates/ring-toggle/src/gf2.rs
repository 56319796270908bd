//! Bit rows and square matrices over GF(2).
//!
//! Elements of GF(2) are `0` and `1`. Addition is XOR and multiplication is
//! AND, so a row of field elements packs into `u64` words and row addition
//! is a word-wise XOR.
//!
//! # Layout
//!
//! ```text
//! BitRow (len = 70)
//!   words[0]: bits 0..64
//!   words[1]: bits 64..70 (bits 70..128 always zero)
//! ```
//!
//! # Example
//!
//! ```
//! use ring_toggle::gf2::{BitRow, Gf2Matrix};
//!
//! let mut a = BitRow::zeros(4);
//! a.set(1);
//! a.set(3);
//! let b = BitRow::unit(4, 3);
//! a.xor_assign(&b);
//! assert_eq!(a.ones().collect::<Vec<_>>(), vec![1]);
//!
//! let id = Gf2Matrix::identity(4).unwrap();
//! assert!(id.is_identity());
//! ```

use std::fmt;

use crate::error::ToggleError;

const WORD_BITS: usize = 64;

// =============================================================================
// BitRow
// =============================================================================

/// A fixed-length row of GF(2) elements.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitRow {
    /// Packed words. Bit `i` is `(words[i / 64] >> (i % 64)) & 1`.
    words: Vec<u64>,
    len: usize,
}

impl BitRow {
    /// Creates an all-zero row of `len` elements.
    #[must_use]
    pub fn zeros(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    /// Creates the unit row with a single `1` at position `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len`.
    #[must_use]
    pub fn unit(len: usize, i: usize) -> Self {
        let mut row = Self::zeros(len);
        row.set(i);
        row
    }

    /// Number of elements in the row.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the row has no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if element `i` is `1`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize) -> bool {
        assert!(i < self.len, "bit index {i} out of range (len={})", self.len);
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    /// Sets element `i` to `1`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[inline]
    pub fn set(&mut self, i: usize) {
        assert!(i < self.len, "bit index {i} out of range (len={})", self.len);
        self.words[i / WORD_BITS] |= 1u64 << (i % WORD_BITS);
    }

    /// Sets element `i` to `0`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[inline]
    pub fn clear(&mut self, i: usize) {
        assert!(i < self.len, "bit index {i} out of range (len={})", self.len);
        self.words[i / WORD_BITS] &= !(1u64 << (i % WORD_BITS));
    }

    /// Flips element `i` (adds `1` to it).
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[inline]
    pub fn flip(&mut self, i: usize) {
        assert!(i < self.len, "bit index {i} out of range (len={})", self.len);
        self.words[i / WORD_BITS] ^= 1u64 << (i % WORD_BITS);
    }

    /// Adds `other` into this row (element-wise XOR).
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    pub fn xor_assign(&mut self, other: &Self) {
        assert_eq!(
            self.len, other.len,
            "xor_assign: length mismatch ({} vs {})",
            self.len, other.len
        );
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a ^= b;
        }
    }

    /// Inner product over GF(2): the parity of the element-wise AND.
    ///
    /// # Panics
    ///
    /// Panics if the rows have different lengths.
    #[must_use]
    pub fn dot(&self, other: &Self) -> bool {
        assert_eq!(
            self.len, other.len,
            "dot: length mismatch ({} vs {})",
            self.len, other.len
        );
        let ones: u32 = self
            .words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a & b).count_ones())
            .sum();
        ones % 2 == 1
    }

    /// Returns true if every element is `0`.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Number of elements equal to `1`.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Indices of the `1` elements, ascending.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words
            .iter()
            .enumerate()
            .flat_map(|(word_idx, &word)| Ones {
                word,
                base: word_idx * WORD_BITS,
            })
    }
}

impl fmt::Debug for BitRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitRow({}, {:?})", self.len, self.ones().collect::<Vec<_>>())
    }
}

/// Set-bit iterator over one word.
struct Ones {
    word: u64,
    base: usize,
}

impl Iterator for Ones {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.word == 0 {
            return None;
        }
        let bit = self.word.trailing_zeros() as usize;
        // clear lowest set bit
        self.word &= self.word - 1;
        Some(self.base + bit)
    }
}

// =============================================================================
// Gf2Matrix
// =============================================================================

/// A square `N × N` matrix over GF(2), stored as `N` bit rows.
///
/// `N` is always at least 1.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Gf2Matrix {
    size: usize,
    rows: Vec<BitRow>,
}

impl Gf2Matrix {
    /// The all-zero `n × n` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError::EmptyRing`] if `n` is zero.
    pub fn zeros(n: usize) -> Result<Self, ToggleError> {
        if n == 0 {
            return Err(ToggleError::EmptyRing);
        }
        Ok(Self::from_rows_unchecked(vec![BitRow::zeros(n); n]))
    }

    /// The `n × n` identity matrix.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError::EmptyRing`] if `n` is zero.
    pub fn identity(n: usize) -> Result<Self, ToggleError> {
        if n == 0 {
            return Err(ToggleError::EmptyRing);
        }
        Ok(Self::from_rows_unchecked(
            (0..n).map(|i| BitRow::unit(n, i)).collect(),
        ))
    }

    /// Builds a matrix from its rows.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError::EmptyRing`] for no rows and
    /// [`ToggleError::NotSquare`] if any row length differs from the row count.
    pub fn from_rows(rows: Vec<BitRow>) -> Result<Self, ToggleError> {
        if rows.is_empty() {
            return Err(ToggleError::EmptyRing);
        }
        let n = rows.len();
        if let Some(bad) = rows.iter().find(|r| r.len() != n) {
            return Err(ToggleError::NotSquare {
                rows: n,
                cols: bad.len(),
            });
        }
        Ok(Self::from_rows_unchecked(rows))
    }

    /// Builds an `n × n` matrix whose entry `(r, c)` is `f(r, c)`.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError::EmptyRing`] if `n` is zero.
    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> bool) -> Result<Self, ToggleError> {
        if n == 0 {
            return Err(ToggleError::EmptyRing);
        }
        let rows = (0..n)
            .map(|r| {
                let mut row = BitRow::zeros(n);
                for c in (0..n).filter(|&c| f(r, c)) {
                    row.set(c);
                }
                row
            })
            .collect();
        Ok(Self::from_rows_unchecked(rows))
    }

    /// Caller guarantees a non-empty square set of rows.
    pub(crate) fn from_rows_unchecked(rows: Vec<BitRow>) -> Self {
        debug_assert!(!rows.is_empty());
        debug_assert!(rows.iter().all(|r| r.len() == rows.len()));
        Self {
            size: rows.len(),
            rows,
        }
    }

    /// Side length `N`.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Entry at row `r`, column `c`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn get(&self, r: usize, c: usize) -> bool {
        self.rows[r].get(c)
    }

    /// Sets entry `(r, c)` to `1`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn set(&mut self, r: usize, c: usize) {
        self.rows[r].set(c);
    }

    /// Row `r`.
    ///
    /// # Panics
    ///
    /// Panics if `r` is out of range.
    #[must_use]
    pub fn row(&self, r: usize) -> &BitRow {
        &self.rows[r]
    }

    /// All rows, top to bottom.
    #[must_use]
    pub fn rows(&self) -> &[BitRow] {
        &self.rows
    }

    /// The transpose.
    #[must_use]
    pub fn transpose(&self) -> Self {
        let n = self.size;
        let mut rows = vec![BitRow::zeros(n); n];
        for (r, row) in self.rows.iter().enumerate() {
            for c in row.ones() {
                rows[c].set(r);
            }
        }
        Self::from_rows_unchecked(rows)
    }

    /// Row vector times matrix: the XOR of the rows selected by `v`.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError::RingSizeMismatch`] if `v.len()` is not `N`.
    pub fn mul_row(&self, v: &BitRow) -> Result<BitRow, ToggleError> {
        if v.len() != self.size {
            return Err(ToggleError::RingSizeMismatch {
                expected: self.size,
                found: v.len(),
            });
        }
        let mut acc = BitRow::zeros(self.size);
        for k in v.ones() {
            acc.xor_assign(&self.rows[k]);
        }
        Ok(acc)
    }

    /// Matrix product `self × other` over GF(2).
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError::RingSizeMismatch`] if the sizes differ.
    pub fn mul(&self, other: &Self) -> Result<Self, ToggleError> {
        if other.size != self.size {
            return Err(ToggleError::RingSizeMismatch {
                expected: self.size,
                found: other.size,
            });
        }
        let rows = self
            .rows
            .iter()
            .map(|row| other.mul_row(row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_rows_unchecked(rows))
    }

    /// Returns true if this is the identity matrix.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.rows
            .iter()
            .enumerate()
            .all(|(i, row)| row.count_ones() == 1 && row.get(i))
    }
}

impl fmt::Debug for Gf2Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Gf2Matrix({})", self.size)?;
        fmt::Display::fmt(self, f)
    }
}

/// Rows of `0`/`1` separated by single spaces, one line per row.
impl fmt::Display for Gf2Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for c in 0..self.size {
                if c > 0 {
                    f.write_str(" ")?;
                }
                f.write_str(if row.get(c) { "1" } else { "0" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
