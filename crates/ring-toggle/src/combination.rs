//! Offset combinations and their enumeration.
//!
//! A [`Combination`] is a duplicate-free set of cyclic offsets in
//! `[0, size)`. Offsets keep the order they were given in, which is the
//! order used for the textual key, but two combinations with the same
//! offsets in a different order compare equal.
//!
//! [`Combinations`] yields every `k`-subset of `{0, .., size - 1}` exactly
//! once, in lexicographic order:
//!
//! ```text
//! size = 4, k = 2
//!   [0, 1] [0, 2] [0, 3] [1, 2] [1, 3] [2, 3]
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Range;

use crate::error::ToggleError;

/// A duplicate-free set of cyclic offsets for a ring of `size` cells.
///
/// # Example
///
/// ```
/// use ring_toggle::Combination;
///
/// let a = Combination::new(8, vec![5, 1, 2]).unwrap();
/// let b = Combination::new(8, vec![1, 2, 5]).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.key(), "5, 1, 2");
/// assert!(Combination::new(8, vec![1, 1]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Combination {
    size: usize,
    offsets: Vec<usize>,
}

impl Combination {
    /// Validates and wraps a set of offsets.
    ///
    /// # Errors
    ///
    /// - [`ToggleError::EmptyRing`] if `size` is zero.
    /// - [`ToggleError::OffsetOutOfRange`] if an offset is not below `size`.
    /// - [`ToggleError::DuplicateOffset`] if an offset repeats.
    pub fn new(size: usize, offsets: Vec<usize>) -> Result<Self, ToggleError> {
        if size == 0 {
            return Err(ToggleError::EmptyRing);
        }
        let mut seen = vec![false; size];
        for &offset in &offsets {
            if offset >= size {
                return Err(ToggleError::OffsetOutOfRange { offset, size });
            }
            if std::mem::replace(&mut seen[offset], true) {
                return Err(ToggleError::DuplicateOffset { offset });
            }
        }
        Ok(Self { size, offsets })
    }

    /// The empty combination: no button toggles anything.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError::EmptyRing`] if `size` is zero.
    pub fn empty(size: usize) -> Result<Self, ToggleError> {
        Self::new(size, Vec::new())
    }

    /// Caller guarantees `size > 0` and distinct offsets below `size`.
    pub(crate) fn from_parts_unchecked(size: usize, offsets: Vec<usize>) -> Self {
        debug_assert!(size > 0);
        debug_assert!(offsets.iter().all(|&o| o < size));
        Self { size, offsets }
    }

    /// Ring size the offsets were validated against.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Offsets in the order they were given.
    #[must_use]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Number of offsets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns true if there are no offsets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Offsets sorted ascending.
    #[must_use]
    pub fn sorted(&self) -> Vec<usize> {
        let mut sorted = self.offsets.clone();
        sorted.sort_unstable();
        sorted
    }

    /// Textual key: the offsets joined with `", "` in stored order.
    #[must_use]
    pub fn key(&self) -> String {
        join(&self.offsets)
    }
}

impl PartialEq for Combination {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.sorted() == other.sorted()
    }
}

impl Eq for Combination {}

impl Hash for Combination {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        self.sorted().hash(state);
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

pub(crate) fn join(values: &[usize]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Enumeration
// =============================================================================

/// Lexicographic iterator over all `arity`-subsets of `{0, .., size - 1}`.
///
/// An arity of zero yields the single empty combination; an arity above
/// `size` yields nothing.
#[derive(Debug, Clone)]
pub struct Combinations {
    size: usize,
    indices: Vec<usize>,
    done: bool,
}

impl Combinations {
    /// Starts the enumeration at `[0, 1, .., arity - 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleError::EmptyRing`] if `size` is zero.
    pub fn new(size: usize, arity: usize) -> Result<Self, ToggleError> {
        if size == 0 {
            return Err(ToggleError::EmptyRing);
        }
        Ok(Self {
            size,
            indices: (0..arity).collect(),
            done: arity > size,
        })
    }

    fn advance(&mut self) {
        let k = self.indices.len();
        // rightmost index that can still move right
        let Some(i) = (0..k)
            .rev()
            .find(|&i| self.indices[i] < self.size - k + i)
        else {
            self.done = true;
            return;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
    }
}

impl Iterator for Combinations {
    type Item = Combination;

    fn next(&mut self) -> Option<Combination> {
        if self.done {
            return None;
        }
        let current = Combination::from_parts_unchecked(self.size, self.indices.clone());
        self.advance();
        Some(current)
    }
}

/// Which combination sizes a survey enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arity {
    /// Every size from 0 through `N - 1`.
    #[default]
    All,
    /// Only combinations of exactly this many offsets.
    Exactly(usize),
}

impl Arity {
    /// Combination sizes to enumerate for a ring of `size` cells.
    ///
    /// Never includes `size` itself: the all-offsets combination is outside
    /// the enumeration.
    #[must_use]
    pub fn range(self, size: usize) -> Range<usize> {
        match self {
            Self::All => 0..size,
            Self::Exactly(k) if k < size => k..k + 1,
            Self::Exactly(_) => 0..0,
        }
    }
}

/// Every combination a survey visits for `size`, grouped by arity.
///
/// # Errors
///
/// Returns [`ToggleError::EmptyRing`] if `size` is zero.
pub fn enumerate(
    size: usize,
    arity: Arity,
) -> Result<impl Iterator<Item = Combination>, ToggleError> {
    if size == 0 {
        return Err(ToggleError::EmptyRing);
    }
    let groups = arity
        .range(size)
        .map(|k| Combinations::new(size, k))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(groups.into_iter().flatten())
}

/// Binomial coefficient `C(n, k)`, saturating at `u128::MAX`.
#[must_use]
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc * (n - i) is divisible by (i + 1) at every step
        acc = match acc.checked_mul((n - i) as u128) {
            Some(v) => v / (i as u128 + 1),
            None => return u128::MAX,
        };
    }
    acc
}

/// How many combinations [`enumerate`] yields for `size`.
#[must_use]
pub fn combination_count(size: usize, arity: Arity) -> u128 {
    arity
        .range(size)
        .map(|k| binomial(size, k))
        .fold(0u128, u128::saturating_add)
}
