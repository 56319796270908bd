//! Ring Toggle - GF(2) linear algebra for ring toggle puzzles
//!
//! A ring of `N` cells has one button per cell. Pressing button `i` flips
//! every cell at a fixed set of cyclic offsets from `i`. The offsets form a
//! [`Combination`], and the press-to-effect map is linear over GF(2).
//!
//! # Pipeline
//!
//! ```text
//! Combination → build → Gf2Matrix → invert → Inversion
//!                                               ├─ Invertible(M⁻¹) → extract → SolutionVector
//!                                               └─ Singular { column }
//! ```
//!
//! Every stage is a pure function of its inputs. Nothing here performs I/O
//! or logs.
//!
//! # Example
//!
//! ```
//! use ring_toggle::{apply_presses, build, extract, invert, Combination, Inversion, CANONICAL_CELL};
//!
//! let rule = Combination::new(4, vec![1]).unwrap();
//! let toggle = build(4, &rule).unwrap();
//!
//! match invert(&toggle) {
//!     Inversion::Invertible(inverse) => {
//!         let solution = extract(&inverse);
//!         assert_eq!(solution.value(), "3");
//!
//!         let lit = apply_presses(&toggle, &solution).unwrap();
//!         assert_eq!(lit.ones().collect::<Vec<_>>(), vec![CANONICAL_CELL]);
//!     }
//!     Inversion::Singular { .. } => unreachable!(),
//! }
//! ```
//!
//! # Invertibility at a Glance
//!
//! | Rule | Inverse |
//! |------|---------|
//! | `{}` | none (zero matrix) |
//! | `{k}` | `{N - k}` (shift back) |
//! | any even number of offsets | none (all-ones vector in the kernel) |

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod builder;
pub mod combination;
pub mod error;
pub mod gf2;
pub mod invert;
pub mod solve;

pub use builder::{build, build_from_offsets, is_circulant, toggle_matrix};
pub use combination::{binomial, combination_count, enumerate, Arity, Combination, Combinations};
pub use error::ToggleError;
pub use gf2::{BitRow, Gf2Matrix};
pub use invert::{invert, is_invertible, rank, Inversion};
pub use solve::{
    apply_presses, display_position, extract, inverse_rule, press_pattern, SolutionVector,
    CANONICAL_CELL,
};
