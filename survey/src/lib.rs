//! Ring toggle survey.
//!
//! Walks a range of ring sizes, solves every offset combination with
//! `ring_toggle`, and writes one JSON document per size.
//!
//! # Entry Point
//!
//! ```no_run
//! use std::path::PathBuf;
//! use ring_toggle::Arity;
//! use ring_toggle_survey::{run, Layout, SurveyConfig};
//!
//! let config = SurveyConfig {
//!     sizes: 4..=32,
//!     arity: Arity::Exactly(3),
//!     out_dir: PathBuf::from("json"),
//!     layout: Layout::Flat,
//!     threads: None,
//! };
//! let outcome = run(&config).expect("survey failed");
//! assert!(outcome.all_written());
//! ```
//!
//! # Failure Isolation
//!
//! Each ring size is an independent unit of work. A document that cannot be
//! written is logged and recorded in [`SurveyOutcome`], and the survey moves
//! on to the next size.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod driver;
pub mod sink;

use std::ops::RangeInclusive;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use ring_toggle::Arity;
use tracing::{debug, error, info};

pub use driver::{solve_combination, survey_size, Record, SizeReport, CHUNK_SIZE};
pub use sink::{document_path, render, write_report, Layout, SIZE_KEY};

/// Settings for one survey run.
#[derive(Debug, Clone)]
pub struct SurveyConfig {
    /// Ring sizes to survey, inclusive.
    pub sizes: RangeInclusive<usize>,
    /// Combination sizes to enumerate per ring.
    pub arity: Arity,
    /// Directory receiving `<N>.json`.
    pub out_dir: PathBuf,
    /// Document shape.
    pub layout: Layout,
    /// Worker threads; `None` uses the global rayon pool.
    pub threads: Option<usize>,
}

impl SurveyConfig {
    /// Rejects settings that cannot describe a survey.
    ///
    /// # Errors
    ///
    /// Returns an error for a ring size of zero, an empty size range, or a
    /// thread count of zero.
    pub fn validate(&self) -> Result<()> {
        if *self.sizes.start() == 0 {
            bail!("ring sizes must start at 1 or above");
        }
        if self.sizes.is_empty() {
            bail!(
                "empty ring size range {}..={}",
                self.sizes.start(),
                self.sizes.end()
            );
        }
        if self.threads == Some(0) {
            bail!("thread count must be at least 1");
        }
        Ok(())
    }
}

/// Whether a size's document reached disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteStatus {
    /// Written to this path.
    Written(PathBuf),
    /// The write failed with this message.
    Failed(String),
}

/// Result of surveying one ring size.
#[derive(Debug, Clone)]
pub struct SizeSummary {
    /// Ring size `N`.
    pub size: usize,
    /// Combinations examined.
    pub examined: u128,
    /// Invertible combinations found.
    pub invertible: usize,
    /// Document outcome.
    pub status: WriteStatus,
}

impl SizeSummary {
    /// Returns true if the document write failed.
    pub fn is_failure(&self) -> bool {
        matches!(self.status, WriteStatus::Failed(_))
    }
}

/// Aggregated outcome of a survey run.
#[derive(Debug, Default)]
pub struct SurveyOutcome {
    /// One summary per ring size, in order.
    pub sizes: Vec<SizeSummary>,
}

impl SurveyOutcome {
    /// Sizes whose document could not be written.
    pub fn failures(&self) -> impl Iterator<Item = &SizeSummary> {
        self.sizes.iter().filter(|s| s.is_failure())
    }

    /// Returns true if every document was written.
    pub fn all_written(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Total invertible combinations across all sizes.
    pub fn total_invertible(&self) -> usize {
        self.sizes.iter().map(|s| s.invertible).sum()
    }
}

/// Runs a survey.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the worker pool
/// cannot be built. Document write failures are reported in the outcome,
/// not as an error.
pub fn run(config: &SurveyConfig) -> Result<SurveyOutcome> {
    config.validate()?;
    match config.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("Failed to build worker pool")?;
            debug!(threads, "using dedicated worker pool");
            pool.install(|| run_sizes(config))
        }
        None => run_sizes(config),
    }
}

fn run_sizes(config: &SurveyConfig) -> Result<SurveyOutcome> {
    let mut outcome = SurveyOutcome::default();
    for size in config.sizes.clone() {
        let report = survey_size(size, config.arity)
            .with_context(|| format!("Failed to survey ring size {size}"))?;

        for record in &report.records {
            info!(size, "{} -> {}", record.key(), record.value());
        }

        let status = match write_report(&config.out_dir, &report, config.layout) {
            Ok(path) => {
                info!(
                    size,
                    examined = %report.examined,
                    invertible = report.invertible_count(),
                    path = %path.display(),
                    "ring size surveyed"
                );
                WriteStatus::Written(path)
            }
            Err(err) => {
                let message = format!("{err:#}");
                error!(size, error = %message, "failed to write survey document");
                WriteStatus::Failed(message)
            }
        };

        outcome.sizes.push(SizeSummary {
            size,
            examined: report.examined,
            invertible: report.invertible_count(),
            status,
        });
    }
    Ok(outcome)
}
