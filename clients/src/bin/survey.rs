//! `toggle-survey` — Surveys ring toggle rules across a range of ring sizes.
//!
//! For every ring size in `--from..=--to` and every offset combination, builds
//! the toggle matrix, inverts it over GF(2), and records the press pattern of
//! each invertible rule.
//!
//! **Outputs:**
//! - `<out>/<N>.json` — one document per ring size
//!
//! **Usage:**
//! ```
//! toggle-survey [--from <N>] [--to <N>] [--offsets <k>] [--out <path>]
//!               [--layout flat|records] [--threads <n>] [-v...] [-q] [--no-color]
//! ```
//!
//! Exits non-zero if any document could not be written.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use ring_toggle::Arity;
use ring_toggle_survey::{run, Layout, SurveyConfig, WriteStatus};
use tracing::Level;

/// Document shape on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    /// `size` plus one entry per invertible combination.
    Flat,
    /// `size` plus a `results` array of key/value objects.
    Records,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Flat => Layout::Flat,
            LayoutArg::Records => Layout::Records,
        }
    }
}

/// Survey ring toggle rules and write one JSON document per ring size.
#[derive(Parser)]
#[command(
    name = "toggle-survey",
    about = "Find invertible ring toggle rules and their single-cell press patterns"
)]
struct Args {
    /// Smallest ring size.
    #[arg(long, default_value_t = 2)]
    from: usize,

    /// Largest ring size (inclusive).
    #[arg(long, default_value_t = 99)]
    to: usize,

    /// Only enumerate combinations of exactly this many offsets
    /// (default: every count from 0 to N - 1).
    #[arg(long)]
    offsets: Option<usize>,

    /// Output directory for the per-size documents.
    #[arg(long, default_value = "json")]
    out: PathBuf,

    /// Document shape.
    #[arg(long, value_enum, default_value_t = LayoutArg::Flat)]
    layout: LayoutArg,

    /// Worker threads (default: one per core).
    #[arg(long)]
    threads: Option<usize>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Disable ANSI colors in log output.
    #[arg(long)]
    no_color: bool,
}

impl Args {
    fn level(&self) -> Level {
        match (self.quiet, self.verbose) {
            (true, _) => Level::WARN,
            (false, 0) => Level::INFO,
            (false, 1) => Level::DEBUG,
            (false, _) => Level::TRACE,
        }
    }

    fn config(&self) -> SurveyConfig {
        SurveyConfig {
            sizes: self.from..=self.to,
            arity: self.offsets.map_or(Arity::All, Arity::Exactly),
            out_dir: self.out.clone(),
            layout: self.layout.into(),
            threads: self.threads,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.level())
        .with_target(false)
        .with_ansi(!args.no_color)
        .init();

    let outcome = run(&args.config())?;

    println!();
    for summary in &outcome.sizes {
        let status = match &summary.status {
            WriteStatus::Written(path) => format!("[OK]   {}", path.display()),
            WriteStatus::Failed(message) => format!("[FAIL] {message}"),
        };
        println!(
            "N = {:>3}: {} of {} invertible {}",
            summary.size, summary.invertible, summary.examined, status
        );
    }

    let failed = outcome.failures().count();
    println!();
    println!(
        "Summary: {} ring sizes, {} invertible rules, {} failed writes",
        outcome.sizes.len(),
        outcome.total_invertible(),
        failed
    );

    if failed > 0 {
        eprintln!("Survey incomplete: {} document(s) were not written.", failed);
        process::exit(1);
    }

    println!("Survey complete.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("toggle-survey").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn layout_flag_selects_document_shape() {
        assert_eq!(parse(&[]).config().layout, Layout::Flat);
        assert_eq!(parse(&["--layout", "flat"]).config().layout, Layout::Flat);
        assert_eq!(
            parse(&["--layout", "records"]).config().layout,
            Layout::Records
        );
        assert!(Args::try_parse_from(["toggle-survey", "--layout", "yaml"]).is_err());
    }

    #[test]
    fn defaults_cover_every_arity() {
        let config = parse(&[]).config();
        assert_eq!(config.sizes, 2..=99);
        assert_eq!(config.arity, Arity::All);
        let three = parse(&["--offsets", "3", "--from", "4"]).config();
        assert_eq!(three.arity, Arity::Exactly(3));
        assert_eq!(*three.sizes.start(), 4);
    }
}
