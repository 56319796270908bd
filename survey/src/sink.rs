//! Writes one JSON document per ring size.
//!
//! # Layouts
//!
//! `Flat` (`<out>/<N>.json`):
//!
//! ```text
//! {
//!     "size": 8,
//!     "0": "0",
//!     "1": "3",
//!     ...
//! }
//! ```
//!
//! `Records`:
//!
//! ```text
//! {
//!     "size": 8,
//!     "results": [
//!         { "key": "0", "value": "0" },
//!         ...
//!     ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::ser::PrettyFormatter;

use crate::driver::SizeReport;

/// Reserved key holding the invertible count.
pub const SIZE_KEY: &str = "size";

/// Shape of a per-size document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// `size` followed by one `"<key>": "<value>"` entry per record.
    #[default]
    Flat,
    /// `size` plus a `results` array of `{key, value}` objects.
    Records,
}

struct FlatDocument<'a>(&'a SizeReport);

impl Serialize for FlatDocument<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let report = self.0;
        let mut map = serializer.serialize_map(Some(report.records.len() + 1))?;
        map.serialize_entry(SIZE_KEY, &report.invertible_count())?;
        for record in &report.records {
            map.serialize_entry(&record.key(), &record.value())?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct RecordsDocument {
    size: usize,
    results: Vec<RecordEntry>,
}

#[derive(Serialize)]
struct RecordEntry {
    key: String,
    value: String,
}

impl From<&SizeReport> for RecordsDocument {
    fn from(report: &SizeReport) -> Self {
        Self {
            size: report.invertible_count(),
            results: report
                .records
                .iter()
                .map(|r| RecordEntry {
                    key: r.key(),
                    value: r.value(),
                })
                .collect(),
        }
    }
}

/// Renders a report as pretty JSON with 4-space indentation.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(report: &SizeReport, layout: Layout) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    match layout {
        Layout::Flat => FlatDocument(report).serialize(&mut ser),
        Layout::Records => RecordsDocument::from(report).serialize(&mut ser),
    }
    .with_context(|| format!("Failed to serialize results for ring size {}", report.size))?;
    String::from_utf8(buf).context("Serialized JSON is not UTF-8")
}

/// Path of the document for `size` under `out_dir`.
#[must_use]
pub fn document_path(out_dir: &Path, size: usize) -> PathBuf {
    out_dir.join(format!("{size}.json"))
}

/// Writes the document for `report`, creating `out_dir` as needed.
///
/// Returns the path written.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be written.
pub fn write_report(out_dir: &Path, report: &SizeReport, layout: Layout) -> Result<PathBuf> {
    let json = render(report, layout)?;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;
    let path = document_path(out_dir, report.size);
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::survey_size;
    use ring_toggle::Arity;

    #[test]
    fn flat_layout_puts_size_first() {
        let report = survey_size(3, Arity::All).unwrap();
        let json = render(&report, Layout::Flat).unwrap();
        assert_eq!(
            json,
            "{\n    \"size\": 3,\n    \"0\": \"0\",\n    \"1\": \"2\",\n    \"2\": \"1\"\n}"
        );
    }

    #[test]
    fn records_layout_shape() {
        let report = survey_size(4, Arity::Exactly(3)).unwrap();
        let json = render(&report, Layout::Records).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["size"], 4);
        let results = value["results"].as_array().unwrap();
        assert_eq!(results.len(), 4);
        assert_eq!(results[0]["key"], "0, 1, 2");
        assert!(results.iter().all(|r| r["value"].is_string()));
    }

    #[test]
    fn flat_round_trips_through_json() {
        let report = survey_size(5, Arity::All).unwrap();
        let json = render(&report, Layout::Flat).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), report.invertible_count() + 1);
        assert_eq!(object[SIZE_KEY], 15);
        assert_eq!(object["1"], "4");
    }

    #[test]
    fn write_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("json").join("out");
        let report = survey_size(2, Arity::All).unwrap();
        let path = write_report(&out, &report, Layout::Flat).unwrap();
        assert_eq!(path, out.join("2.json"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\n    \"size\": 2"));
    }

    #[test]
    fn write_fails_when_target_is_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("3.json")).unwrap();
        let report = survey_size(3, Arity::All).unwrap();
        let err = write_report(dir.path(), &report, Layout::Flat).unwrap_err();
        assert!(format!("{err:#}").contains("3.json"));
    }
}
