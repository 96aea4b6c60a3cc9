//! CSV ingestion of linked-list benchmark results.

use crate::error::{PlotError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Columns every results file must provide, in any order
pub const COLUMNS: [&str; 5] = ["impl", "threads", "contains_pct", "median", "avg"];

/// One row of a results file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sample {
    #[serde(rename = "impl")]
    pub implementation: String,
    pub threads: u32,
    pub contains_pct: u32,
    pub median: f64,
    pub avg: f64,
}

/// Samples of one implementation as parallel columns, in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub threads: Vec<u32>,
    pub contains_pct: Vec<u32>,
    pub median: Vec<f64>,
    pub avg: Vec<f64>,
}

impl Series {
    pub fn push(&mut self, sample: &Sample) {
        self.threads.push(sample.threads);
        self.contains_pct.push(sample.contains_pct);
        self.median.push(sample.median);
        self.avg.push(sample.avg);
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }
}

/// Ingested results keyed by implementation name
pub type Results = BTreeMap<String, Series>;

/// Read a results CSV file
pub fn read_results<P: AsRef<Path>>(path: P) -> anyhow::Result<Results> {
    use anyhow::Context;

    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open results file: {}", path.display()))?;
    Ok(read_results_from(file, path)?)
}

/// Read results from any reader; `path` is only used in error messages
pub fn read_results_from<R: Read>(reader: R, path: &Path) -> Result<Results> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| PlotError::Parse {
            path: path.to_path_buf(),
            line: 1,
            source: e,
        })?
        .clone();

    for column in COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(PlotError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            });
        }
    }

    let mut results = Results::new();
    for row in reader.deserialize::<Sample>() {
        let sample = row.map_err(|e| PlotError::Parse {
            path: path.to_path_buf(),
            line: e.position().map(|p| p.line()).unwrap_or(0),
            source: e,
        })?;
        results
            .entry(sample.implementation.clone())
            .or_default()
            .push(&sample);
    }

    log::debug!(
        "{}: {} implementations, {} samples",
        path.display(),
        results.len(),
        results.values().map(Series::len).sum::<usize>()
    );

    Ok(results)
}
