//! Error types for ingestion and chart construction.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("{}: missing column '{column}'", path.display())]
    MissingColumn { column: String, path: PathBuf },

    #[error("{}: line {line}: malformed record", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("no style defined for implementation '{0}'")]
    UnknownImplementation(String),

    #[error("series '{label}' has {actual} values, expected {expected}")]
    LengthMismatch {
        label: String,
        expected: usize,
        actual: usize,
    },

    #[error("no usable font found (tried: {tried}); pass --font or set BENCHPLOT_FONT")]
    FontUnavailable { tried: String },
}

pub type Result<T> = std::result::Result<T, PlotError>;
