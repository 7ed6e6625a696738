//! Input suppliers: CSV files and synthetic random walks.
//!
//! Both produce a non-empty, ascending-by-date `Vec<PriceObservation>` or a
//! structured error. Nothing here ever reaches into the engine; a failed
//! load stops before a transform is attempted.

pub mod csv;
pub mod synthetic;

pub use self::csv::{read_csv, read_csv_from};
pub use synthetic::{generate, generate_seeded, SyntheticParams};

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Structured error types for data loading.
///
/// These are displayable as-is in the CLI.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("input contains no price rows")]
    EmptyFile,

    #[error("missing required column '{column}' (need Date, Open, High, Low, Close)")]
    MissingColumn { column: &'static str },

    #[error("line {line}: invalid {column} value '{value}'")]
    InvalidField {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: date {current} does not come after {previous}")]
    OutOfOrder {
        line: u64,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("invalid synthetic parameters: {0}")]
    InvalidParams(String),
}
