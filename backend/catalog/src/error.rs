use std::path::PathBuf;

use thiserror::Error;

/// Header inference failure for one mapping source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    #[error("no exam roll column")]
    MissingTargetColumn,

    #[error("no college roll column")]
    MissingSourceColumn,
}

/// Failure to read a tabular file into headers and rows.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("unsupported table format: {0}")]
    UnsupportedFormat(String),

    #[error("spreadsheet has no worksheet")]
    NoWorksheet,

    #[error("table has no header row")]
    NoHeader,

    #[error(transparent)]
    Spreadsheet(#[from] calamine::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// A mapping source that exists but could not be used.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read mapping file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    #[error("invalid mapping file {path}: {source} (headers: {headers:?})")]
    Columns {
        path: PathBuf,
        headers: Vec<String>,
        #[source]
        source: InferenceError,
    },
}

/// The manifest is required; every variant aborts startup.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("manifest not found: {0}")]
    Missing(PathBuf),

    #[error("failed to read manifest {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: TableError,
    },

    #[error("manifest {path} is missing column '{column}' (headers: {headers:?})")]
    MissingColumn {
        path: PathBuf,
        column: &'static str,
        headers: Vec<String>,
    },
}

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Mapping(#[from] LoadError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

/// Lookup-time absence. A normal outcome, never a fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    #[error("Roll number not found")]
    Roll,

    #[error("Admit card not found for exam roll {exam_roll}")]
    AdmitCard {
        college_roll: String,
        exam_roll: String,
    },
}
