//! Error types for the model builder.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a model build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// No dataset path was configured.
    #[error("no dataset configured (pass --dataset or set dataset_path)")]
    NoDataset,

    /// The dataset file could not be opened or parsed.
    #[error("failed to read dataset {path}: {source}")]
    Dataset {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The dataset lacks a required column.
    #[error("dataset {path} is missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: &'static str },

    /// The dataset (or its sample) contains no records.
    #[error("dataset {path} contains no records")]
    EmptyDataset { path: PathBuf },

    /// An error propagated from the core artifact layer.
    #[error("artifact error: {0}")]
    Artifact(#[from] lyricsim_core::Error),
}

/// Convenience alias for builder results.
pub type BuildResult<T> = std::result::Result<T, BuildError>;
