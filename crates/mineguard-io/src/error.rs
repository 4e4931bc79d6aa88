//! I/O error types for mineguard-io.

use std::path::PathBuf;

use mineguard_engine::ModelError;

/// Errors from file I/O, CSV parsing, and model-artifact loading.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the CSV file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the dataset contains zero usable rows.
    #[error("empty dataset (no usable rows) in {path}")]
    EmptyDataset {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// Returned when the model file cannot be read.
    #[error("failed to read model from {path}")]
    ModelRead {
        /// Path to the model file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the model file does not parse as a valid artifact.
    #[error("invalid model artifact in {path}")]
    ModelParse {
        /// Path to the model file.
        path: PathBuf,
        /// The underlying validation error.
        source: ModelError,
    },
}
