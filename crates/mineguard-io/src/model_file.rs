//! Model artifact file loading.

use std::path::{Path, PathBuf};

use mineguard_engine::Ensemble;
use tracing::{info, instrument};

use crate::IoError;

/// Loads a JSON model artifact from disk into an [`Ensemble`].
///
/// The file contents are handed to the engine's artifact parser; this type
/// only contributes the file read and path context on failure.
pub struct ModelReader {
    path: PathBuf,
}

impl ModelReader {
    /// Create a new reader for the given model file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and parse the model file.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::ModelRead`] | file read failed |
    /// | [`IoError::ModelParse`] | artifact failed validation |
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Ensemble, IoError> {
        let bytes = std::fs::read(&self.path).map_err(|e| IoError::ModelRead {
            path: self.path.clone(),
            source: e,
        })?;

        let ensemble = Ensemble::from_json(&bytes).map_err(|e| IoError::ModelParse {
            path: self.path.clone(),
            source: e,
        })?;

        info!(n_trees = ensemble.n_trees(), "model file loaded");

        Ok(ensemble)
    }
}
