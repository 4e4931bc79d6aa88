//! Dataset and model-file loading for the mineguard classification engine.
//!
//! Reads labelled sensor-reading CSVs and JSON model artifacts from disk
//! and hands validated in-memory values to `mineguard-engine`. All
//! filesystem access of the product lives here; the engine itself never
//! touches a file.

mod domain;
mod error;
mod model_file;
mod reader;

pub use domain::{ReadingDataset, ReadingId, SensorRecord};
pub use error::IoError;
pub use model_file::ModelReader;
pub use reader::ReadingReader;
