//! CSV reader for labelled sensor-reading datasets.

use std::path::{Path, PathBuf};

use mineguard_engine::Class;
use tracing::{debug, info, instrument, warn};

use crate::domain::{ReadingDataset, ReadingId, SensorRecord};
use crate::IoError;

/// Minimum fields a usable row must carry: reading id, subject id,
/// timestamp, sensor type, value, label.
const MIN_FIELDS: usize = 6;

/// Reads labelled sensor readings from a CSV file.
///
/// Expected format, one reading per row:
/// `reading_id,user_id,timestamp,type,value,label[,type_cod]`
///
/// - A header row is optional; the first row is treated as a header when
///   it mentions `reading_id` or `timestamp`.
/// - Rows with fewer than six fields are skipped and counted, not fatal.
/// - The value field accepts a decimal comma; unparseable or non-finite
///   values skip the row.
/// - The label parses case-insensitively: `1`, `riesgo`, or `true` mean
///   risk, anything else is normal.
/// - A seventh field, when present and numeric, is the authoritative
///   sensor type code.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::EmptyDataset`] | Zero usable rows |
pub struct ReadingReader {
    path: PathBuf,
}

impl ReadingReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read the CSV file, returning a [`ReadingDataset`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<ReadingDataset, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // Header presence is sniffed from the first record, so the CSV
        // reader runs header-less with flexible row lengths.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut records = Vec::new();
        let mut n_skipped = 0usize;

        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| IoError::CsvParse {
                path: self.path.clone(),
                offset: e.position().map_or(0, |p| p.byte()),
                source: e,
            })?;

            if row_index == 0 && is_header(&record) {
                debug!("header row detected");
                continue;
            }

            if record.len() < MIN_FIELDS {
                n_skipped += 1;
                continue;
            }

            let raw_value = record.get(4).unwrap_or("").trim().replace(',', ".");
            let value: f64 = match raw_value.parse() {
                Ok(v) if f64::is_finite(v) => v,
                _ => {
                    warn!(row_index, raw = raw_value.as_str(), "unusable value field, row skipped");
                    n_skipped += 1;
                    continue;
                }
            };

            let label = parse_label(record.get(5).unwrap_or(""));
            let type_code = record
                .get(6)
                .and_then(|raw| raw.trim().parse::<i64>().ok());

            records.push(SensorRecord {
                reading_id: ReadingId::new(record.get(0).unwrap_or("").trim().to_string()),
                subject_id: record.get(1).unwrap_or("").trim().to_string(),
                timestamp: record.get(2).unwrap_or("").trim().to_string(),
                sensor_type: record.get(3).unwrap_or("").trim().to_string(),
                value,
                label,
                type_code,
            });
        }

        if records.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        info!(n_records = records.len(), n_skipped, "dataset loaded");

        Ok(ReadingDataset { records, n_skipped })
    }
}

/// A first row mentioning `reading_id` or `timestamp` is a header.
fn is_header(record: &csv::StringRecord) -> bool {
    record.iter().any(|field| {
        let lower = field.to_ascii_lowercase();
        lower.contains("reading_id") || lower.contains("timestamp")
    })
}

/// Parse a ground-truth label: `1`, `riesgo`, and `true` (any case) mean
/// risk; everything else is normal.
fn parse_label(raw: &str) -> Class {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "riesgo" | "true" => Class::Risk,
        _ => Class::Normal,
    }
}
