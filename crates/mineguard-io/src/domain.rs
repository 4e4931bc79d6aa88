//! Domain types for mineguard-io.

use mineguard_engine::{Class, Observation};

/// A sensor reading identifier from the dataset's first column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReadingId(String);

impl ReadingId {
    /// Create a new reading ID.
    pub(crate) fn new(id: String) -> Self {
        Self(id)
    }

    /// Return the reading ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReadingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One labelled sensor reading from an evaluation dataset.
#[derive(Debug, Clone)]
pub struct SensorRecord {
    /// Reading identifier (first CSV column).
    pub reading_id: ReadingId,
    /// Identifier of the monitored worker.
    pub subject_id: String,
    /// Timestamp string as recorded; not interpreted by the engine.
    pub timestamp: String,
    /// Sensor type name, e.g. "mq7".
    pub sensor_type: String,
    /// Raw numeric reading.
    pub value: f64,
    /// Ground-truth label.
    pub label: Class,
    /// Authoritative type code from the optional seventh column.
    pub type_code: Option<i64>,
}

impl SensorRecord {
    /// The engine-facing view of this record.
    #[must_use]
    pub fn observation(&self) -> Observation {
        Observation {
            value: self.value,
            sensor_type: self.sensor_type.clone(),
            type_code: self.type_code,
        }
    }
}

/// A parsed evaluation dataset.
///
/// Produced by [`ReadingReader`](crate::ReadingReader). Records keep their
/// file order; rows the reader could not use are counted, not kept.
#[derive(Debug)]
pub struct ReadingDataset {
    /// Usable records in file order.
    pub records: Vec<SensorRecord>,
    /// Rows skipped for having too few fields or an unusable value.
    pub n_skipped: usize,
}

impl ReadingDataset {
    /// Return the number of usable records.
    #[must_use]
    pub fn n_records(&self) -> usize {
        self.records.len()
    }

    /// Distinct sensor type names in first-seen order.
    #[must_use]
    pub fn sensor_types(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !record.sensor_type.is_empty() && !seen.contains(&record.sensor_type) {
                seen.push(record.sensor_type.clone());
            }
        }
        seen
    }

    /// Engine observations for every record, in file order.
    #[must_use]
    pub fn observations(&self) -> Vec<Observation> {
        self.records.iter().map(SensorRecord::observation).collect()
    }
}
