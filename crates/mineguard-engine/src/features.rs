//! Feature construction from raw sensor observations.

use std::fmt;

use crate::error::FeatureError;
use crate::node::FeatureIndex;

/// Number of features the ensemble was trained on: the raw reading and
/// the sensor type code.
pub const FEATURE_COUNT: usize = 2;

/// Sensor categories known to the fallback type-code table.
///
/// Dataset rows usually carry an authoritative per-reading type code; this
/// table covers the rows (and interactive queries) that do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SensorType {
    /// MQ-7 carbon-monoxide gas sensor.
    CarbonMonoxide,
    /// Heart-rate (pulse) sensor.
    Pulse,
    /// Body-temperature sensor.
    BodyTemperature,
    /// X-axis accelerometer.
    AccelerometerX,
    /// Y-axis accelerometer.
    AccelerometerY,
}

impl SensorType {
    /// All known sensor types, in type-code order.
    pub const ALL: [SensorType; 5] = [
        SensorType::CarbonMonoxide,
        SensorType::Pulse,
        SensorType::BodyTemperature,
        SensorType::AccelerometerX,
        SensorType::AccelerometerY,
    ];

    /// Look up a sensor type by its dataset name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mq7" => Some(Self::CarbonMonoxide),
            "pulse" => Some(Self::Pulse),
            "body_temp" => Some(Self::BodyTemperature),
            "ax" => Some(Self::AccelerometerX),
            "ay" => Some(Self::AccelerometerY),
            _ => None,
        }
    }

    /// Dataset name for this sensor type.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::CarbonMonoxide => "mq7",
            Self::Pulse => "pulse",
            Self::BodyTemperature => "body_temp",
            Self::AccelerometerX => "ax",
            Self::AccelerometerY => "ay",
        }
    }

    /// Numeric type code used as the second model feature.
    #[must_use]
    pub fn type_code(self) -> i64 {
        match self {
            Self::CarbonMonoxide => 1,
            Self::Pulse => 2,
            Self::BodyTemperature => 3,
            Self::AccelerometerX => 4,
            Self::AccelerometerY => 5,
        }
    }

    /// Human-readable sensor name as the product displays it.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::CarbonMonoxide => "MQ-7 (CO)",
            Self::Pulse => "Pulse",
            Self::BodyTemperature => "Temp. Corporal",
            Self::AccelerometerX => "Acelerómetro X",
            Self::AccelerometerY => "Acelerómetro Y",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The fixed two-feature model input: raw value and sensor type code.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FeatureVector {
    value: f64,
    type_code: f64,
}

impl FeatureVector {
    /// Create a feature vector directly from its two components.
    #[must_use]
    pub fn new(value: f64, type_code: f64) -> Self {
        Self { value, type_code }
    }

    /// Resolve a feature by index: 0 is the value, 1 the type code.
    #[must_use]
    pub fn get(&self, index: FeatureIndex) -> Option<f64> {
        match index.index() {
            0 => Some(self.value),
            1 => Some(self.type_code),
            _ => None,
        }
    }

    /// Return the raw sensor value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Return the numeric sensor type code.
    #[must_use]
    pub fn type_code(&self) -> f64 {
        self.type_code
    }
}

/// A raw sensor observation submitted for classification.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Observation {
    /// Raw numeric sensor reading.
    pub value: f64,
    /// Dataset name of the sensor that produced the reading.
    pub sensor_type: String,
    /// Authoritative type code, when the record carries one.
    pub type_code: Option<i64>,
}

/// Build the model's feature vector from a raw observation.
///
/// An explicit per-observation type code always wins; otherwise the static
/// [`SensorType`] table supplies one from the sensor name.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`FeatureError::InvalidValue`] | `value` is NaN or infinite |
/// | [`FeatureError::UnknownSensor`] | no explicit code and no table entry for `sensor_type` |
pub fn build_features(
    value: f64,
    sensor_type: &str,
    explicit_code: Option<i64>,
) -> Result<FeatureVector, FeatureError> {
    if !value.is_finite() {
        return Err(FeatureError::InvalidValue { value });
    }
    let code = match explicit_code {
        Some(code) => code,
        None => SensorType::from_name(sensor_type)
            .map(SensorType::type_code)
            .ok_or_else(|| FeatureError::UnknownSensor {
                sensor_type: sensor_type.to_string(),
            })?,
    };
    Ok(FeatureVector::new(value, code as f64))
}
