//! Sensor readings and the classifier's feature layout

use serde::{de::Error as _, Deserialize, Serialize};
use serde_json::Value;

/// Number of features the classifier consumes.
pub const FEATURE_COUNT: usize = 4;

/// Column names in the order the classifier was trained on.
///
/// This order is a frozen contract with the model artifact.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "Temperature",
    "pH Level",
    "Ammonia Level",
    "Dissolved Oxygen",
];

/// One row of classifier input, laid out as [`FEATURE_COLUMNS`].
pub type FeatureVector = [f64; FEATURE_COUNT];

/// The four raw measurements submitted for one pond.
///
/// Field names on the wire match the training columns exactly, spaces
/// included. Unknown fields are ignored; all four are required.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Water temperature in °C
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    /// pH, 0-14
    #[serde(rename = "pH Level")]
    pub ph_level: f64,
    /// Ammonia in mg/L
    #[serde(rename = "Ammonia Level")]
    pub ammonia_level: f64,
    /// Dissolved oxygen in mg/L
    #[serde(rename = "Dissolved Oxygen")]
    pub dissolved_oxygen: f64,
}

impl SensorReading {
    pub fn new(temperature: f64, ph_level: f64, ammonia_level: f64, dissolved_oxygen: f64) -> Self {
        Self {
            temperature,
            ph_level,
            ammonia_level,
            dissolved_oxygen,
        }
    }

    /// Parse a request body.
    ///
    /// Only a JSON object with named fields is a reading; the derived
    /// deserializer alone would also take a positional array.
    pub fn from_json_value(value: Value) -> Result<Self, serde_json::Error> {
        if !value.is_object() {
            return Err(serde_json::Error::custom(format!(
                "expected a JSON object with fields {:?}",
                FEATURE_COLUMNS
            )));
        }
        serde_json::from_value(value)
    }

    /// Feature vector in training column order
    pub fn features(&self) -> FeatureVector {
        [
            self.temperature,
            self.ph_level,
            self.ammonia_level,
            self.dissolved_oxygen,
        ]
    }
}
