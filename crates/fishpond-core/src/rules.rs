//! Threshold-based advisories
//!
//! Each rule looks at one measurement and is evaluated on its own, so a
//! reading can trigger several advisories. They are emitted in a fixed order:
//! ammonia, dissolved oxygen, pH, temperature. A reading that triggers none
//! gets a single "all clear" advisory.

use serde::{Deserialize, Serialize};

use crate::reading::SensorReading;

/// Ammonia above this (mg/L) is too high
pub const AMMONIA_MAX: f64 = 3.0;
/// Dissolved oxygen below this (mg/L) is too low
pub const DISSOLVED_OXYGEN_MIN: f64 = 5.0;
/// Inclusive acceptable pH band
pub const PH_RANGE: (f64, f64) = (6.5, 8.5);
/// Inclusive acceptable temperature band in °C
pub const TEMPERATURE_RANGE: (f64, f64) = (10.0, 35.0);

/// A detected issue and what to do about it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub issue: String,
    pub recommendation: String,
}

impl Recommendation {
    fn new(issue: &str, recommendation: &str) -> Self {
        Self {
            issue: issue.to_string(),
            recommendation: recommendation.to_string(),
        }
    }
}

/// Advisories for a reading, in rule order. Never empty.
pub fn recommend(reading: &SensorReading) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if reading.ammonia_level > AMMONIA_MAX {
        recommendations.push(Recommendation::new(
            "High ammonia level detected.",
            "Consider adding biological filters or reducing organic waste input.",
        ));
    }

    if reading.dissolved_oxygen < DISSOLVED_OXYGEN_MIN {
        recommendations.push(Recommendation::new(
            "Low dissolved oxygen detected.",
            "Install aerators to improve oxygen levels.",
        ));
    }

    if !in_range(reading.ph_level, PH_RANGE) {
        recommendations.push(Recommendation::new(
            "pH level is outside the optimal range.",
            "Adjust pH using buffers like sodium carbonate or acidic solutions.",
        ));
    }

    if !in_range(reading.temperature, TEMPERATURE_RANGE) {
        recommendations.push(Recommendation::new(
            "Temperature is outside the optimal range.",
            "Control temperature using cooling or heating systems.",
        ));
    }

    if recommendations.is_empty() {
        recommendations.push(Recommendation::new(
            "All parameters are within acceptable ranges.",
            "Continue monitoring to maintain optimal conditions.",
        ));
    }

    recommendations
}

fn in_range(value: f64, (low, high): (f64, f64)) -> bool {
    low <= value && value <= high
}
