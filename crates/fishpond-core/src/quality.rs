//! Water quality labels and the prediction payload

use serde::{Deserialize, Serialize};

use crate::error::FishpondError;
use crate::rules::Recommendation;

/// Overall water quality as judged by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaterQuality {
    Poor,
    Average,
    Good,
}

impl WaterQuality {
    /// Class id the classifier emits for this label
    pub fn class_id(self) -> i64 {
        match self {
            WaterQuality::Poor => 0,
            WaterQuality::Average => 1,
            WaterQuality::Good => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WaterQuality::Poor => "Poor",
            WaterQuality::Average => "Average",
            WaterQuality::Good => "Good",
        }
    }
}

impl TryFrom<i64> for WaterQuality {
    type Error = FishpondError;

    fn try_from(class_id: i64) -> Result<Self, Self::Error> {
        match class_id {
            0 => Ok(WaterQuality::Poor),
            1 => Ok(WaterQuality::Average),
            2 => Ok(WaterQuality::Good),
            other => Err(FishpondError::UnknownClass(other)),
        }
    }
}

impl std::fmt::Display for WaterQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response body of a successful prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub water_quality: WaterQuality,
    pub recommendations: Vec<Recommendation>,
}
