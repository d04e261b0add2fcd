//! One prediction: classify a reading and attach its advisories

use crate::error::Result;
use crate::model::Classifier;
use crate::quality::{PredictionResult, WaterQuality};
use crate::reading::SensorReading;
use crate::rules::recommend;

/// Classify `reading` and collect its advisories.
///
/// Classifier failures surface as [`FishpondError::Model`]; a class id
/// outside the label table as [`FishpondError::UnknownClass`].
///
/// [`FishpondError::Model`]: crate::FishpondError::Model
/// [`FishpondError::UnknownClass`]: crate::FishpondError::UnknownClass
pub fn assess(classifier: &dyn Classifier, reading: &SensorReading) -> Result<PredictionResult> {
    let class_id = classifier.predict(&reading.features())?;
    let water_quality = WaterQuality::try_from(class_id)?;

    Ok(PredictionResult {
        water_quality,
        recommendations: recommend(reading),
    })
}
