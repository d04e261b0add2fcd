//! Fishpond Core - water-quality assessment for fish ponds
//!
//! This crate provides everything the prediction service needs except HTTP:
//!
//! - **Reading**: the four sensor measurements submitted per request, and their
//!   fixed-order feature vector
//! - **Quality**: the `Poor` / `Average` / `Good` label table for classifier output
//! - **Assessment**: one prediction, classifier label plus advisories
//! - **Rules**: threshold-based advisories, independent of the classifier
//! - **Model**: the `Classifier` trait and the tree-ensemble artifact it is loaded from
//! - **Config**: layered server configuration (defaults, TOML file, environment)
//!
//! # Pipeline
//!
//! ```text
//! SensorReading ─┬─ features() ─→ Classifier::predict ─→ WaterQuality
//!                └─ rules::recommend ─────────────────→ Vec<Recommendation>
//! ```

pub mod assessment;
pub mod config;
pub mod error;
pub mod model;
pub mod quality;
pub mod reading;
pub mod rules;

pub use assessment::assess;
pub use config::{ConfigError, ServerConfig};
pub use error::{FishpondError, Result};
pub use model::{Classifier, ModelError, TreeEnsemble};
pub use quality::{PredictionResult, WaterQuality};
pub use reading::{FeatureVector, SensorReading, FEATURE_COLUMNS, FEATURE_COUNT};
pub use rules::{recommend, Recommendation};
