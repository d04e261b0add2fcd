//! Classifier abstraction and artifact loading
//!
//! The service treats the trained model as a black box: a fixed-order feature
//! vector goes in, a class id comes out. [`TreeEnsemble`] is the concrete
//! implementation loaded from a JSON artifact at startup.

mod ensemble;

pub use ensemble::TreeEnsemble;

use thiserror::Error;

use crate::reading::FeatureVector;

/// A trained classifier shared read-only across requests
pub trait Classifier: Send + Sync {
    /// Predict the class id for a single row
    fn predict(&self, features: &FeatureVector) -> Result<i64, ModelError>;
}

/// Errors from loading or running a classifier
#[derive(Error, Debug)]
pub enum ModelError {
    /// Artifact could not be read
    #[error("Failed to read model artifact {path}: {message}")]
    Io { path: String, message: String },

    /// Artifact is not valid JSON or has the wrong shape
    #[error("Failed to parse model artifact: {0}")]
    Parse(String),

    /// Artifact parsed but is structurally unusable
    #[error("Invalid model artifact: {0}")]
    Invalid(String),

    /// Inference could not be carried out for this input
    #[error("Inference failed: {0}")]
    Inference(String),
}
