//! Error types for fishpond-core

use thiserror::Error;

use crate::model::ModelError;

/// Result type alias for fishpond operations
pub type Result<T> = std::result::Result<T, FishpondError>;

/// Main error type for fishpond operations
#[derive(Error, Debug)]
pub enum FishpondError {
    /// Classifier loading or inference failed
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Classifier returned a class id outside the label table
    #[error("Unknown water quality class: {0}")]
    UnknownClass(i64),
}
