//! Statistical Predictor
//!
//! Wraps a pre-trained fertilizer classifier and the feature transform it was
//! trained behind. Both are JSON artifacts produced offline; either may be
//! absent, in which case the predictor reports itself unavailable and the
//! rule engine carries the recommendation alone.
//!
//! ## Architecture
//! - `features`: pulls the model's input features out of a `SoilRecord`
//! - `transform`: standard scaling + one-hot encoding (`FeatureTransform`)
//! - `classifier`: `FertilizerClassifier` trait with softmax and
//!   nearest-centroid implementations
//! - `artifacts`: JSON artifact loading and atomic saving
//! - `predictor`: lazily loading `Predictor` that never fails outward

pub mod artifacts;
pub mod classifier;
pub mod features;
pub mod predictor;
pub mod transform;

pub use artifacts::{load_artifacts, read_artifact, save_artifact, LoadedArtifacts};
pub use classifier::{
    ClassifierArtifact, FertilizerClassifier, NearestCentroidClassifier, SoftmaxClassifier,
};
pub use features::{FeatureRow, CATEGORICAL_FEATURES, INPUT_FEATURES, NUMERIC_FEATURES};
pub use predictor::{predict, shared_predictor, Predictor};
pub use transform::{CategoricalEncoder, FeatureTransform, NumericScaler};

use std::path::PathBuf;
use thiserror::Error;

use crate::types::{PredictorResult, SoilRecord};

/// Anything that can turn a soil record into a `PredictorResult`.
///
/// The arbitrator depends only on this seam, never on a concrete model.
/// Implementations must not fail outward: every problem becomes
/// `available = false` with a message.
pub trait FertilizerPredictor: Send + Sync {
    fn predict(&self, record: &SoilRecord) -> PredictorResult;
}

#[derive(Debug, Error)]
pub enum PredictorError {
    #[error("Missing required features in input: {}", .0.join(", "))]
    MissingFeatures(Vec<String>),

    #[error("model artifact not found at {}", .0.display())]
    ModelMissing(PathBuf),

    #[error("transform artifact not found at {}", .0.display())]
    TransformMissing(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    ArtifactIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    ArtifactParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("X has {got} features, but the model is expecting {expected} features as input")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("{0}")]
    Transform(String),

    #[error("{0}")]
    Inference(String),

    #[error("predictor disabled by configuration")]
    Disabled,
}
