//! Lazily loading predictor.
//!
//! The model/transform pair is loaded on the first call and cached only when
//! the load succeeds. A failed load is retried on the next call, once per
//! call, with no background retry.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use super::artifacts::{load_artifacts, LoadedArtifacts};
use super::classifier::FertilizerClassifier;
use super::features::FeatureRow;
use super::transform::FeatureTransform;
use super::{FertilizerPredictor, PredictorError};
use crate::config::{self, PredictorConfig};
use crate::types::{PredictorResult, SoilRecord};

const MODEL_MISSING_MSG: &str =
    "ML model file not found. Only rule-based recommendations will be used.";
const TRANSFORM_MISSING_MSG: &str =
    "Preprocessor (scaler/encoder) file not found. Only rule-based recommendations will be used.";
const DISABLED_MSG: &str =
    "ML predictor disabled by configuration. Only rule-based recommendations will be used.";

#[derive(Debug)]
enum ArtifactSource {
    Disabled,
    Files {
        model_path: PathBuf,
        transform_path: PathBuf,
    },
    Preloaded,
    /// Preloaded artifacts that failed validation
    Rejected(String),
}

#[derive(Debug)]
pub struct Predictor {
    source: ArtifactSource,
    loaded: OnceLock<LoadedArtifacts>,
}

impl Predictor {
    /// Predictor reading artifacts from the configured paths (env overrides
    /// applied), or a disabled one when `enabled = false`.
    pub fn from_config(cfg: &PredictorConfig) -> Self {
        if !cfg.enabled {
            return Self::disabled();
        }
        let (model_path, transform_path) = cfg.resolved_paths();
        Self::from_paths(model_path, transform_path)
    }

    pub fn from_paths(model_path: impl Into<PathBuf>, transform_path: impl Into<PathBuf>) -> Self {
        Self {
            source: ArtifactSource::Files {
                model_path: model_path.into(),
                transform_path: transform_path.into(),
            },
            loaded: OnceLock::new(),
        }
    }

    /// Predictor over artifacts already in memory. A classifier that fails
    /// validation is kept out and reported on every `predict` call.
    pub fn with_artifacts(
        transform: FeatureTransform,
        classifier: Box<dyn FertilizerClassifier>,
    ) -> Self {
        let loaded = OnceLock::new();
        let source = match classifier.validate() {
            Ok(()) => {
                let _ = loaded.set(LoadedArtifacts {
                    transform,
                    classifier,
                });
                ArtifactSource::Preloaded
            }
            Err(PredictorError::InvalidArtifact(reason)) => ArtifactSource::Rejected(reason),
            Err(other) => ArtifactSource::Rejected(other.to_string()),
        };
        Self { source, loaded }
    }

    pub fn disabled() -> Self {
        Self {
            source: ArtifactSource::Disabled,
            loaded: OnceLock::new(),
        }
    }

    /// Whether artifacts are currently cached.
    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }

    fn artifacts(&self) -> Result<&LoadedArtifacts, PredictorError> {
        if let Some(loaded) = self.loaded.get() {
            return Ok(loaded);
        }
        match &self.source {
            ArtifactSource::Disabled => Err(PredictorError::Disabled),
            ArtifactSource::Preloaded => Err(PredictorError::InvalidArtifact(
                "preloaded artifacts are missing".into(),
            )),
            ArtifactSource::Rejected(reason) => {
                Err(PredictorError::InvalidArtifact(reason.clone()))
            }
            ArtifactSource::Files {
                model_path,
                transform_path,
            } => {
                let loaded = load_artifacts(model_path, transform_path)?;
                info!(
                    model = %model_path.display(),
                    transform = %transform_path.display(),
                    classes = loaded.classifier.classes().len(),
                    "Fertilizer model loaded"
                );
                Ok(self.loaded.get_or_init(|| loaded))
            }
        }
    }

    fn run(&self, record: &SoilRecord) -> Result<PredictorResult, String> {
        let artifacts = self.artifacts().map_err(|e| load_failure_message(&e))?;

        let row = FeatureRow::from_record(record)
            .map_err(|e| format!("Invalid input for ML model: {e}"))?;

        let x = artifacts
            .transform
            .transform(&row)
            .map_err(|e| format!("Error while transforming features: {e}"))?;

        let label = artifacts
            .classifier
            .predict(&x)
            .map_err(|e| format!("Error during ML prediction: {e}"))?;

        // A probability failure drops the distribution, not the prediction
        let probabilities = match artifacts.classifier.predict_with_probabilities(&x) {
            Ok(probs) => probs,
            Err(e) => {
                debug!(error = %e, "Class probabilities unavailable");
                None
            }
        };

        Ok(PredictorResult::prediction(label, probabilities))
    }

    pub fn model_path(&self) -> Option<&Path> {
        match &self.source {
            ArtifactSource::Files { model_path, .. } => Some(model_path),
            _ => None,
        }
    }
}

fn load_failure_message(err: &PredictorError) -> String {
    match err {
        PredictorError::ModelMissing(_) => MODEL_MISSING_MSG.to_string(),
        PredictorError::TransformMissing(_) => TRANSFORM_MISSING_MSG.to_string(),
        PredictorError::Disabled => DISABLED_MSG.to_string(),
        other => format!(
            "Could not load ML artifacts ({other}). Only rule-based recommendations will be used."
        ),
    }
}

impl FertilizerPredictor for Predictor {
    fn predict(&self, record: &SoilRecord) -> PredictorResult {
        match self.run(record) {
            Ok(result) => {
                debug!(
                    prediction = result.predicted_fertilizer.as_deref().unwrap_or(""),
                    has_probabilities = result.probabilities.is_some(),
                    "Model prediction"
                );
                result
            }
            Err(message) => {
                warn!(reason = %message, "Predictor unavailable, falling back to rules");
                PredictorResult::unavailable(message)
            }
        }
    }
}

static SHARED_PREDICTOR: OnceLock<Predictor> = OnceLock::new();

/// Process-wide predictor built from the active configuration on first use.
pub fn shared_predictor() -> &'static Predictor {
    SHARED_PREDICTOR.get_or_init(|| Predictor::from_config(&config::get().predictor))
}

/// Predict with the shared predictor.
pub fn predict(record: &SoilRecord) -> PredictorResult {
    shared_predictor().predict(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml_engine::classifier::SoftmaxClassifier;
    use crate::ml_engine::transform::{CategoricalEncoder, NumericScaler};
    use crate::types::SoilType;

    fn full_record() -> SoilRecord {
        SoilRecord {
            ph: Some(6.5),
            organic_carbon: Some(0.8),
            nitrogen: Some(30.0),
            phosphorus: Some(45.0),
            potassium: Some(140.0),
            soil_type: Some(SoilType::Loam),
            rainfall: Some(800.0),
            temperature: Some(28.0),
            electrical_conductivity: Some(0.7),
            crop: Some("Rice".into()),
        }
    }

    /// One numeric input (nitrogen) plus crop one-hot; low N favours Urea.
    fn in_memory() -> Predictor {
        let transform = FeatureTransform {
            numeric: vec![NumericScaler { name: "nitrogen".into(), mean: 100.0, scale: 50.0 }],
            categorical: vec![CategoricalEncoder {
                name: "crop".into(),
                categories: vec!["Rice".into()],
            }],
        };
        let classifier = SoftmaxClassifier {
            classes: vec!["DAP".into(), "Urea".into()],
            weights: vec![vec![1.0, 0.0], vec![-1.0, 0.5]],
            intercepts: vec![0.0, 0.0],
        };
        Predictor::with_artifacts(transform, Box::new(classifier))
    }

    #[test]
    fn test_in_memory_prediction() {
        let result = in_memory().predict(&full_record());
        assert!(result.available);
        assert_eq!(result.predicted_fertilizer.as_deref(), Some("Urea"));
        let probs = result.probabilities.as_ref().unwrap();
        assert_eq!(probs.len(), 2);
        assert_eq!(result.ranked()[0].0, "Urea");
    }

    #[test]
    fn test_missing_model_file() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let predictor = Predictor::from_paths(dir.path().join("m.json"), dir.path().join("t.json"));
        let result = predictor.predict(&full_record());
        assert!(!result.available);
        assert_eq!(result.message.as_deref(), Some(MODEL_MISSING_MSG));
        assert!(!predictor.is_loaded());
    }

    #[test]
    fn test_disabled() {
        let result = Predictor::disabled().predict(&full_record());
        assert_eq!(result.message.as_deref(), Some(DISABLED_MSG));
    }

    #[test]
    fn test_from_config_disabled() {
        let cfg = PredictorConfig { enabled: false, ..PredictorConfig::default() };
        let predictor = Predictor::from_config(&cfg);
        assert!(predictor.model_path().is_none());
        assert!(!predictor.predict(&full_record()).available);
    }

    #[test]
    fn test_incomplete_record_is_invalid_input() {
        let record = SoilRecord { rainfall: None, ..full_record() };
        let result = in_memory().predict(&record);
        assert!(!result.available);
        assert_eq!(
            result.message.as_deref(),
            Some("Invalid input for ML model: Missing required features in input: rainfall")
        );
    }

    #[test]
    fn test_shape_mismatch_is_prediction_error() {
        let transform = FeatureTransform { numeric: vec![], categorical: vec![] };
        let classifier = SoftmaxClassifier {
            classes: vec!["DAP".into()],
            weights: vec![vec![1.0]],
            intercepts: vec![0.0],
        };
        let predictor = Predictor::with_artifacts(transform, Box::new(classifier));
        let result = predictor.predict(&full_record());
        assert!(!result.available);
        assert!(result
            .message
            .as_deref()
            .unwrap()
            .starts_with("Error during ML prediction: X has 0 features"));
    }

    #[test]
    fn test_ragged_in_memory_model_is_rejected() {
        let transform = FeatureTransform {
            numeric: vec![NumericScaler { name: "nitrogen".into(), mean: 100.0, scale: 50.0 }],
            categorical: vec![CategoricalEncoder {
                name: "crop".into(),
                categories: vec!["Rice".into()],
            }],
        };
        let classifier = SoftmaxClassifier {
            classes: vec!["DAP".into(), "Urea".into()],
            weights: vec![vec![0.0, 0.0], vec![1.0]],
            intercepts: vec![0.0, 0.0],
        };
        let predictor = Predictor::with_artifacts(transform, Box::new(classifier));
        assert!(!predictor.is_loaded());

        let result = predictor.predict(&full_record());
        assert!(!result.available);
        assert!(result.predicted_fertilizer.is_none());
        assert!(result.probabilities.is_none());
        assert_eq!(
            result.message.as_deref(),
            Some(
                "Could not load ML artifacts (invalid artifact: softmax weight rows must be \
                 non-empty and equally wide). Only rule-based recommendations will be used."
            )
        );
    }
}
