//! Classifier implementations behind the `FertilizerClassifier` trait.
//!
//! Two model families are supported:
//! - `softmax`: multinomial linear model, exposes class probabilities
//! - `nearest_centroid`: label only, no probabilities

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::PredictorError;

/// Narrow interface over a trained fertilizer classifier.
pub trait FertilizerClassifier: Send + Sync {
    /// Width of the feature vector the model expects.
    fn input_dim(&self) -> usize;

    fn classes(&self) -> &[String];

    /// Reject malformed parameters before the model is used.
    fn validate(&self) -> Result<(), PredictorError>;

    /// Most likely fertilizer label.
    fn predict(&self, features: &[f64]) -> Result<String, PredictorError>;

    /// Probability for every class, or `None` when the model has no
    /// probabilistic output.
    fn predict_with_probabilities(
        &self,
        features: &[f64],
    ) -> Result<Option<BTreeMap<String, f64>>, PredictorError>;
}

fn check_shape(expected: usize, features: &[f64]) -> Result<(), PredictorError> {
    if features.len() != expected {
        return Err(PredictorError::ShapeMismatch {
            expected,
            got: features.len(),
        });
    }
    Ok(())
}

/// Index of the first maximum.
fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

// ============================================================================
// Softmax (multinomial logistic regression)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftmaxClassifier {
    pub classes: Vec<String>,
    /// One row per class, each `input_dim` wide
    pub weights: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl SoftmaxClassifier {
    fn logits(&self, features: &[f64]) -> Result<Vec<f64>, PredictorError> {
        check_shape(self.input_dim(), features)?;
        Ok(self
            .weights
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect())
    }

    fn softmax(logits: &[f64]) -> Vec<f64> {
        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = logits.iter().map(|z| (z - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        exps.iter().map(|e| e / total).collect()
    }
}

impl FertilizerClassifier for SoftmaxClassifier {
    fn input_dim(&self) -> usize {
        self.weights.first().map_or(0, Vec::len)
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn validate(&self) -> Result<(), PredictorError> {
        if self.classes.is_empty() {
            return Err(PredictorError::InvalidArtifact("softmax model has no classes".into()));
        }
        if self.weights.len() != self.classes.len() || self.intercepts.len() != self.classes.len() {
            return Err(PredictorError::InvalidArtifact(format!(
                "softmax model has {} classes but {} weight rows and {} intercepts",
                self.classes.len(),
                self.weights.len(),
                self.intercepts.len()
            )));
        }
        let dim = self.input_dim();
        if dim == 0 || self.weights.iter().any(|row| row.len() != dim) {
            return Err(PredictorError::InvalidArtifact(
                "softmax weight rows must be non-empty and equally wide".into(),
            ));
        }
        let all_finite = self
            .weights
            .iter()
            .flatten()
            .chain(&self.intercepts)
            .all(|w| w.is_finite());
        if !all_finite {
            return Err(PredictorError::InvalidArtifact(
                "softmax model contains non-finite parameters".into(),
            ));
        }
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> Result<String, PredictorError> {
        let logits = self.logits(features)?;
        argmax(&logits)
            .and_then(|i| self.classes.get(i).cloned())
            .ok_or_else(|| PredictorError::Inference("model produced no scores".into()))
    }

    fn predict_with_probabilities(
        &self,
        features: &[f64],
    ) -> Result<Option<BTreeMap<String, f64>>, PredictorError> {
        let probs = Self::softmax(&self.logits(features)?);
        if probs.iter().any(|p| !p.is_finite()) {
            return Err(PredictorError::Inference(
                "probabilities are not finite".into(),
            ));
        }
        Ok(Some(self.classes.iter().cloned().zip(probs).collect()))
    }
}

// ============================================================================
// Nearest centroid
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestCentroidClassifier {
    pub classes: Vec<String>,
    pub centroids: Vec<Vec<f64>>,
}

impl FertilizerClassifier for NearestCentroidClassifier {
    fn input_dim(&self) -> usize {
        self.centroids.first().map_or(0, Vec::len)
    }

    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn validate(&self) -> Result<(), PredictorError> {
        if self.classes.is_empty() || self.centroids.len() != self.classes.len() {
            return Err(PredictorError::InvalidArtifact(format!(
                "nearest-centroid model has {} classes and {} centroids",
                self.classes.len(),
                self.centroids.len()
            )));
        }
        let dim = self.input_dim();
        if dim == 0 || self.centroids.iter().any(|c| c.len() != dim) {
            return Err(PredictorError::InvalidArtifact(
                "centroids must be non-empty and equally wide".into(),
            ));
        }
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> Result<String, PredictorError> {
        check_shape(self.input_dim(), features)?;
        let neg_dist: Vec<f64> = self
            .centroids
            .iter()
            .map(|c| -c.iter().zip(features).map(|(a, b)| (a - b).powi(2)).sum::<f64>())
            .collect();
        argmax(&neg_dist)
            .and_then(|i| self.classes.get(i).cloned())
            .ok_or_else(|| PredictorError::Inference("no centroid within reach".into()))
    }

    fn predict_with_probabilities(
        &self,
        features: &[f64],
    ) -> Result<Option<BTreeMap<String, f64>>, PredictorError> {
        check_shape(self.input_dim(), features)?;
        Ok(None)
    }
}

// ============================================================================
// Serialized form
// ============================================================================

/// On-disk classifier, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    Softmax(SoftmaxClassifier),
    NearestCentroid(NearestCentroidClassifier),
}

impl ClassifierArtifact {
    /// Validate and box the concrete model behind the trait.
    pub fn into_classifier(self) -> Result<Box<dyn FertilizerClassifier>, PredictorError> {
        match self {
            ClassifierArtifact::Softmax(m) => {
                m.validate()?;
                Ok(Box::new(m))
            }
            ClassifierArtifact::NearestCentroid(m) => {
                m.validate()?;
                Ok(Box::new(m))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn softmax() -> SoftmaxClassifier {
        SoftmaxClassifier {
            classes: vec!["DAP".into(), "Urea".into()],
            weights: vec![vec![1.0, 0.0], vec![0.0, 1.0]],
            intercepts: vec![0.0, 0.0],
        }
    }

    #[test]
    fn test_softmax_predicts_argmax() {
        let m = softmax();
        assert_eq!(m.predict(&[2.0, 0.0]).unwrap(), "DAP");
        assert_eq!(m.predict(&[0.0, 2.0]).unwrap(), "Urea");
    }

    #[test]
    fn test_softmax_probabilities_sum_to_one() {
        let probs = softmax()
            .predict_with_probabilities(&[1.0, 0.0])
            .unwrap()
            .unwrap();
        assert_eq!(probs.len(), 2);
        let total: f64 = probs.values().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(probs["DAP"] > probs["Urea"]);
    }

    #[test]
    fn test_tie_goes_to_first_class() {
        assert_eq!(softmax().predict(&[1.0, 1.0]).unwrap(), "DAP");
    }

    #[test]
    fn test_shape_mismatch() {
        let err = softmax().predict(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, PredictorError::ShapeMismatch { expected: 2, got: 3 }));
    }

    #[test]
    fn test_nearest_centroid_has_no_probabilities() {
        let m = NearestCentroidClassifier {
            classes: vec!["FYM".into(), "MOP".into()],
            centroids: vec![vec![0.0, 0.0], vec![5.0, 5.0]],
        };
        assert_eq!(m.predict(&[4.0, 4.5]).unwrap(), "MOP");
        assert_eq!(m.predict_with_probabilities(&[4.0, 4.5]).unwrap(), None);
    }

    #[test]
    fn test_tagged_json() {
        let json = r#"{"kind": "nearest_centroid", "classes": ["FYM"], "centroids": [[0.0]]}"#;
        let artifact: ClassifierArtifact = serde_json::from_str(json).unwrap();
        let model = artifact.into_classifier().unwrap();
        assert_eq!(model.input_dim(), 1);
        assert_eq!(model.classes(), ["FYM".to_string()]);
    }

    #[test]
    fn test_inconsistent_softmax_is_rejected() {
        let mut m = softmax();
        m.intercepts.pop();
        let err = ClassifierArtifact::Softmax(m).into_classifier().err().unwrap();
        assert!(matches!(err, PredictorError::InvalidArtifact(_)));
    }
}
