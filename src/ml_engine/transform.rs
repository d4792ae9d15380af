//! Feature transform: standard scaling of the numeric block followed by
//! one-hot encoding of the categorical block.
//!
//! Fitted offline and stored as JSON:
//!
//! ```json
//! {
//!   "numeric":     [{ "name": "pH", "mean": 6.8, "scale": 0.9 }, ...],
//!   "categorical": [{ "name": "soil_type", "categories": ["Clay", "Loam"] }, ...]
//! }
//! ```

use serde::{Deserialize, Serialize};

use super::features::FeatureRow;
use super::PredictorError;

/// `(x - mean) / scale` for one numeric feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericScaler {
    pub name: String,
    pub mean: f64,
    pub scale: f64,
}

impl NumericScaler {
    pub fn apply(&self, value: f64) -> f64 {
        // Constant training columns have zero variance
        let scale = if self.scale == 0.0 { 1.0 } else { self.scale };
        (value - self.mean) / scale
    }
}

/// One-hot encoder for one categorical feature. Unseen categories encode as
/// all zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalEncoder {
    pub name: String,
    pub categories: Vec<String>,
}

impl CategoricalEncoder {
    pub fn encode_into(&self, value: &str, out: &mut Vec<f64>) {
        out.extend(
            self.categories
                .iter()
                .map(|c| if c == value { 1.0 } else { 0.0 }),
        );
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTransform {
    pub numeric: Vec<NumericScaler>,
    pub categorical: Vec<CategoricalEncoder>,
}

impl FeatureTransform {
    /// Width of the transformed vector.
    pub fn output_dim(&self) -> usize {
        self.numeric.len() + self.categorical.iter().map(|c| c.categories.len()).sum::<usize>()
    }

    pub fn transform(&self, row: &FeatureRow) -> Result<Vec<f64>, PredictorError> {
        let mut out = Vec::with_capacity(self.output_dim());

        for scaler in &self.numeric {
            let value = row.numeric_value(&scaler.name).ok_or_else(|| {
                PredictorError::Transform(format!(
                    "transform references unknown numeric feature '{}'",
                    scaler.name
                ))
            })?;
            if !value.is_finite() {
                return Err(PredictorError::Transform(format!(
                    "Input '{}' contains NaN or infinity",
                    scaler.name
                )));
            }
            if !scaler.mean.is_finite() || !scaler.scale.is_finite() {
                return Err(PredictorError::Transform(format!(
                    "scaler for '{}' has non-finite parameters",
                    scaler.name
                )));
            }
            out.push(scaler.apply(value));
        }

        for encoder in &self.categorical {
            let value = row.categorical_value(&encoder.name).ok_or_else(|| {
                PredictorError::Transform(format!(
                    "transform references unknown categorical feature '{}'",
                    encoder.name
                ))
            })?;
            encoder.encode_into(value, &mut out);
        }

        Ok(out)
    }
}
