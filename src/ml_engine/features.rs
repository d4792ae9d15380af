//! Model input features.
//!
//! The classifier was trained on eight numeric soil/climate readings plus the
//! soil type and crop name. Unlike the scorer and the rules, the model cannot
//! work around a missing reading, so every feature is required here.

use super::PredictorError;
use crate::types::SoilRecord;

/// Every feature the model consumes, in training-column order.
pub const INPUT_FEATURES: [&str; 10] = [
    "pH",
    "organic_carbon",
    "nitrogen",
    "phosphorus",
    "potassium",
    "soil_type",
    "rainfall",
    "temperature",
    "ec",
    "crop",
];

/// Numeric block, in the order the transform emits it.
pub const NUMERIC_FEATURES: [&str; 8] = [
    "pH",
    "organic_carbon",
    "nitrogen",
    "phosphorus",
    "potassium",
    "rainfall",
    "temperature",
    "ec",
];

/// Categorical block, emitted after the numeric block.
pub const CATEGORICAL_FEATURES: [&str; 2] = ["soil_type", "crop"];

/// A fully populated model input.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    /// Values in [`NUMERIC_FEATURES`] order
    pub numeric: [f64; 8],
    pub soil_type: String,
    pub crop: String,
}

impl FeatureRow {
    /// Extract the model inputs, listing every missing feature at once.
    pub fn from_record(record: &SoilRecord) -> Result<Self, PredictorError> {
        let (
            Some(ph),
            Some(oc),
            Some(n),
            Some(p),
            Some(k),
            Some(soil_type),
            Some(rainfall),
            Some(temperature),
            Some(ec),
            Some(crop),
        ) = (
            record.ph,
            record.organic_carbon,
            record.nitrogen,
            record.phosphorus,
            record.potassium,
            record.soil_type,
            record.rainfall,
            record.temperature,
            record.electrical_conductivity,
            record.crop.as_deref(),
        )
        else {
            return Err(PredictorError::MissingFeatures(missing_features(record)));
        };

        Ok(Self {
            numeric: [ph, oc, n, p, k, rainfall, temperature, ec],
            soil_type: soil_type.as_str().to_string(),
            crop: crop.trim().to_string(),
        })
    }

    pub fn numeric_value(&self, name: &str) -> Option<f64> {
        NUMERIC_FEATURES
            .iter()
            .position(|f| *f == name)
            .map(|i| self.numeric[i])
    }

    pub fn categorical_value(&self, name: &str) -> Option<&str> {
        match name {
            "soil_type" => Some(&self.soil_type),
            "crop" => Some(&self.crop),
            _ => None,
        }
    }
}

fn missing_features(record: &SoilRecord) -> Vec<String> {
    let provided = [
        record.ph.is_some(),
        record.organic_carbon.is_some(),
        record.nitrogen.is_some(),
        record.phosphorus.is_some(),
        record.potassium.is_some(),
        record.soil_type.is_some(),
        record.rainfall.is_some(),
        record.temperature.is_some(),
        record.electrical_conductivity.is_some(),
        record.crop.is_some(),
    ];
    INPUT_FEATURES
        .iter()
        .zip(provided)
        .filter(|(_, ok)| !ok)
        .map(|(name, _)| name.to_string())
        .collect()
}
