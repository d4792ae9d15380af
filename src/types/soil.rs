//! Soil test input record and single-record normalisation.

use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

/// Soil texture class. Closed set; anything else is rejected at decode time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SoilType {
    #[serde(alias = "loam")]
    Loam,
    #[serde(alias = "clay")]
    Clay,
    #[serde(alias = "sandy")]
    Sandy,
    #[serde(rename = "Sandy loam", alias = "sandy loam", alias = "sandy_loam")]
    SandyLoam,
    #[serde(rename = "Silty clay", alias = "silty clay", alias = "silty_clay")]
    SiltyClay,
}

impl SoilType {
    pub const ALL: [SoilType; 5] = [
        SoilType::Loam,
        SoilType::Clay,
        SoilType::Sandy,
        SoilType::SandyLoam,
        SoilType::SiltyClay,
    ];

    /// Label used in training data and in the one-hot encoder categories.
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Loam => "Loam",
            SoilType::Clay => "Clay",
            SoilType::Sandy => "Sandy",
            SoilType::SandyLoam => "Sandy loam",
            SoilType::SiltyClay => "Silty clay",
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One soil test plus the target crop.
///
/// Every field is optional. Scoring treats a missing value as "unknown" and
/// substitutes a neutral default instead of failing. Range clamping is the
/// caller's job; the core only guarantees null-safety.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoilRecord {
    /// Soil reaction (practically 3.5-10)
    #[serde(rename = "pH", alias = "ph", default)]
    pub ph: Option<f64>,

    /// Organic carbon (%)
    #[serde(default)]
    pub organic_carbon: Option<f64>,

    /// Available N (kg/ha-equivalent)
    #[serde(default)]
    pub nitrogen: Option<f64>,

    /// Available P (kg/ha-equivalent)
    #[serde(default)]
    pub phosphorus: Option<f64>,

    /// Available K (kg/ha-equivalent)
    #[serde(default)]
    pub potassium: Option<f64>,

    #[serde(default)]
    pub soil_type: Option<SoilType>,

    /// Seasonal rainfall (mm)
    #[serde(default)]
    pub rainfall: Option<f64>,

    /// Mean temperature (°C)
    #[serde(default)]
    pub temperature: Option<f64>,

    /// Electrical conductivity (dS/m), a salinity proxy
    #[serde(rename = "ec", alias = "electrical_conductivity", default)]
    pub electrical_conductivity: Option<f64>,

    /// Free-text crop name, matched case-insensitively against crop keywords
    #[serde(default)]
    pub crop: Option<String>,
}

impl SoilRecord {
    /// Decode a record from JSON.
    ///
    /// Accepts a single object or an array holding exactly one object. Any
    /// other shape is a caller bug and fails fast.
    pub fn from_json_value(value: &serde_json::Value) -> Result<Self, AdvisorError> {
        match value {
            serde_json::Value::Object(_) => Ok(serde_json::from_value(value.clone())?),
            serde_json::Value::Array(rows) => match rows.as_slice() {
                [row @ serde_json::Value::Object(_)] => Self::from_json_value(row),
                [other] => Err(AdvisorError::InputShape(format!(
                    "expected the single row to be a JSON object, got {}",
                    json_kind(other)
                ))),
                _ => Err(AdvisorError::InputShape(format!(
                    "expected exactly one soil record, got {} rows",
                    rows.len()
                ))),
            },
            other => Err(AdvisorError::InputShape(format!(
                "expected a JSON object or a single-row array, got {}",
                json_kind(other)
            ))),
        }
    }

    /// Crop name as the rule engine expects it: trimmed, empty when absent.
    pub fn crop_name(&self) -> &str {
        self.crop.as_deref().map_or("", str::trim)
    }
}

/// Pick the only record out of a batch.
pub fn single_record(rows: &[SoilRecord]) -> Result<&SoilRecord, AdvisorError> {
    match rows {
        [row] => Ok(row),
        _ => Err(AdvisorError::InputShape(format!(
            "expected exactly one soil record, got {} rows",
            rows.len()
        ))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_object_with_dataset_field_names() {
        let value = json!({
            "pH": 6.2,
            "organic_carbon": 0.6,
            "nitrogen": 40,
            "soil_type": "Sandy loam",
            "ec": 0.4,
            "crop": "Rice"
        });
        let record = SoilRecord::from_json_value(&value).unwrap();
        assert_eq!(record.ph, Some(6.2));
        assert_eq!(record.nitrogen, Some(40.0));
        assert_eq!(record.soil_type, Some(SoilType::SandyLoam));
        assert_eq!(record.electrical_conductivity, Some(0.4));
        assert_eq!(record.phosphorus, None);
        assert_eq!(record.crop_name(), "Rice");
    }

    #[test]
    fn test_null_fields_are_unknown() {
        let value = json!({ "pH": null, "crop": null });
        let record = SoilRecord::from_json_value(&value).unwrap();
        assert_eq!(record, SoilRecord::default());
        assert_eq!(record.crop_name(), "");
    }

    #[test]
    fn test_single_row_array_is_accepted() {
        let value = json!([{ "pH": 7.0 }]);
        let record = SoilRecord::from_json_value(&value).unwrap();
        assert_eq!(record.ph, Some(7.0));
    }

    #[test]
    fn test_multi_row_array_is_shape_error() {
        let value = json!([{ "pH": 7.0 }, { "pH": 6.0 }]);
        let err = SoilRecord::from_json_value(&value).unwrap_err();
        assert!(matches!(err, AdvisorError::InputShape(_)));
        assert!(err.to_string().contains("got 2 rows"));
    }

    #[test]
    fn test_scalar_is_shape_error() {
        let err = SoilRecord::from_json_value(&json!(6.5)).unwrap_err();
        assert!(matches!(err, AdvisorError::InputShape(_)));
    }

    #[test]
    fn test_unknown_soil_type_is_rejected() {
        let err = SoilRecord::from_json_value(&json!({ "soil_type": "Peat" })).unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidRecord(_)));
    }

    #[test]
    fn test_single_record_slice() {
        let rows = vec![SoilRecord::default()];
        assert!(single_record(&rows).is_ok());
        assert!(single_record(&[]).is_err());
        let two = vec![SoilRecord::default(), SoilRecord::default()];
        assert!(matches!(
            single_record(&two),
            Err(AdvisorError::InputShape(_))
        ));
    }

    #[test]
    fn test_crop_name_is_trimmed() {
        let record = SoilRecord {
            crop: Some("  Sugarcane \n".to_string()),
            ..Default::default()
        };
        assert_eq!(record.crop_name(), "Sugarcane");
    }
}
