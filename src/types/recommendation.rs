//! Result types produced by the scorer, the rule engine, the predictor and
//! the arbitrator.
//!
//! All of these are built fresh per request and never shared.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{HealthCategory, NpkStatus, PhBand, SoilRecord, Source};

// ============================================================================
// Soil health
// ============================================================================

/// Individual soil factor that contributes one sub-score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SoilFactor {
    #[serde(rename = "pH")]
    Ph,
    #[serde(rename = "organic_carbon")]
    OrganicCarbon,
    #[serde(rename = "nitrogen")]
    Nitrogen,
    #[serde(rename = "phosphorus")]
    Phosphorus,
    #[serde(rename = "potassium")]
    Potassium,
    #[serde(rename = "ec")]
    Ec,
}

impl SoilFactor {
    pub const ALL: [SoilFactor; 6] = [
        SoilFactor::Ph,
        SoilFactor::OrganicCarbon,
        SoilFactor::Nitrogen,
        SoilFactor::Phosphorus,
        SoilFactor::Potassium,
        SoilFactor::Ec,
    ];
}

impl std::fmt::Display for SoilFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SoilFactor::Ph => write!(f, "pH"),
            SoilFactor::OrganicCarbon => write!(f, "organic_carbon"),
            SoilFactor::Nitrogen => write!(f, "nitrogen"),
            SoilFactor::Phosphorus => write!(f, "phosphorus"),
            SoilFactor::Potassium => write!(f, "potassium"),
            SoilFactor::Ec => write!(f, "ec"),
        }
    }
}

/// Level label attached to a factor score. Which labels appear depends on
/// the factor (pH uses the acidity scale, EC the salinity scale, and so on).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FactorLevel {
    Unknown,
    StronglyAcidic,
    ModeratelyAcidic,
    NearNeutral,
    SlightlyAlkaline,
    StronglyAlkaline,
    Low,
    Medium,
    Good,
    VeryHigh,
    Adequate,
    High,
    NonSaline,
    SlightlySaline,
    Saline,
}

impl std::fmt::Display for FactorLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FactorLevel::Unknown => "unknown",
            FactorLevel::StronglyAcidic => "strongly acidic",
            FactorLevel::ModeratelyAcidic => "moderately acidic",
            FactorLevel::NearNeutral => "near neutral",
            FactorLevel::SlightlyAlkaline => "slightly alkaline",
            FactorLevel::StronglyAlkaline => "strongly alkaline",
            FactorLevel::Low => "low",
            FactorLevel::Medium => "medium",
            FactorLevel::Good => "good",
            FactorLevel::VeryHigh => "very high",
            FactorLevel::Adequate => "adequate",
            FactorLevel::High => "high",
            FactorLevel::NonSaline => "non-saline",
            FactorLevel::SlightlySaline => "slightly saline",
            FactorLevel::Saline => "saline",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    /// Sub-score in [0, 1]
    pub score: f64,
    pub level: FactorLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilHealthResult {
    /// Unweighted mean of the six factor scores, in [0, 1]
    pub index: f64,
    pub category: HealthCategory,
    pub factor_scores: BTreeMap<SoilFactor, FactorScore>,
}

// ============================================================================
// Fertilizers
// ============================================================================

/// High-level fertilizer family.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FertilizerType {
    Nitrogenous,
    Phosphatic,
    Potassic,
    #[serde(rename = "NPK_Complex")]
    NpkComplex,
    #[serde(rename = "Organic_Manure")]
    OrganicManure,
    Biofertilizer,
}

impl std::fmt::Display for FertilizerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FertilizerType::Nitrogenous => write!(f, "Nitrogenous"),
            FertilizerType::Phosphatic => write!(f, "Phosphatic"),
            FertilizerType::Potassic => write!(f, "Potassic"),
            FertilizerType::NpkComplex => write!(f, "NPK_Complex"),
            FertilizerType::OrganicManure => write!(f, "Organic_Manure"),
            FertilizerType::Biofertilizer => write!(f, "Biofertilizer"),
        }
    }
}

/// Nutrient percentages of a fertilizer product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutrientProfile {
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "P")]
    pub p: f64,
    #[serde(rename = "K")]
    pub k: f64,
    /// Sulphur, only listed for products that carry it
    #[serde(rename = "S", default, skip_serializing_if = "Option::is_none")]
    pub s: Option<f64>,
    #[serde(rename = "type")]
    pub fertilizer_type: FertilizerType,
}

/// A fertilizer proposed by the rule engine.
///
/// Several rules may name the same fertilizer. They collapse into one
/// candidate carrying the strongest (smallest) priority and every reason in
/// the order the rules fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerCandidate {
    pub name: String,
    /// 1 = most urgent, larger = weaker
    pub priority: u8,
    pub reasons: Vec<String>,
    /// `None` when the name has no entry in the nutrient-profile table
    pub nutrients: Option<NutrientProfile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleEngineResult {
    pub npk_status: NpkStatus,
    pub ph_band: PhBand,
    /// Sorted ascending by priority, ties in firing order
    pub primary_recommendations: Vec<FertilizerCandidate>,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
}

impl RuleEngineResult {
    /// Highest-priority candidate, if any rule fired.
    pub fn top(&self) -> Option<&FertilizerCandidate> {
        self.primary_recommendations.first()
    }

    /// Candidate with exactly this name (case-sensitive).
    pub fn candidate(&self, name: &str) -> Option<&FertilizerCandidate> {
        self.primary_recommendations.iter().find(|c| c.name == name)
    }
}

// ============================================================================
// Predictor
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictorResult {
    pub available: bool,
    pub predicted_fertilizer: Option<String>,
    /// Full class distribution when the model exposes one
    pub probabilities: Option<BTreeMap<String, f64>>,
    /// Diagnostic text, set whenever `available` is false
    pub message: Option<String>,
}

impl PredictorResult {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            available: false,
            predicted_fertilizer: None,
            probabilities: None,
            message: Some(message.into()),
        }
    }

    pub fn prediction(label: String, probabilities: Option<BTreeMap<String, f64>>) -> Self {
        Self {
            available: true,
            predicted_fertilizer: Some(label),
            probabilities,
            message: None,
        }
    }

    /// Predicted label when the prediction is usable (available and non-empty).
    pub fn usable_label(&self) -> Option<&str> {
        if !self.available {
            return None;
        }
        self.predicted_fertilizer
            .as_deref()
            .filter(|label| !label.is_empty())
    }

    /// Class probabilities ordered from most to least likely; ties by name.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .probabilities
            .iter()
            .flat_map(|probs| probs.iter().map(|(k, v)| (k.as_str(), *v)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

// ============================================================================
// Final decision
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalRecommendation {
    /// `None` only when neither the predictor nor the rules produced anything
    pub name: Option<String>,
    pub source: Source,
    /// Explanation lines joined with newlines; line order is significant
    pub rationale: String,
}

impl FinalRecommendation {
    pub fn rationale_lines(&self) -> Vec<&str> {
        self.rationale.lines().collect()
    }
}

/// Everything computed for one request, for callers that want to render the
/// intermediate results alongside the decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub input: SoilRecord,
    pub soil_health: SoilHealthResult,
    pub rules: RuleEngineResult,
    pub ml: PredictorResult,
    pub final_choice: FinalRecommendation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_result_shape() {
        let result = PredictorResult::unavailable("model missing");
        assert!(!result.available);
        assert_eq!(result.predicted_fertilizer, None);
        assert_eq!(result.probabilities, None);
        assert_eq!(result.message.as_deref(), Some("model missing"));
        assert_eq!(result.usable_label(), None);
    }

    #[test]
    fn test_empty_label_is_not_usable() {
        let result = PredictorResult::prediction(String::new(), None);
        assert!(result.available);
        assert_eq!(result.usable_label(), None);
    }

    #[test]
    fn test_ranked_orders_by_probability_then_name() {
        let mut probs = BTreeMap::new();
        probs.insert("Urea".to_string(), 0.2);
        probs.insert("DAP".to_string(), 0.6);
        probs.insert("MOP".to_string(), 0.2);
        let result = PredictorResult::prediction("DAP".to_string(), Some(probs));
        let ranked = result.ranked();
        assert_eq!(ranked, vec![("DAP", 0.6), ("MOP", 0.2), ("Urea", 0.2)]);
    }

    #[test]
    fn test_nutrient_profile_omits_missing_sulphur() {
        let profile = NutrientProfile {
            n: 46.0,
            p: 0.0,
            k: 0.0,
            s: None,
            fertilizer_type: FertilizerType::Nitrogenous,
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert_eq!(json, r#"{"N":46.0,"P":0.0,"K":0.0,"type":"Nitrogenous"}"#);
    }

    #[test]
    fn test_factor_keys_serialize_in_declaration_order() {
        let mut scores = BTreeMap::new();
        for factor in SoilFactor::ALL.iter().rev() {
            scores.insert(
                *factor,
                FactorScore {
                    score: 0.5,
                    level: FactorLevel::Unknown,
                    message: String::new(),
                },
            );
        }
        let keys: Vec<String> = scores.keys().map(ToString::to_string).collect();
        assert_eq!(
            keys,
            vec!["pH", "organic_carbon", "nitrogen", "phosphorus", "potassium", "ec"]
        );
    }
}
