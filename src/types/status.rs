//! Discrete labels derived from continuous soil readings.

use serde::{Deserialize, Serialize};

/// N, P or K availability class.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum NutrientStatus {
    #[default]
    Unknown,
    Low,
    Adequate,
    High,
}

impl std::fmt::Display for NutrientStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NutrientStatus::Unknown => write!(f, "unknown"),
            NutrientStatus::Low => write!(f, "low"),
            NutrientStatus::Adequate => write!(f, "adequate"),
            NutrientStatus::High => write!(f, "high"),
        }
    }
}

/// Status triple consumed by the rule groups.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NpkStatus {
    #[serde(rename = "N")]
    pub n: NutrientStatus,
    #[serde(rename = "P")]
    pub p: NutrientStatus,
    #[serde(rename = "K")]
    pub k: NutrientStatus,
}

/// Soil reaction band. Each band includes its upper edge, so a reading sitting
/// exactly on a boundary falls into the lower band.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PhBand {
    #[default]
    Unknown,
    StronglyAcidic,
    ModeratelyAcidic,
    Neutral,
    SlightlyAlkaline,
    StronglyAlkaline,
}

impl PhBand {
    pub fn is_acidic(&self) -> bool {
        matches!(self, PhBand::StronglyAcidic | PhBand::ModeratelyAcidic)
    }

    pub fn is_alkaline(&self) -> bool {
        matches!(self, PhBand::SlightlyAlkaline | PhBand::StronglyAlkaline)
    }
}

impl std::fmt::Display for PhBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhBand::Unknown => write!(f, "unknown"),
            PhBand::StronglyAcidic => write!(f, "strongly_acidic"),
            PhBand::ModeratelyAcidic => write!(f, "moderately_acidic"),
            PhBand::Neutral => write!(f, "neutral"),
            PhBand::SlightlyAlkaline => write!(f, "slightly_alkaline"),
            PhBand::StronglyAlkaline => write!(f, "strongly_alkaline"),
        }
    }
}

/// Soil-health category derived from the index.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HealthCategory {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl std::fmt::Display for HealthCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthCategory::Excellent => write!(f, "Excellent"),
            HealthCategory::Good => write!(f, "Good"),
            HealthCategory::Moderate => write!(f, "Moderate"),
            HealthCategory::Poor => write!(f, "Poor"),
        }
    }
}

/// Provenance of the final recommendation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Source {
    /// Model prediction confirmed by a rule candidate of the same name
    #[serde(rename = "ml+rules")]
    MlAndRules,
    #[serde(rename = "ml_only")]
    MlOnly,
    #[serde(rename = "rules_only")]
    RulesOnly,
    /// Neither side produced anything
    #[serde(rename = "none")]
    None,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::MlAndRules => write!(f, "ml+rules"),
            Source::MlOnly => write!(f, "ml_only"),
            Source::RulesOnly => write!(f, "rules_only"),
            Source::None => write!(f, "none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_npk_status_serializes_with_letter_keys() {
        let status = NpkStatus {
            n: NutrientStatus::Low,
            p: NutrientStatus::Low,
            k: NutrientStatus::Adequate,
        };
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, r#"{"N":"low","P":"low","K":"adequate"}"#);
    }

    #[test]
    fn test_source_wire_names() {
        assert_eq!(serde_json::to_string(&Source::MlAndRules).unwrap(), "\"ml+rules\"");
        assert_eq!(serde_json::to_string(&Source::None).unwrap(), "\"none\"");
        assert_eq!(Source::RulesOnly.to_string(), "rules_only");
    }

    #[test]
    fn test_ph_band_groups() {
        assert!(PhBand::StronglyAcidic.is_acidic());
        assert!(PhBand::ModeratelyAcidic.is_acidic());
        assert!(!PhBand::Neutral.is_acidic());
        assert!(!PhBand::Neutral.is_alkaline());
        assert!(PhBand::StronglyAlkaline.is_alkaline());
        assert!(!PhBand::Unknown.is_acidic() && !PhBand::Unknown.is_alkaline());
        assert_eq!(
            serde_json::to_string(&PhBand::ModeratelyAcidic).unwrap(),
            "\"moderately_acidic\""
        );
    }
}
