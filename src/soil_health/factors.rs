//! Per-factor scorers.
//!
//! Each scorer maps one optional reading to a sub-score in [0, 1], a level
//! label and a one-sentence explanation. A missing reading scores
//! [`UNKNOWN_FACTOR_SCORE`] with level `unknown`.

use crate::config::defaults::UNKNOWN_FACTOR_SCORE;
use crate::config::{NutrientConfig, OrganicCarbonConfig, PhBandConfig, SalinityConfig};
use crate::types::{FactorLevel, FactorScore, NutrientStatus, PhBand};

fn factor(score: f64, level: FactorLevel, message: String) -> FactorScore {
    FactorScore { score, level, message }
}

fn unknown(message: &str) -> FactorScore {
    factor(UNKNOWN_FACTOR_SCORE, FactorLevel::Unknown, message.to_string())
}

// ============================================================================
// Soil reaction
// ============================================================================

pub fn score_ph(ph: Option<f64>, bands: &PhBandConfig) -> FactorScore {
    let Some(value) = ph else {
        return unknown("pH not provided; assuming medium soil reaction.");
    };

    match bands.band(ph) {
        PhBand::StronglyAcidic => factor(
            0.3,
            FactorLevel::StronglyAcidic,
            format!(
                "Soil pH ≈ {value:.1} (strongly acidic). Many crops struggle here; \
                 liming is usually recommended to raise pH closer to neutral."
            ),
        ),
        PhBand::ModeratelyAcidic => factor(
            0.7,
            FactorLevel::ModeratelyAcidic,
            format!(
                "Soil pH ≈ {value:.1} (moderately acidic). Suitable for acid-loving crops \
                 but you may still consider mild liming depending on crop."
            ),
        ),
        PhBand::Neutral => factor(
            1.0,
            FactorLevel::NearNeutral,
            format!(
                "Soil pH ≈ {value:.1} (near neutral). This is ideal for most field crops \
                 and maximizes nutrient availability."
            ),
        ),
        PhBand::SlightlyAlkaline => factor(
            0.7,
            FactorLevel::SlightlyAlkaline,
            format!(
                "Soil pH ≈ {value:.1} (slightly alkaline). Usually acceptable but some \
                 micronutrients (Fe, Zn) may become less available."
            ),
        ),
        // NaN also lands here, matching a comparison chain that never succeeds
        PhBand::StronglyAlkaline | PhBand::Unknown => factor(
            0.3,
            FactorLevel::StronglyAlkaline,
            format!(
                "Soil pH ≈ {value:.1} (strongly alkaline). High pH can lock nutrients; \
                 consider acid-forming fertilizers or organic matter to buffer pH."
            ),
        ),
    }
}

// ============================================================================
// Organic carbon
// ============================================================================

pub fn score_organic_carbon(oc: Option<f64>, bands: &OrganicCarbonConfig) -> FactorScore {
    let Some(oc) = oc else {
        return unknown("Organic carbon not provided; assuming moderate status.");
    };

    if oc < bands.low_below {
        factor(
            0.4,
            FactorLevel::Low,
            format!(
                "Organic carbon ≈ {oc:.2}% (low). Soil organic matter is poor; \
                 add FYM, compost, or green manures to improve structure and CEC."
            ),
        )
    } else if oc < bands.medium_below {
        factor(
            0.7,
            FactorLevel::Medium,
            format!(
                "Organic carbon ≈ {oc:.2}% (medium). Some organic matter present, \
                 but regular additions of organics will still help."
            ),
        )
    } else if oc < bands.good_below {
        factor(
            1.0,
            FactorLevel::Good,
            format!(
                "Organic carbon ≈ {oc:.2}% (good). Soil has healthy organic matter; \
                 this supports microbial life and nutrient buffering."
            ),
        )
    } else {
        factor(
            0.9,
            FactorLevel::VeryHigh,
            format!(
                "Organic carbon ≈ {oc:.2}% (very high). Excellent organic matter; \
                 watch waterlogging and N immobilization for some crops."
            ),
        )
    }
}

// ============================================================================
// Macronutrients
// ============================================================================

pub fn score_nitrogen(n: Option<f64>, cuts: &NutrientConfig) -> FactorScore {
    let Some(value) = n else {
        return unknown("Available nitrogen not provided; assuming medium status.");
    };

    match cuts.nitrogen_status(n) {
        NutrientStatus::Low => factor(
            0.4,
            FactorLevel::Low,
            format!(
                "Available N ≈ {value:.0} (low). Nitrogen is likely limiting; \
                 N-rich fertilizers (e.g., urea, ammonium sulphate) are needed."
            ),
        ),
        NutrientStatus::Adequate => factor(
            1.0,
            FactorLevel::Adequate,
            format!(
                "Available N ≈ {value:.0} (adequate). Nitrogen is generally sufficient \
                 for many crops under normal yield targets."
            ),
        ),
        NutrientStatus::High | NutrientStatus::Unknown => factor(
            0.6,
            FactorLevel::High,
            format!(
                "Available N ≈ {value:.0} (high). Excessive N can cause lush vegetative \
                 growth, lodging, and environmental losses; avoid over-application."
            ),
        ),
    }
}

pub fn score_phosphorus(p: Option<f64>, cuts: &NutrientConfig) -> FactorScore {
    let Some(value) = p else {
        return unknown("Available phosphorus not provided; assuming medium status.");
    };

    match cuts.phosphorus_status(p) {
        NutrientStatus::Low => factor(
            0.4,
            FactorLevel::Low,
            format!(
                "Available P ≈ {value:.0} (low). Phosphorus deficiency may limit root \
                 growth; phosphatic fertilizers like DAP/SSP are recommended."
            ),
        ),
        NutrientStatus::Adequate => factor(
            1.0,
            FactorLevel::Adequate,
            format!(
                "Available P ≈ {value:.0} (adequate). Phosphorus is generally in the \
                 optimal range for most crops."
            ),
        ),
        NutrientStatus::High | NutrientStatus::Unknown => factor(
            0.6,
            FactorLevel::High,
            format!(
                "Available P ≈ {value:.0} (high). Very high P can reduce micronutrient \
                 uptake; avoid unnecessary P fertilization."
            ),
        ),
    }
}

pub fn score_potassium(k: Option<f64>, cuts: &NutrientConfig) -> FactorScore {
    let Some(value) = k else {
        return unknown("Available potassium not provided; assuming medium status.");
    };

    match cuts.potassium_status(k) {
        NutrientStatus::Low => factor(
            0.4,
            FactorLevel::Low,
            format!(
                "Available K ≈ {value:.0} (low). Potassium deficiency can affect \
                 drought tolerance and grain quality; potassic fertilizers are needed."
            ),
        ),
        NutrientStatus::Adequate => factor(
            1.0,
            FactorLevel::Adequate,
            format!(
                "Available K ≈ {value:.0} (adequate). Potassium status is generally \
                 suitable for balanced nutrition."
            ),
        ),
        NutrientStatus::High | NutrientStatus::Unknown => factor(
            0.7,
            FactorLevel::High,
            format!(
                "Available K ≈ {value:.0} (high). Over-supply rarely toxic but \
                 can disturb nutrient balance; avoid unnecessary K application."
            ),
        ),
    }
}

// ============================================================================
// Salinity
// ============================================================================

pub fn score_ec(ec: Option<f64>, bands: &SalinityConfig) -> FactorScore {
    let Some(ec) = ec else {
        return unknown("Electrical conductivity not provided; assuming medium salinity.");
    };

    if ec < bands.non_saline_below {
        factor(
            1.0,
            FactorLevel::NonSaline,
            format!(
                "EC ≈ {ec:.2} dS/m (non-saline). Salinity is not a major constraint \
                 for most crops."
            ),
        )
    } else if ec < bands.slightly_saline_below {
        factor(
            0.7,
            FactorLevel::SlightlySaline,
            format!(
                "EC ≈ {ec:.2} dS/m (slightly saline). Some sensitive crops may be \
                 affected; choose tolerant varieties and manage irrigation."
            ),
        )
    } else {
        factor(
            0.3,
            FactorLevel::Saline,
            format!(
                "EC ≈ {ec:.2} dS/m (saline). High salinity can strongly reduce \
                 germination and yield; leaching and gypsum/organic matter may help."
            ),
        )
    }
}
