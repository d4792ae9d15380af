//! Soil Health Index
//!
//! Scores six soil factors (pH, organic carbon, N, P, K, EC) independently,
//! averages them with equal weight into an index in [0, 1] and maps the index
//! onto a category. Missing readings never fail; they score neutral.

pub mod factors;

pub use factors::{
    score_ec, score_nitrogen, score_organic_carbon, score_ph, score_phosphorus, score_potassium,
};

use std::collections::BTreeMap;
use tracing::debug;

use crate::config::{self, AdvisorConfig};
use crate::types::{SoilFactor, SoilHealthResult, SoilRecord};

/// Score a soil record against the active configuration.
pub fn compute_soil_health(record: &SoilRecord) -> SoilHealthResult {
    compute_soil_health_with(record, config::get())
}

/// Score a soil record against an explicit configuration.
pub fn compute_soil_health_with(record: &SoilRecord, cfg: &AdvisorConfig) -> SoilHealthResult {
    let factor_scores = BTreeMap::from([
        (SoilFactor::Ph, score_ph(record.ph, &cfg.ph_bands)),
        (
            SoilFactor::OrganicCarbon,
            score_organic_carbon(record.organic_carbon, &cfg.organic_carbon),
        ),
        (SoilFactor::Nitrogen, score_nitrogen(record.nitrogen, &cfg.nutrients)),
        (SoilFactor::Phosphorus, score_phosphorus(record.phosphorus, &cfg.nutrients)),
        (SoilFactor::Potassium, score_potassium(record.potassium, &cfg.nutrients)),
        (SoilFactor::Ec, score_ec(record.electrical_conductivity, &cfg.salinity)),
    ]);

    let index = factor_scores.values().map(|f| f.score).sum::<f64>() / factor_scores.len() as f64;
    let category = cfg.soil_health.category(index);

    debug!(
        index = format!("{:.3}", index),
        category = %category,
        "Soil health computed"
    );

    SoilHealthResult {
        index,
        category,
        factor_scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FactorLevel, HealthCategory};

    fn ideal_record() -> SoilRecord {
        SoilRecord {
            ph: Some(7.0),
            organic_carbon: Some(1.0),
            nitrogen: Some(100.0),
            phosphorus: Some(30.0),
            potassium: Some(150.0),
            electrical_conductivity: Some(0.5),
            ..Default::default()
        }
    }

    #[test]
    fn test_ideal_soil_is_excellent() {
        let result = compute_soil_health_with(&ideal_record(), &AdvisorConfig::default());
        assert!((result.index - 1.0).abs() < 1e-12);
        assert_eq!(result.category, HealthCategory::Excellent);
        assert_eq!(result.factor_scores.len(), 6);
    }

    #[test]
    fn test_empty_record_is_moderate() {
        let result = compute_soil_health_with(&SoilRecord::default(), &AdvisorConfig::default());
        assert!((result.index - 0.5).abs() < 1e-12);
        assert_eq!(result.category, HealthCategory::Moderate);
        assert!(result
            .factor_scores
            .values()
            .all(|f| f.level == FactorLevel::Unknown));
    }

    #[test]
    fn test_index_is_unweighted_mean() {
        let record = SoilRecord {
            ph: Some(4.5),            // 0.3
            organic_carbon: Some(0.3), // 0.4
            nitrogen: Some(30.0),     // 0.4
            phosphorus: Some(10.0),   // 0.4
            potassium: Some(40.0),    // 0.4
            electrical_conductivity: Some(3.0), // 0.3
            ..Default::default()
        };
        let result = compute_soil_health_with(&record, &AdvisorConfig::default());
        assert!((result.index - 2.2 / 6.0).abs() < 1e-12);
        assert_eq!(result.category, HealthCategory::Poor);
    }

    #[test]
    fn test_config_changes_category() {
        let mut cfg = AdvisorConfig::default();
        cfg.soil_health.excellent_from = 0.95;
        cfg.soil_health.good_from = 0.9;
        cfg.soil_health.moderate_from = 0.85;
        let result = compute_soil_health_with(&SoilRecord::default(), &cfg);
        assert_eq!(result.category, HealthCategory::Poor);
    }

    #[test]
    fn test_default_entry_point_uses_defaults() {
        let result = compute_soil_health(&ideal_record());
        assert_eq!(result.category, HealthCategory::Excellent);
    }
}
