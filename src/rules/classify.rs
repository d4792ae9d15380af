//! NPK / pH classifier.
//!
//! Buckets raw readings into the status and band labels the rule groups
//! branch on. The cut points are the same ones the soil-health scorer uses.

use crate::config::{self, AdvisorConfig};
use crate::types::{NpkStatus, NutrientStatus, PhBand, SoilRecord};

pub fn nitrogen_status(n: Option<f64>) -> NutrientStatus {
    config::get().nutrients.nitrogen_status(n)
}

pub fn phosphorus_status(p: Option<f64>) -> NutrientStatus {
    config::get().nutrients.phosphorus_status(p)
}

pub fn potassium_status(k: Option<f64>) -> NutrientStatus {
    config::get().nutrients.potassium_status(k)
}

/// pH band; a reading exactly on an edge falls into the lower band.
pub fn ph_band(ph: Option<f64>) -> PhBand {
    config::get().ph_bands.band(ph)
}

/// N, P and K status of a record under an explicit configuration.
pub fn classify_npk(record: &SoilRecord, cfg: &AdvisorConfig) -> NpkStatus {
    NpkStatus {
        n: cfg.nutrients.nitrogen_status(record.nitrogen),
        p: cfg.nutrients.phosphorus_status(record.phosphorus),
        k: cfg.nutrients.potassium_status(record.potassium),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_is_unknown() {
        assert_eq!(nitrogen_status(None), NutrientStatus::Unknown);
        assert_eq!(phosphorus_status(None), NutrientStatus::Unknown);
        assert_eq!(potassium_status(None), NutrientStatus::Unknown);
        assert_eq!(ph_band(None), PhBand::Unknown);
    }

    #[test]
    fn test_ph_band_boundary_exactness() {
        assert_eq!(ph_band(Some(6.5)), PhBand::ModeratelyAcidic);
        assert_eq!(ph_band(Some(6.50001)), PhBand::Neutral);
        assert_eq!(ph_band(Some(4.0)), PhBand::StronglyAcidic);
        assert_eq!(ph_band(Some(9.2)), PhBand::StronglyAlkaline);
    }

    #[test]
    fn test_status_cut_points_match_scoring() {
        assert_eq!(nitrogen_status(Some(49.0)), NutrientStatus::Low);
        assert_eq!(nitrogen_status(Some(50.0)), NutrientStatus::Adequate);
        assert_eq!(phosphorus_status(Some(60.0)), NutrientStatus::High);
        assert_eq!(potassium_status(Some(70.0)), NutrientStatus::Adequate);
    }

    #[test]
    fn test_classify_npk_record() {
        let record = SoilRecord {
            nitrogen: Some(40.0),
            phosphorus: Some(12.0),
            potassium: Some(70.0),
            ..Default::default()
        };
        let status = classify_npk(&record, &AdvisorConfig::default());
        assert_eq!(
            status,
            NpkStatus {
                n: NutrientStatus::Low,
                p: NutrientStatus::Low,
                k: NutrientStatus::Adequate,
            }
        );
    }
}
