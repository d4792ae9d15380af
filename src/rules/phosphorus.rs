//! Phosphorus rules: P status crossed with the pH band.
//!
//! Acid soils get SSP first and DAP second; everywhere else only DAP, with a
//! placement caution in alkaline soils.

use super::RuleHit;
use crate::types::{NutrientStatus, PhBand};

pub fn phosphorus_rules(p: NutrientStatus, band: PhBand) -> Vec<RuleHit> {
    match p {
        NutrientStatus::Low if band.is_acidic() => vec![
            RuleHit::new(
                "SSP",
                1,
                "Available P is low and soil is acidic. Single superphosphate \
                 works well in acid soils and also supplies sulphur and calcium.",
            ),
            RuleHit::new(
                "DAP",
                2,
                "DAP supplies both N and P. In acidic soils, apply near root \
                 zone and avoid excessive use to reduce localised pH rise.",
            ),
        ],
        NutrientStatus::Low if band.is_alkaline() => vec![RuleHit::new(
            "DAP",
            1,
            "Available P is low in alkaline soils. DAP is a concentrated \
             source of P but should be placed, not broadcast, to reduce \
             fixation and improve root-zone availability.",
        )],
        NutrientStatus::Low => vec![RuleHit::new(
            "DAP",
            1,
            "Available P is low and pH is around neutral. DAP provides \
             readily available P along with some N, ideal for basal dose.",
        )],
        NutrientStatus::Adequate => vec![RuleHit::new(
            "DAP",
            3,
            "Phosphorus is adequate. Only small basal doses or starter \
             phosphate are needed, especially for P-sensitive crops.",
        )],
        NutrientStatus::High => vec![RuleHit::new(
            "FYM",
            4,
            "High P soils generally do not need more phosphatic fertilizer. \
             Use organic manures to maintain structure and micronutrient supply.",
        )],
        NutrientStatus::Unknown => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_p_acidic_prefers_ssp() {
        let hits = phosphorus_rules(NutrientStatus::Low, PhBand::StronglyAcidic);
        let names: Vec<_> = hits.iter().map(|h| (h.name, h.priority)).collect();
        assert_eq!(names, vec![("SSP", 1), ("DAP", 2)]);
    }

    #[test]
    fn test_low_p_alkaline_and_neutral_use_dap_only() {
        let alkaline = phosphorus_rules(NutrientStatus::Low, PhBand::SlightlyAlkaline);
        assert_eq!(alkaline.len(), 1);
        assert_eq!(alkaline[0].name, "DAP");
        assert!(alkaline[0].reason.contains("placed, not broadcast"));

        let neutral = phosphorus_rules(NutrientStatus::Low, PhBand::Neutral);
        assert_eq!(neutral.len(), 1);
        assert!(neutral[0].reason.contains("ideal for basal dose"));
    }

    #[test]
    fn test_high_p_redirects_to_organics() {
        let hits = phosphorus_rules(NutrientStatus::High, PhBand::Neutral);
        assert_eq!(hits[0].name, "FYM");
        assert_eq!(hits[0].priority, 4);
    }
}
