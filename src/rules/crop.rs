//! Crop-specific additions, matched by keyword against the crop name.

use super::RuleHit;
use crate::tables::{crop_groups, CropGroup};
use crate::types::{NpkStatus, NutrientStatus};

pub fn crop_rules(crop: &str, npk: &NpkStatus) -> Vec<RuleHit> {
    let mut hits = Vec::new();

    for group in crop_groups(crop) {
        match group {
            CropGroup::Cereal => {
                hits.push(RuleHit::new(
                    "Urea",
                    1,
                    "Rice is a high N-demand crop. Split urea applications aligned \
                     with tillering and panicle initiation stages are recommended.",
                ));
                if npk.k == NutrientStatus::Low {
                    hits.push(RuleHit::new(
                        "MOP",
                        2,
                        "Potassium strongly influences rice lodging resistance and grain \
                         quality; K application is important when soil K is low.",
                    ));
                }
            }
            CropGroup::Legume => {
                hits.push(RuleHit::new(
                    "Biofertilizer",
                    1,
                    "Pulses form symbiosis with Rhizobium and related bacteria. \
                     Seed treatment and soil application with biofertilizers reduce \
                     the need for heavy mineral N doses.",
                ));
                if npk.p == NutrientStatus::Low {
                    hits.push(RuleHit::new(
                        "DAP",
                        2,
                        "Adequate P is critical for nodulation and N fixation in pulses, \
                         so a basal dose of DAP is useful when soil P is low.",
                    ));
                }
            }
            CropGroup::Vegetable => {
                hits.push(RuleHit::new(
                    "NPK_17_17_17",
                    1,
                    "Vegetables are nutrient-intensive. Balanced complex fertilizers \
                     like NPK 17-17-17 help supply N, P and K in a single source.",
                ));
                hits.push(RuleHit::new(
                    "Vermicompost",
                    2,
                    "Vermicompost improves soil tilth and supports microbial activity, \
                     which is beneficial for root-heavy vegetable crops.",
                ));
            }
            CropGroup::Sugarcane => {
                hits.push(RuleHit::new(
                    "MOP",
                    1,
                    "Sugarcane removes large amounts of potassium; potash application \
                     is key for cane yield and juice quality.",
                ));
                hits.push(RuleHit::new(
                    "Urea",
                    2,
                    "High N requirement; split urea doses at formative and grand growth \
                     stages are recommended.",
                ));
            }
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(n: NutrientStatus, p: NutrientStatus, k: NutrientStatus) -> NpkStatus {
        NpkStatus { n, p, k }
    }

    #[test]
    fn test_rice_k_boost_only_when_k_low() {
        let adequate = status(
            NutrientStatus::Low,
            NutrientStatus::Low,
            NutrientStatus::Adequate,
        );
        let hits = crop_rules("Rice", &adequate);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Urea");

        let low_k = status(NutrientStatus::Low, NutrientStatus::Low, NutrientStatus::Low);
        let hits = crop_rules("rice", &low_k);
        let names: Vec<_> = hits.iter().map(|h| h.name).collect();
        assert_eq!(names, vec!["Urea", "MOP"]);
    }

    #[test]
    fn test_pulses_get_biofertilizer_first() {
        let low_p = status(
            NutrientStatus::Adequate,
            NutrientStatus::Low,
            NutrientStatus::Adequate,
        );
        let hits = crop_rules("Pulses", &low_p);
        let names: Vec<_> = hits.iter().map(|h| (h.name, h.priority)).collect();
        assert_eq!(names, vec![("Biofertilizer", 1), ("DAP", 2)]);
    }

    #[test]
    fn test_vegetables_and_sugarcane() {
        let npk = NpkStatus::default();
        let veg: Vec<_> = crop_rules("Tomato", &npk).iter().map(|h| h.name).collect();
        assert_eq!(veg, vec!["NPK_17_17_17", "Vermicompost"]);

        let cane: Vec<_> = crop_rules("Sugarcane", &npk)
            .iter()
            .map(|h| (h.name, h.priority))
            .collect();
        assert_eq!(cane, vec![("MOP", 1), ("Urea", 2)]);
    }

    #[test]
    fn test_unmatched_crop_adds_nothing() {
        assert!(crop_rules("Wheat", &NpkStatus::default()).is_empty());
        assert!(crop_rules("", &NpkStatus::default()).is_empty());
    }
}
