//! Potassium rules, keyed on K status alone.

use super::RuleHit;
use crate::types::NutrientStatus;

pub fn potassium_rules(k: NutrientStatus) -> Vec<RuleHit> {
    match k {
        NutrientStatus::Low => vec![RuleHit::new(
            "MOP",
            1,
            "Available K is low. Muriate of potash (MOP) is a standard K \
             source; crucial for grain filling, disease resistance and \
             drought tolerance.",
        )],
        NutrientStatus::Adequate => vec![RuleHit::new(
            "MOP",
            3,
            "Potassium is adequate. Only maintenance doses are needed, \
             especially for high-K-demand crops (sugarcane, potato, banana).",
        )],
        NutrientStatus::High => vec![RuleHit::new(
            "FYM",
            4,
            "K is high; direct potassic fertilizers may be unnecessary. \
             Organic manures help sustain overall fertility without excess K.",
        )],
        NutrientStatus::Unknown => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_tiers() {
        assert_eq!(potassium_rules(NutrientStatus::Low)[0].priority, 1);
        assert_eq!(potassium_rules(NutrientStatus::Adequate)[0].priority, 3);
        let high = potassium_rules(NutrientStatus::High);
        assert_eq!((high[0].name, high[0].priority), ("FYM", 4));
        assert!(potassium_rules(NutrientStatus::Unknown).is_empty());
    }
}
