//! Nitrogen rules: N status crossed with the pH band.

use super::RuleHit;
use crate::types::{NutrientStatus, PhBand};

pub fn nitrogen_rules(n: NutrientStatus, band: PhBand) -> Vec<RuleHit> {
    match n {
        NutrientStatus::Low if band.is_acidic() => vec![
            RuleHit::new(
                "Urea",
                1,
                "Soil nitrogen is low and pH is on acidic side – urea provides \
                 a high dose of N and has a relatively neutral reaction after \
                 hydrolysis, suitable when combined with liming/organics.",
            ),
            RuleHit::new(
                "Ammonium Sulphate",
                2,
                "Ammonium sulphate supplies N and sulphur. It is acid-forming, \
                 so it fits better where mild acidification is acceptable or \
                 where lime is also applied.",
            ),
        ],
        NutrientStatus::Low if band.is_alkaline() => vec![RuleHit::new(
            "Urea",
            1,
            "Soil nitrogen is low. Urea gives a concentrated N supply, but \
             in alkaline soils surface application can lose N as ammonia gas, \
             so incorporate into soil or irrigate after application.",
        )],
        NutrientStatus::Low => vec![RuleHit::new(
            "Urea",
            1,
            "Nitrogen status is low and pH is near neutral. Urea is a \
             cost-effective high-N fertilizer in these conditions.",
        )],
        NutrientStatus::Adequate => vec![RuleHit::new(
            "Urea",
            3,
            "Soil N is adequate. Only maintenance N doses are needed, so use \
             urea in moderate, split applications matched to crop growth stages.",
        )],
        NutrientStatus::High => vec![RuleHit::new(
            "FYM",
            4,
            "Soil N is already high. Prefer organic manures and residue \
             recycling over heavy mineral N doses to avoid lodging and losses.",
        )],
        NutrientStatus::Unknown => Vec::new(),
    }
}
