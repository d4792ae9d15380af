//! Rule Engine
//!
//! Five independent rule groups (nitrogen, phosphorus, potassium, organic
//! matter, crop) each emit `(fertilizer, priority, reason)` hits from the
//! classified soil status. Hits are merged by fertilizer name, keeping the
//! strongest priority and every reason in firing order, then stably sorted
//! by priority.
//!
//! ```text
//! SoilRecord ─► classify ─► NpkStatus + PhBand
//!                              │
//!        ┌──────────┬──────────┼──────────┬──────────┐
//!        ▼          ▼          ▼          ▼          ▼
//!     nitrogen  phosphorus potassium   organic     crop
//!        └──────────┴──────────┼──────────┴──────────┘
//!                              ▼
//!                   merge_candidates (fold + stable sort)
//! ```

pub mod classify;
pub mod crop;
pub mod nitrogen;
pub mod organic;
pub mod phosphorus;
pub mod potassium;

pub use classify::{classify_npk, nitrogen_status, ph_band, phosphorus_status, potassium_status};
pub use crop::crop_rules;
pub use nitrogen::nitrogen_rules;
pub use organic::organic_rules;
pub use phosphorus::phosphorus_rules;
pub use potassium::potassium_rules;

use tracing::debug;

use crate::config::{self, AdvisorConfig};
use crate::tables::nutrient_profile;
use crate::types::{
    FertilizerCandidate, NpkStatus, NutrientStatus, PhBand, RuleEngineResult, SoilRecord,
};

/// One fertilizer proposal emitted by a rule group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleHit {
    pub name: &'static str,
    /// 1 = most urgent
    pub priority: u8,
    pub reason: &'static str,
}

impl RuleHit {
    pub const fn new(name: &'static str, priority: u8, reason: &'static str) -> Self {
        Self { name, priority, reason }
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Run every rule group against a record using the active configuration.
///
/// `crop` is free text; matching is case-insensitive and ignores
/// surrounding whitespace.
pub fn suggest_fertilizers(record: &SoilRecord, crop: &str) -> RuleEngineResult {
    suggest_fertilizers_with(record, crop, config::get())
}

pub fn suggest_fertilizers_with(
    record: &SoilRecord,
    crop: &str,
    cfg: &AdvisorConfig,
) -> RuleEngineResult {
    let npk_status = classify_npk(record, cfg);
    let ph_band = cfg.ph_bands.band(record.ph);

    let hits: Vec<RuleHit> = nitrogen_rules(npk_status.n, ph_band)
        .into_iter()
        .chain(phosphorus_rules(npk_status.p, ph_band))
        .chain(potassium_rules(npk_status.k))
        .chain(organic_rules(record.organic_carbon, cfg.organic_carbon.rule_cutoff))
        .chain(crop_rules(crop, &npk_status))
        .collect();

    let hit_count = hits.len();
    let primary_recommendations = merge_candidates(hits);
    let (warnings, notes) = advisories(&npk_status, ph_band);

    debug!(
        n = %npk_status.n,
        p = %npk_status.p,
        k = %npk_status.k,
        ph_band = %ph_band,
        hits = hit_count,
        candidates = primary_recommendations.len(),
        "Rule engine evaluated"
    );

    RuleEngineResult {
        npk_status,
        ph_band,
        primary_recommendations,
        warnings,
        notes,
    }
}

// ============================================================================
// Merge
// ============================================================================

/// Collapse hits into one candidate per fertilizer name.
///
/// Candidates appear in first-seen order before the stable priority sort, so
/// equal priorities keep the order in which the rules fired.
pub fn merge_candidates(hits: impl IntoIterator<Item = RuleHit>) -> Vec<FertilizerCandidate> {
    let mut merged: Vec<FertilizerCandidate> = Vec::new();

    for hit in hits {
        match merged.iter_mut().find(|c| c.name == hit.name) {
            Some(existing) => {
                existing.priority = existing.priority.min(hit.priority);
                existing.reasons.push(hit.reason.to_string());
            }
            None => merged.push(FertilizerCandidate {
                name: hit.name.to_string(),
                priority: hit.priority,
                reasons: vec![hit.reason.to_string()],
                nutrients: nutrient_profile(hit.name),
            }),
        }
    }

    merged.sort_by_key(|c| c.priority);
    merged
}

// ============================================================================
// Warnings & notes
// ============================================================================

fn advisories(npk: &NpkStatus, band: PhBand) -> (Vec<String>, Vec<String>) {
    let mut warnings = Vec::new();
    let mut notes = Vec::new();

    if npk.n == NutrientStatus::High {
        warnings.push(
            "Soil nitrogen is high – avoid excessive N doses to reduce lodging, \
             nitrate leaching and greenhouse gas emissions."
                .to_string(),
        );
    }
    if npk.p == NutrientStatus::High {
        warnings.push(
            "Soil phosphorus is high – further P application may be unnecessary and \
             can aggravate micronutrient deficiencies."
                .to_string(),
        );
    }
    if npk.k == NutrientStatus::High {
        notes.push(
            "Soil potassium is high – focus on balanced N and P along with organics \
             instead of heavy K fertilization."
                .to_string(),
        );
    }

    if band.is_acidic() {
        notes.push(
            "Soil is acidic – liming with materials like agricultural lime or dolomite \
             is often recommended before intensive fertilization."
                .to_string(),
        );
    }
    if band.is_alkaline() {
        notes.push(
            "Soil is alkaline – avoid over-use of carbonate-rich or strongly basic \
             materials; consider organic matter and acid-forming fertilizers where appropriate."
                .to_string(),
        );
    }

    notes.push(
        "These recommendations are generic and should be fine-tuned using local soil \
         test reports and crop-specific fertilizer schedules."
            .to_string(),
    );

    (warnings, notes)
}
