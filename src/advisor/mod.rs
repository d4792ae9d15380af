//! Hybrid Advisor
//!
//! Runs the whole pipeline for one soil record and settles on a single
//! fertilizer:
//!
//! | Stage        | Module          | Output              |
//! |--------------|-----------------|---------------------|
//! | Soil health  | `soil_health`   | `SoilHealthResult`  |
//! | Rules        | `rules`         | `RuleEngineResult`  |
//! | Predictor    | `ml_engine`     | `PredictorResult`   |
//! | Arbitration  | `arbitrator`    | `FinalRecommendation` |
//!
//! The predictor is reached only through `FertilizerPredictor`, so callers
//! can inject their own model or a stub. The plain entry points use the
//! process-wide shared predictor.

pub mod arbitrator;
pub mod report;

pub use arbitrator::arbitrate;
pub use report::render_text;

use crate::config::{self, AdvisorConfig};
use crate::ml_engine::{shared_predictor, FertilizerPredictor};
use crate::rules::suggest_fertilizers_with;
use crate::soil_health::compute_soil_health_with;
use crate::types::{FinalRecommendation, RecommendationReport, SoilRecord};

// ============================================================================
// Entry points
// ============================================================================

/// Final recommendation using the shared predictor and active configuration.
pub fn build_final_recommendation(record: &SoilRecord) -> FinalRecommendation {
    build_recommendation_report(record).final_choice
}

/// Full report using the shared predictor and active configuration.
pub fn build_recommendation_report(record: &SoilRecord) -> RecommendationReport {
    build_recommendation_report_with(record, shared_predictor(), config::get())
}

pub fn build_final_recommendation_with(
    record: &SoilRecord,
    predictor: &dyn FertilizerPredictor,
    cfg: &AdvisorConfig,
) -> FinalRecommendation {
    build_recommendation_report_with(record, predictor, cfg).final_choice
}

/// Score, classify, predict, then arbitrate.
///
/// Never fails: predictor problems surface as `ml.available = false` and a
/// note in the rationale.
pub fn build_recommendation_report_with(
    record: &SoilRecord,
    predictor: &dyn FertilizerPredictor,
    cfg: &AdvisorConfig,
) -> RecommendationReport {
    let soil_health = compute_soil_health_with(record, cfg);
    let rules = suggest_fertilizers_with(record, record.crop_name(), cfg);
    let ml = predictor.predict(record);
    let final_choice = arbitrate(&soil_health, &rules, &ml);

    RecommendationReport {
        input: record.clone(),
        soil_health,
        rules,
        ml,
        final_choice,
    }
}
