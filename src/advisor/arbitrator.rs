//! Hybrid arbitration between the model prediction and the rule engine.
//!
//! ## Decision precedence
//!
//! 1. Usable model prediction: it becomes the final name. A rule candidate
//!    with the exact same name upgrades the source to `ml+rules` and lends
//!    its reasons; otherwise the source is `ml_only`.
//! 2. Otherwise the rule engine's top candidate, source `rules_only`.
//! 3. Otherwise nothing, source `none`.
//!
//! The soil-health line always follows, then the predictor's diagnostic
//! message when it was unavailable. Line order is part of the contract.

use tracing::info;

use crate::types::{
    FinalRecommendation, PredictorResult, RuleEngineResult, SoilHealthResult, Source,
};

pub fn arbitrate(
    soil_health: &SoilHealthResult,
    rules: &RuleEngineResult,
    ml: &PredictorResult,
) -> FinalRecommendation {
    let mut lines: Vec<String> = Vec::new();

    let (name, source) = if let Some(ml_name) = ml.usable_label() {
        match rules.candidate(ml_name) {
            Some(matched) => {
                lines.push(format!(
                    "ML model predicts '{ml_name}' as the most suitable fertilizer \
                     for the given soil and crop."
                ));
                lines.push(
                    "Rule-based agronomic logic ALSO supports this choice based on \
                     soil NPK status and pH."
                        .to_string(),
                );
                lines.extend(matched.reasons.iter().map(|r| format!("- {r}")));
                (Some(ml_name.to_string()), Source::MlAndRules)
            }
            None => {
                lines.push(format!(
                    "ML model predicts '{ml_name}' as the best match based on patterns \
                     learned from the training dataset."
                ));
                lines.push(
                    "Rule-based system does not have a direct matching primary \
                     recommendation with the same name, so treat this as a data-driven \
                     suggestion and cross-check with local recommendations."
                        .to_string(),
                );
                (Some(ml_name.to_string()), Source::MlOnly)
            }
        }
    } else if let Some(best) = rules.top() {
        lines.push(format!(
            "Using rule-based agronomic logic, '{}' is selected as \
             the most suitable fertilizer for the current soil and crop.",
            best.name
        ));
        lines.extend(best.reasons.iter().map(|r| format!("- {r}")));
        (Some(best.name.clone()), Source::RulesOnly)
    } else {
        lines.push(
            "No clear fertilizer recommendation could be generated from the \
             rule-based system, and ML model is not available."
                .to_string(),
        );
        (None, Source::None)
    };

    lines.push(format!(
        "Soil Health Index is {:.2} ({}). Fertilizer use should \
         aim to improve or maintain this level while avoiding over-application.",
        soil_health.index, soil_health.category
    ));

    if !ml.available {
        if let Some(message) = ml.message.as_deref().filter(|m| !m.is_empty()) {
            lines.push(format!("Note: {message}"));
        }
    }

    info!(
        fertilizer = name.as_deref().unwrap_or("none"),
        source = %source,
        soil_health = format!("{:.2}", soil_health.index),
        "Final recommendation"
    );

    FinalRecommendation {
        name,
        source,
        rationale: lines.join("\n"),
    }
}
