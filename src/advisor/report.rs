//! Plain-text rendering of a `RecommendationReport` for terminal output.

use crate::types::{RecommendationReport, SoilFactor};

/// Render a report as human-readable sections.
pub fn render_text(report: &RecommendationReport) -> String {
    let mut parts: Vec<String> = Vec::new();

    // Decision first
    let choice = &report.final_choice;
    parts.push(format!(
        "Recommended fertilizer: {} (source: {})",
        choice.name.as_deref().unwrap_or("none"),
        choice.source
    ));
    parts.push(choice.rationale.clone());

    // Soil health breakdown
    let health = &report.soil_health;
    let mut section = vec![format!(
        "Soil Health Index: {:.2} ({})",
        health.index, health.category
    )];
    for factor in SoilFactor::ALL {
        if let Some(score) = health.factor_scores.get(&factor) {
            section.push(format!(
                "  {:<15} {:.2}  {}",
                factor.to_string(),
                score.score,
                score.message
            ));
        }
    }
    parts.push(section.join("\n"));

    // Rule candidates
    let rules = &report.rules;
    let mut section = vec![format!(
        "Soil status: N {}, P {}, K {}, pH {}",
        rules.npk_status.n, rules.npk_status.p, rules.npk_status.k, rules.ph_band
    )];
    if rules.primary_recommendations.is_empty() {
        section.push("  No rule-based candidates.".to_string());
    }
    for candidate in &rules.primary_recommendations {
        section.push(format!("  [{}] {}", candidate.priority, candidate.name));
        section.extend(candidate.reasons.iter().map(|r| format!("      - {r}")));
    }
    parts.push(section.join("\n"));

    if !rules.warnings.is_empty() {
        let mut section = vec!["Warnings:".to_string()];
        section.extend(rules.warnings.iter().map(|w| format!("  ! {w}")));
        parts.push(section.join("\n"));
    }
    if !rules.notes.is_empty() {
        let mut section = vec!["Notes:".to_string()];
        section.extend(rules.notes.iter().map(|n| format!("  * {n}")));
        parts.push(section.join("\n"));
    }

    // Model view
    let ml = &report.ml;
    if let Some(label) = ml.usable_label() {
        let mut section = vec![format!("Model prediction: {label}")];
        section.extend(
            ml.ranked()
                .into_iter()
                .take(3)
                .map(|(name, p)| format!("  {name:<15} {:.1}%", p * 100.0)),
        );
        parts.push(section.join("\n"));
    } else {
        parts.push(format!(
            "Model prediction: unavailable ({})",
            ml.message.as_deref().unwrap_or("no prediction")
        ));
    }

    parts.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::build_recommendation_report_with;
    use crate::config::AdvisorConfig;
    use crate::ml_engine::Predictor;
    use crate::types::SoilRecord;

    #[test]
    fn test_render_rules_only_report() {
        let record = SoilRecord {
            ph: Some(7.0),
            nitrogen: Some(30.0),
            phosphorus: Some(30.0),
            potassium: Some(100.0),
            organic_carbon: Some(1.0),
            ..Default::default()
        };
        let report =
            build_recommendation_report_with(&record, &Predictor::disabled(), &AdvisorConfig::default());
        let text = render_text(&report);

        assert!(text.starts_with("Recommended fertilizer: Urea (source: rules_only)"));
        assert!(text.contains("Soil Health Index:"));
        assert!(text.contains("  [1] Urea"));
        assert!(text.contains("Model prediction: unavailable (ML predictor disabled by configuration."));
    }

    #[test]
    fn test_render_lists_every_factor_in_order() {
        let report = build_recommendation_report_with(
            &SoilRecord::default(),
            &Predictor::disabled(),
            &AdvisorConfig::default(),
        );
        let text = render_text(&report);
        let ph = text.find("  pH ").unwrap();
        let ec = text.find("  ec ").unwrap();
        assert!(ph < ec);
        assert!(text.contains("Soil status: N unknown, P unknown, K unknown, pH unknown"));
    }
}
