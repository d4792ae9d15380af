//! Recommendation Regression Tests
//!
//! End-to-end scenarios through the public API: soil health, rule engine and
//! arbitration with stub predictors and with missing model artifacts. The
//! rationale text is compared line by line because its order is part of the
//! output contract.

use std::collections::BTreeMap;

use soil_advisor::advisor::{
    build_final_recommendation_with, build_recommendation_report_with,
};
use soil_advisor::config::AdvisorConfig;
use soil_advisor::ml_engine::{FertilizerPredictor, Predictor};
use soil_advisor::rules::{merge_candidates, suggest_fertilizers_with, RuleHit};
use soil_advisor::soil_health::compute_soil_health_with;
use soil_advisor::types::{
    single_record, HealthCategory, NutrientStatus, PhBand, PredictorResult, SoilFactor,
    SoilRecord, Source,
};
use soil_advisor::{build_final_recommendation, AdvisorError};

// ============================================================================
// Fixtures
// ============================================================================

struct StubPredictor(Option<&'static str>);

impl FertilizerPredictor for StubPredictor {
    fn predict(&self, _record: &SoilRecord) -> PredictorResult {
        match self.0 {
            Some(label) => PredictorResult::prediction(label.to_string(), None),
            None => PredictorResult::unavailable("stub offline"),
        }
    }
}

fn rice_soil() -> SoilRecord {
    SoilRecord {
        ph: Some(6.2),
        organic_carbon: Some(0.6),
        nitrogen: Some(40.0),
        phosphorus: Some(12.0),
        potassium: Some(70.0),
        crop: Some("Rice".to_string()),
        ..Default::default()
    }
}

fn ideal_soil() -> SoilRecord {
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

fn missing_artifacts() -> (tempfile::TempDir, Predictor) {
    let dir = tempfile::tempdir().unwrap();
    let predictor = Predictor::from_paths(
        dir.path().join("classifier.json"),
        dir.path().join("feature_transform.json"),
    );
    (dir, predictor)
}

// ============================================================================
// Soil health
// ============================================================================

#[test]
fn ideal_soil_scores_excellent() {
    let result = compute_soil_health_with(&ideal_soil(), &AdvisorConfig::default());
    assert!(result.factor_scores.values().all(|f| f.score == 1.0));
    assert_eq!(result.index, 1.0);
    assert_eq!(result.category, HealthCategory::Excellent);
}

#[test]
fn index_stays_in_unit_range_across_ph() {
    let cfg = AdvisorConfig::default();
    let mut ph = 3.5;
    while ph <= 10.0 {
        let record = SoilRecord { ph: Some(ph), ..ideal_soil() };
        let result = compute_soil_health_with(&record, &cfg);
        assert!((0.0..=1.0).contains(&result.index), "pH {ph} gave {}", result.index);
        assert_eq!(result.category, cfg.soil_health.category(result.index));
        ph += 0.25;
    }
}

#[test]
fn ph_band_upper_edge_is_inclusive() {
    let cfg = AdvisorConfig::default();
    let at_edge = SoilRecord { ph: Some(6.5), ..Default::default() };
    let above = SoilRecord { ph: Some(6.50001), ..Default::default() };
    assert_eq!(
        suggest_fertilizers_with(&at_edge, "", &cfg).ph_band,
        PhBand::ModeratelyAcidic
    );
    assert_eq!(suggest_fertilizers_with(&above, "", &cfg).ph_band, PhBand::Neutral);

    let health = compute_soil_health_with(&at_edge, &cfg);
    assert_eq!(health.factor_scores[&SoilFactor::Ph].score, 0.7);
}

// ============================================================================
// Rule engine
// ============================================================================

#[test]
fn rice_scenario_classification_and_order() {
    let rules = suggest_fertilizers_with(&rice_soil(), "Rice", &AdvisorConfig::default());

    assert_eq!(rules.npk_status.n, NutrientStatus::Low);
    assert_eq!(rules.npk_status.p, NutrientStatus::Low);
    assert_eq!(rules.npk_status.k, NutrientStatus::Adequate);
    assert_eq!(rules.ph_band, PhBand::ModeratelyAcidic);

    let order: Vec<(&str, u8)> = rules
        .primary_recommendations
        .iter()
        .map(|c| (c.name.as_str(), c.priority))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Urea", 1),
            ("SSP", 1),
            ("FYM", 1),
            ("Ammonium Sulphate", 2),
            ("DAP", 2),
            ("Vermicompost", 2),
            ("MOP", 3),
        ]
    );

    let urea = rules.candidate("Urea").unwrap();
    assert_eq!(urea.reasons.len(), 2);
    assert!(urea.reasons[1].starts_with("Rice is a high N-demand crop."));
    assert_eq!(urea.nutrients.map(|p| p.n), Some(46.0));
    assert!(rules.notes.iter().any(|n| n.starts_with("Soil is acidic")));
}

#[test]
fn merge_keeps_min_priority_and_reason_order() {
    let merged = merge_candidates([
        RuleHit::new("Urea", 3, "maintenance"),
        RuleHit::new("MOP", 2, "potash"),
        RuleHit::new("Urea", 1, "rice demand"),
    ]);
    assert_eq!(merged[0].name, "Urea");
    assert_eq!(merged[0].priority, 1);
    assert_eq!(merged[0].reasons, vec!["maintenance", "rice demand"]);
    assert_eq!(merged[1].name, "MOP");
}

#[test]
fn pulse_crop_gets_biofertilizer_without_profile() {
    let record = SoilRecord {
        phosphorus: Some(10.0),
        ph: Some(7.0),
        ..Default::default()
    };
    let rules = suggest_fertilizers_with(&record, "Chickpea gram", &AdvisorConfig::default());
    let bio = rules.candidate("Biofertilizer").unwrap();
    assert_eq!(bio.priority, 1);
    assert!(bio.nutrients.is_none());
    assert!(rules.candidate("DAP").unwrap().reasons.len() >= 2);
}

// ============================================================================
// Arbitration
// ============================================================================

#[test]
fn rice_scenario_without_artifacts_falls_back_to_rules() {
    let (_dir, predictor) = missing_artifacts();
    let rec = build_final_recommendation_with(&rice_soil(), &predictor, &AdvisorConfig::default());

    assert_eq!(rec.source, Source::RulesOnly);
    assert_eq!(rec.name.as_deref(), Some("Urea"));
    assert_eq!(
        rec.rationale_lines(),
        vec![
            "Using rule-based agronomic logic, 'Urea' is selected as the most suitable \
             fertilizer for the current soil and crop.",
            "- Soil nitrogen is low and pH is on acidic side – urea provides a high dose of N \
             and has a relatively neutral reaction after hydrolysis, suitable when combined \
             with liming/organics.",
            "- Rice is a high N-demand crop. Split urea applications aligned with tillering \
             and panicle initiation stages are recommended.",
            "Soil Health Index is 0.62 (Good). Fertilizer use should aim to improve or \
             maintain this level while avoiding over-application.",
            "Note: ML model file not found. Only rule-based recommendations will be used.",
        ]
    );
}

#[test]
fn predictor_agreeing_with_rules_is_ml_plus_rules() {
    let rec = build_final_recommendation_with(
        &rice_soil(),
        &StubPredictor(Some("DAP")),
        &AdvisorConfig::default(),
    );
    assert_eq!(rec.source, Source::MlAndRules);
    let lines = rec.rationale_lines();
    assert_eq!(
        lines[0],
        "ML model predicts 'DAP' as the most suitable fertilizer for the given soil and crop."
    );
    assert_eq!(
        lines[2],
        "- DAP supplies both N and P. In acidic soils, apply near root zone and avoid \
         excessive use to reduce localised pH rise."
    );
    assert!(!lines.iter().any(|l| l.starts_with("Note:")));
}

#[test]
fn predictor_without_rule_match_is_ml_only() {
    let rec = build_final_recommendation_with(
        &rice_soil(),
        &StubPredictor(Some("NPK_20_20_0")),
        &AdvisorConfig::default(),
    );
    assert_eq!(rec.source, Source::MlOnly);
    assert_eq!(rec.name.as_deref(), Some("NPK_20_20_0"));
    assert_eq!(rec.rationale_lines().len(), 3);
}

#[test]
fn empty_record_with_offline_predictor() {
    let rec = build_final_recommendation_with(
        &SoilRecord::default(),
        &StubPredictor(None),
        &AdvisorConfig::default(),
    );
    // organic matter rules still fire on an unknown reading
    assert_eq!(rec.source, Source::RulesOnly);
    assert_eq!(rec.name.as_deref(), Some("FYM"));
    assert!(rec.rationale.ends_with("Note: stub offline"));
}

#[test]
fn repeated_calls_are_identical() {
    let cfg = AdvisorConfig::default();
    let (_dir, predictor) = missing_artifacts();
    let first = build_recommendation_report_with(&rice_soil(), &predictor, &cfg);
    let second = build_recommendation_report_with(&rice_soil(), &predictor, &cfg);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn report_serializes_with_expected_keys() {
    let report = build_recommendation_report_with(
        &rice_soil(),
        &StubPredictor(Some("Urea")),
        &AdvisorConfig::default(),
    );
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["final_choice"]["source"], "ml+rules");
    assert_eq!(json["rules"]["npk_status"]["N"], "low");
    assert_eq!(json["rules"]["ph_band"], "moderately_acidic");
    assert_eq!(json["soil_health"]["category"], "Good");
    assert!(json["soil_health"]["factor_scores"]["pH"]["score"].is_number());
    assert_eq!(json["input"]["pH"], 6.2);
}

#[test]
fn default_entry_point_never_fails() {
    let rec = build_final_recommendation(&rice_soil());
    assert!(rec.name.is_some());
    assert!(matches!(
        rec.source,
        Source::RulesOnly | Source::MlOnly | Source::MlAndRules
    ));
}

// ============================================================================
// Input shape
// ============================================================================

#[test]
fn json_input_accepts_object_or_single_row() {
    let object = serde_json::json!({"pH": 6.2, "nitrogen": 40, "crop": "Rice"});
    let record = SoilRecord::from_json_value(&object).unwrap();
    assert_eq!(record.ph, Some(6.2));
    assert_eq!(record.crop_name(), "Rice");

    let rows = serde_json::json!([{"ph": 7.0, "ec": 0.4}]);
    let record = SoilRecord::from_json_value(&rows).unwrap();
    assert_eq!(record.electrical_conductivity, Some(0.4));
}

#[test]
fn multi_row_input_is_rejected() {
    let rows = serde_json::json!([{"pH": 6.0}, {"pH": 7.0}]);
    assert!(matches!(
        SoilRecord::from_json_value(&rows),
        Err(AdvisorError::InputShape(_))
    ));
    assert!(single_record(&[]).is_err());

    let one = [rice_soil()];
    assert_eq!(single_record(&one).unwrap().ph, Some(6.2));
}

#[test]
fn probability_map_orders_for_display() {
    let mut probs = BTreeMap::new();
    probs.insert("MOP".to_string(), 0.1);
    probs.insert("Urea".to_string(), 0.7);
    probs.insert("DAP".to_string(), 0.2);
    let result = PredictorResult::prediction("Urea".to_string(), Some(probs));
    let names: Vec<&str> = result.ranked().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["Urea", "DAP", "MOP"]);
}
