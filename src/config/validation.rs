//! Config validation: unknown-key detection with Levenshtein suggestions
//! and agronomic range checks.
//!
//! The raw TOML is first parsed into a `toml::Value` and its key tree is
//! compared against the known field names, producing "did you mean?"
//! warnings. Normal serde deserialization follows. Warnings never reject a
//! config.

use std::collections::HashSet;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Every valid dotted key path of `AdvisorConfig`.
///
/// Kept by hand in step with advisor_config.rs.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        "ph_bands",
        "ph_bands.strongly_acidic_max",
        "ph_bands.moderately_acidic_max",
        "ph_bands.neutral_max",
        "ph_bands.slightly_alkaline_max",
        "nutrients",
        "nutrients.nitrogen_low_below",
        "nutrients.nitrogen_high_from",
        "nutrients.phosphorus_low_below",
        "nutrients.phosphorus_high_from",
        "nutrients.potassium_low_below",
        "nutrients.potassium_high_from",
        "organic_carbon",
        "organic_carbon.low_below",
        "organic_carbon.medium_below",
        "organic_carbon.good_below",
        "organic_carbon.rule_cutoff",
        "salinity",
        "salinity.non_saline_below",
        "salinity.slightly_saline_below",
        "soil_health",
        "soil_health.excellent_from",
        "soil_health.good_from",
        "soil_health.moderate_from",
        "predictor",
        "predictor.enabled",
        "predictor.model_path",
        "predictor.transform_path",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively collects the dotted key paths of a `toml::Value` tree.
///
/// `{ a = { b = 1, c = 2 } }` yields `["a", "a.b", "a.c"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Closest known key within edit distance 3. Ties go to the
/// lexicographically smaller key so the suggestion is stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (k, levenshtein(unknown, k)))
        .filter(|&(_, dist)| dist <= 3)
        .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)))
        .map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Warnings for every unknown key in a raw TOML document.
///
/// Syntax errors yield no warnings here; serde reports them afterwards.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(),
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Agronomic Range Validation
// ============================================================================

/// Range checks on a parsed `AdvisorConfig`.
///
/// Returns (errors, warnings). Errors are impossible values; warnings are
/// legal but unusual for field soil tests.
pub fn validate_physical_ranges(
    config: &super::AdvisorConfig,
) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let ph = &config.ph_bands;
    for (name, edge) in [
        ("strongly_acidic_max", ph.strongly_acidic_max),
        ("moderately_acidic_max", ph.moderately_acidic_max),
        ("neutral_max", ph.neutral_max),
        ("slightly_alkaline_max", ph.slightly_alkaline_max),
    ] {
        if !(0.0..=14.0).contains(&edge) {
            errors.push(format!(
                "ph_bands.{name} = {edge:.2} is outside the pH scale (0-14)"
            ));
        } else if !(3.5..=10.0).contains(&edge) {
            warnings.push(ValidationWarning {
                field: format!("ph_bands.{name}"),
                message: format!(
                    "ph_bands.{name} = {edge:.2} is outside the range seen in field soils (3.5-10)"
                ),
                suggestion: None,
            });
        }
    }

    let n = &config.nutrients;
    for (name, value) in [
        ("nitrogen_low_below", n.nitrogen_low_below),
        ("nitrogen_high_from", n.nitrogen_high_from),
        ("phosphorus_low_below", n.phosphorus_low_below),
        ("phosphorus_high_from", n.phosphorus_high_from),
        ("potassium_low_below", n.potassium_low_below),
        ("potassium_high_from", n.potassium_high_from),
    ] {
        if value < 0.0 {
            errors.push(format!("nutrients.{name} = {value:.1} cannot be negative"));
        }
    }

    let oc = &config.organic_carbon;
    if oc.low_below < 0.0 {
        errors.push(format!(
            "organic_carbon.low_below = {:.2} cannot be negative",
            oc.low_below
        ));
    }
    if oc.rule_cutoff.is_finite() && (oc.rule_cutoff < oc.low_below || oc.rule_cutoff > oc.good_below) {
        warnings.push(ValidationWarning {
            field: "organic_carbon.rule_cutoff".to_string(),
            message: format!(
                "organic_carbon.rule_cutoff = {:.2} lies outside the scoring bands ({:.2}-{:.2})",
                oc.rule_cutoff, oc.low_below, oc.good_below
            ),
            suggestion: None,
        });
    }

    let ec = &config.salinity;
    if ec.non_saline_below <= 0.0 {
        errors.push(format!(
            "salinity.non_saline_below = {:.2} must be > 0",
            ec.non_saline_below
        ));
    }
    if ec.slightly_saline_below > 16.0 {
        warnings.push(ValidationWarning {
            field: "salinity.slightly_saline_below".to_string(),
            message: format!(
                "salinity.slightly_saline_below = {:.1} dS/m would treat strongly saline soil as only slightly saline",
                ec.slightly_saline_below
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================
